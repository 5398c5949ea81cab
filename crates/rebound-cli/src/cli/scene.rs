//! Scene files: declarative YAML setup for a simulation run.
//!
//! A scene names the bounding viewport, the spawn ranges, any circles that
//! exist from the start, and a script of mouse clicks to replay when there
//! is no mouse (headless `run`, `render` and `svg`).

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use rebound::{Circle, Rectangle, Rgb, Simulation, SpawnConfig};

/// A complete scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name/title
    #[serde(default = "default_name")]
    pub name: String,

    /// World viewport the circles bounce inside
    #[serde(default)]
    pub bounds: Bounds,

    /// Frames to simulate in headless mode
    #[serde(default = "default_frames")]
    pub frames: u64,

    /// Delay between frames in live mode (milliseconds)
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,

    /// RNG seed for spawned circles (omit for a different run every time)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Draw coordinate axes through the origin
    #[serde(default)]
    pub show_axes: bool,

    /// Ranges for randomly spawned circles
    #[serde(default)]
    pub spawn: SpawnSettings,

    /// Circles present before the first frame
    #[serde(default)]
    pub circles: Vec<CircleSpec>,

    /// Scripted clicks, each spawning a random circle
    #[serde(default)]
    pub clicks: Vec<Click>,
}

fn default_name() -> String {
    "untitled".to_string()
}

fn default_frames() -> u64 {
    600
}

fn default_frame_ms() -> u64 {
    10
}

/// Viewport edges in world units (y grows upward).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            left: -100.0,
            top: 100.0,
            right: 100.0,
            bottom: -100.0,
        }
    }
}

impl Bounds {
    pub fn to_rectangle(&self) -> Result<Rectangle, String> {
        Rectangle::from_coords(self.left, self.top, self.right, self.bottom)
            .map_err(|e| format!("Invalid bounds: {}", e))
    }
}

/// Spawn ranges, mirroring [`SpawnConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    pub min_radius: f64,
    pub max_radius: f64,
    pub max_speed: f64,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        let config = SpawnConfig::default();
        Self {
            min_radius: config.min_radius,
            max_radius: config.max_radius,
            max_speed: config.max_speed,
        }
    }
}

impl From<SpawnSettings> for SpawnConfig {
    fn from(s: SpawnSettings) -> Self {
        SpawnConfig {
            min_radius: s.min_radius,
            max_radius: s.max_radius,
            max_speed: s.max_speed,
        }
    }
}

/// A circle placed by the scene author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleSpec {
    pub x: f64,
    pub y: f64,
    pub radius: f64,

    #[serde(default)]
    pub vx: f64,

    #[serde(default)]
    pub vy: f64,

    /// Any SVG color ("#E63946", "crimson", "rgb(10, 20, 30)"); default black
    #[serde(default)]
    pub color: Option<String>,
}

impl CircleSpec {
    pub fn to_circle(&self) -> Result<Circle, String> {
        let mut circle = Circle::from_coords(self.x, self.y, self.radius)
            .map_err(|e| format!("Invalid circle at ({}, {}): {}", self.x, self.y, e))?;
        circle.set_velocity(self.vx, self.vy);
        if let Some(text) = &self.color {
            let color = Rgb::parse(text).map_err(|e| e.to_string())?;
            circle.set_color(color);
        }
        Ok(circle)
    }
}

/// A scripted click: before frame `frame` runs, spawn at `(x, y)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Click {
    pub frame: u64,
    pub x: f64,
    pub y: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            name: default_name(),
            bounds: Bounds::default(),
            frames: default_frames(),
            frame_ms: default_frame_ms(),
            seed: None,
            show_axes: false,
            spawn: SpawnSettings::default(),
            circles: Vec::new(),
            clicks: Vec::new(),
        }
    }
}

impl Scene {
    /// Load a scene from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read scene file: {}", e))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse scene YAML: {}", e))
    }

    /// Build the simulation with the scene's initial circles in place.
    pub fn build(&self) -> Result<Simulation, String> {
        let bounds = self.bounds.to_rectangle()?;
        let spawn: SpawnConfig = self.spawn.into();
        spawn.validate().map_err(|e| e.to_string())?;

        let mut sim = Simulation::new(bounds, spawn, self.seed);
        sim.set_show_axes(self.show_axes);

        for spec in &self.circles {
            sim.add(spec.to_circle()?);
        }

        Ok(sim)
    }

    /// Clicks sorted by frame, dropping (with a warning) any that would fall
    /// after the last simulated frame.
    pub fn scheduled_clicks(&self, frames: u64) -> Vec<Click> {
        let mut clicks: Vec<Click> = self
            .clicks
            .iter()
            .copied()
            .filter(|c| {
                let keep = c.frame < frames;
                if !keep {
                    warn!(
                        "Click at ({}, {}) on frame {} is past the last frame ({}), skipping",
                        c.x, c.y, c.frame, frames
                    );
                }
                keep
            })
            .collect();
        clicks.sort_by_key(|c| c.frame);
        clicks
    }
}

/// Execute the scene command.
pub fn cmd_scene(args: &[String]) -> Result<(), String> {
    let mut check_path: Option<&str> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--example" => {
                print_example();
                return Ok(());
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') => {
                check_path = Some(path);
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown));
            }
        }
        i += 1;
    }

    let Some(path) = check_path else {
        print_usage();
        return Ok(());
    };

    let scene = Scene::load(path)?;
    let sim = scene.build()?;
    println!("Scene: {}", scene.name);
    println!("Bounds: {}", sim.bounds());
    println!("Circles: {} initial, {} scripted clicks", sim.len(), scene.clicks.len());
    println!("Frames: {} ({} ms each in live mode)", scene.frames, scene.frame_ms);
    Ok(())
}

fn print_usage() {
    eprintln!("rebound scene - Inspect or generate scene files");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rebound scene <scene.yaml>    Validate a scene and print a summary");
    eprintln!("    rebound scene --example       Print an example scene YAML");
}

/// Annotated example, also shipped as `scenes/example.yaml`.
pub const EXAMPLE_SCENE: &str = include_str!("../../scenes/example.yaml");

fn print_example() {
    print!("{}", EXAMPLE_SCENE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_scene_parses_and_builds() {
        let scene = Scene::from_yaml(EXAMPLE_SCENE).unwrap();
        assert_eq!(scene.name, "Corner pocket");
        assert_eq!(scene.seed, Some(42));
        assert_eq!(scene.circles.len(), 2);
        let sim = scene.build().unwrap();
        assert_eq!(sim.len(), 2);
        assert_eq!(sim.circles()[0].color(), Rgb::new(0xe6, 0x39, 0x46));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let scene = Scene::from_yaml("{}").unwrap();
        assert_eq!(scene.frames, 600);
        assert_eq!(scene.frame_ms, 10);
        assert_eq!(scene.bounds.left, -100.0);
        assert_eq!(scene.spawn.max_radius, 10.0);
        assert!(scene.clicks.is_empty());
    }

    #[test]
    fn partial_spawn_section_keeps_other_defaults() {
        let scene = Scene::from_yaml("spawn:\n  max_speed: 4\n").unwrap();
        assert_eq!(scene.spawn.max_speed, 4.0);
        assert_eq!(scene.spawn.min_radius, 5.0);
    }

    #[test]
    fn bad_bounds_are_reported() {
        let scene = Scene::from_yaml("bounds: {left: 0, top: 0, right: 5, bottom: 5}").unwrap();
        let err = scene.build().err().unwrap();
        assert!(err.contains("Invalid bounds"), "{}", err);
    }

    #[test]
    fn bad_circle_is_reported() {
        let yaml = "circles:\n  - {x: 0, y: 0, radius: 0}\n";
        let err = Scene::from_yaml(yaml).unwrap().build().err().unwrap();
        assert!(err.contains("radius"), "{}", err);
    }

    #[test]
    fn unsamplable_spawn_settings_are_reported() {
        for yaml in [
            "spawn: {max_speed: .inf}",
            "spawn: {max_speed: 1e308}",
            "spawn: {max_radius: .inf}",
            "spawn: {min_radius: 0}",
            "spawn: {min_radius: 12, max_radius: 6}",
        ] {
            let err = Scene::from_yaml(yaml).unwrap().build().err().unwrap();
            assert!(err.contains("invalid spawn settings"), "{}: {}", yaml, err);
        }
    }

    #[test]
    fn bad_color_is_reported() {
        let yaml = "circles:\n  - {x: 0, y: 0, radius: 1, color: 'nope'}\n";
        let err = Scene::from_yaml(yaml).unwrap().build().err().unwrap();
        assert!(err.contains("invalid color"), "{}", err);
    }

    #[test]
    fn clicks_are_sorted_and_clipped() {
        let yaml = "\
clicks:
  - {frame: 50, x: 1, y: 1}
  - {frame: 5, x: 2, y: 2}
  - {frame: 500, x: 3, y: 3}
";
        let scene = Scene::from_yaml(yaml).unwrap();
        let clicks = scene.scheduled_clicks(100);
        let frames: Vec<u64> = clicks.iter().map(|c| c.frame).collect();
        assert_eq!(frames, vec![5, 50]);
    }
}
