//! Run command: simulate a scene headless and report the outcome.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use rebound::{Circle, Simulation};

use super::common::{flag_value, load_scene, simulate, RunStats};

/// Final state of one circle.
#[derive(Debug, Serialize)]
pub struct CircleState {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub color: String,
}

impl From<&Circle> for CircleState {
    fn from(c: &Circle) -> Self {
        Self {
            x: c.center().x(),
            y: c.center().y(),
            radius: c.radius(),
            vx: c.velocity().vx,
            vy: c.velocity().vy,
            color: c.color().to_hex(),
        }
    }
}

/// JSON output of `rebound run --json`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub scene: String,
    pub generated_at: String,
    pub frames: u64,
    pub spawned: usize,
    pub total_collisions: u64,
    pub collisions: BTreeMap<String, u64>,
    pub circles: Vec<CircleState>,
}

impl RunReport {
    pub fn new(scene: &str, sim: &Simulation, stats: &RunStats) -> Self {
        Self {
            scene: scene.to_string(),
            generated_at: chrono::Local::now().to_rfc3339(),
            frames: stats.frames,
            spawned: stats.spawned,
            total_collisions: stats.total_collisions(),
            collisions: stats.zone_map(),
            circles: sim.circles().iter().map(CircleState::from).collect(),
        }
    }
}

/// Execute the run command.
pub fn cmd_run(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut frames: Option<u64> = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--frames" => {
                i += 1;
                let value = flag_value(args, i, "--frames")?;
                let n = value
                    .parse()
                    .map_err(|_| format!("Invalid frame count: {}", value))?;
                frames = Some(n);
            }
            "--json" => {
                json = true;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') => {
                if scene_path.is_none() {
                    scene_path = Some(path);
                }
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown));
            }
        }
        i += 1;
    }

    let scene = load_scene(scene_path)?;
    let frames = frames.unwrap_or(scene.frames);

    let start = Instant::now();
    let (sim, stats) = simulate(&scene, frames)?;
    let elapsed = start.elapsed();

    if json {
        let report = RunReport::new(&scene.name, &sim, &stats);
        let out = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", out);
        return Ok(());
    }

    println!("Scene: {}", scene.name);
    println!("Frames: {} in {:?}", stats.frames, elapsed);
    println!("Circles: {} ({} spawned by clicks)", sim.len(), stats.spawned);
    println!("Collisions: {}", stats.total_collisions());
    for (zone, count) in stats.zone_map() {
        println!("  {:<13} {}", zone, count);
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: rebound run [scene.yaml] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --frames <n>    Frames to simulate (default: scene's `frames`)");
    eprintln!("  --json              Print a JSON report instead of a summary");
    eprintln!();
    eprintln!("Without a scene file the default empty viewport is used.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::scene::Scene;

    #[test]
    fn report_lists_circles_and_zone_counts() {
        let yaml = "\
name: pocket
circles:
  - {x: 94, y: 94, radius: 5, vx: 1, vy: 1, color: red}
";
        let scene = Scene::from_yaml(yaml).unwrap();
        let (sim, stats) = simulate(&scene, 1).unwrap();
        let report = RunReport::new(&scene.name, &sim, &stats);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["scene"], "pocket");
        assert_eq!(json["frames"], 1);
        assert_eq!(json["collisions"]["top-right"], 1);
        assert_eq!(json["circles"][0]["color"], "#ff0000");
        assert_eq!(json["circles"][0]["vx"], -1.0);
    }
}
