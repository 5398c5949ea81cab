//! Common utilities shared across CLI commands.

use std::collections::BTreeMap;

use log::{info, warn};
use rebound::{Simulation, Zone};

use super::scene::Scene;

/// Totals gathered while a scene runs headless.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub frames: u64,
    pub spawned: usize,
    /// Collisions per zone, indexed by [`Zone::code`]
    pub zone_counts: [u64; 9],
}

impl RunStats {
    pub fn total_collisions(&self) -> u64 {
        self.zone_counts.iter().sum()
    }

    /// Non-zero counts keyed by zone name.
    pub fn zone_map(&self) -> BTreeMap<String, u64> {
        Zone::all()
            .iter()
            .filter(|z| self.zone_counts[z.code() as usize] > 0)
            .map(|z| (z.name().to_string(), self.zone_counts[z.code() as usize]))
            .collect()
    }
}

/// Build the scene's simulation and run it for `frames` frames, replaying
/// scripted clicks just before the frame they are scheduled for.
pub fn simulate(scene: &Scene, frames: u64) -> Result<(Simulation, RunStats), String> {
    let mut sim = scene.build()?;
    let clicks = scene.scheduled_clicks(frames);
    let mut next_click = 0;
    let mut stats = RunStats::default();

    info!(
        "Running '{}' for {} frames ({} initial circles, {} clicks)",
        scene.name,
        frames,
        sim.len(),
        clicks.len()
    );

    for frame in 0..frames {
        while next_click < clicks.len() && clicks[next_click].frame == frame {
            let click = clicks[next_click];
            match sim.spawn_at(click.x, click.y) {
                Ok(_) => stats.spawned += 1,
                Err(e) => warn!("Click at ({}, {}) ignored: {}", click.x, click.y, e),
            }
            next_click += 1;
        }

        let report = sim.tick();
        for hit in &report.hits {
            stats.zone_counts[hit.zone.code() as usize] += 1;
        }
    }
    stats.frames = frames;

    info!(
        "Finished: {} circles, {} collisions",
        sim.len(),
        stats.total_collisions()
    );
    Ok((sim, stats))
}

/// Parse "a,b,c" into exactly `n` floats.
pub fn parse_floats(text: &str, n: usize, what: &str) -> Result<Vec<f64>, String> {
    let values: Vec<f64> = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| {
            format!(
                "Invalid {}: '{}' (expected {} comma-separated numbers)",
                what, text, n
            )
        })?;

    if values.len() != n {
        return Err(format!(
            "Invalid {}: '{}' (expected {} comma-separated numbers, got {})",
            what,
            text,
            n,
            values.len()
        ));
    }
    Ok(values)
}

/// Pull the value following a flag, or explain which flag is missing one.
pub fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires a value", flag))
}

/// Load the scene at `path`, or the default scene when no path is given.
pub fn load_scene(path: Option<&str>) -> Result<Scene, String> {
    match path {
        Some(p) => {
            info!("Loading scene: {}", p);
            Scene::load(p)
        }
        None => Ok(Scene::default()),
    }
}
