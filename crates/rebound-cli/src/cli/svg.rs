//! SVG command: write a scene's final frame as an SVG document.

use std::fs;

use log::info;

use rebound::SvgCanvas;

use super::common::{flag_value, load_scene, simulate};
use super::render::pixel_size;

const DEFAULT_SIZE: u32 = 600;

/// Execute the svg command.
pub fn cmd_svg(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut output: Option<String> = None;
    let mut frames: Option<u64> = None;
    let mut size = DEFAULT_SIZE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                output = Some(flag_value(args, i, "--output")?.to_string());
            }
            "-n" | "--frames" => {
                i += 1;
                let value = flag_value(args, i, "--frames")?;
                let n = value
                    .parse()
                    .map_err(|_| format!("Invalid frame count: {}", value))?;
                frames = Some(n);
            }
            "--size" => {
                i += 1;
                let value = flag_value(args, i, "--size")?;
                size = value.parse().map_err(|_| format!("Invalid size: {}", value))?;
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
    let (sim, _) = simulate(&scene, frames)?;

    let (width, height) = pixel_size(sim.bounds(), size);
    let mut canvas = SvgCanvas::new(*sim.bounds(), width, height);
    sim.render(&mut canvas);
    let svg = canvas.finish();

    match output {
        Some(path) => {
            fs::write(&path, &svg).map_err(|e| format!("Failed to write {}: {}", path, e))?;
            info!("Wrote {} ({}x{})", path, width, height);
            eprintln!("Wrote: {}", path);
        }
        None => print!("{}", svg),
    }
    Ok(())
}

fn print_usage() {
    eprintln!("rebound svg - Write a scene's final frame as SVG");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rebound svg [scene.yaml] [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output file (default: stdout)");
    eprintln!("    -n, --frames <n>       Frames to simulate first (default: scene's `frames`)");
    eprintln!("    --size <px>            Document width in pixels (default: {})", DEFAULT_SIZE);
}
