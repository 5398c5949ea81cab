//! rebound - bouncing circles in a box, live or headless
//!
//! Usage:
//!   rebound [scene.yaml]               Interactive terminal window
//!   rebound run <scene.yaml> [--json]  Simulate headless and report
//!   rebound render <scene.yaml> -o out.png
//!   rebound svg <scene.yaml> -o out.svg
//!   rebound classify --circle x,y,r    Zone and bounce for one circle
//!   rebound scene --example            Print an example scene

use std::env;

mod cli;

use cli::{cmd_classify, cmd_live, cmd_render, cmd_run, cmd_scene, cmd_svg};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(|s| s.as_str()) {
        Some("live") => cmd_live(&args[2..]),
        Some("run") => cmd_run(&args[2..]),
        Some("render") => cmd_render(&args[2..]),
        Some("svg") => cmd_svg(&args[2..]),
        Some("classify") => cmd_classify(&args[2..]),
        Some("scene") => cmd_scene(&args[2..]),
        Some("help") | Some("--help") | Some("-h") => {
            print_usage(&args[0]);
            Ok(())
        }
        Some("--version") | Some("-V") => {
            println!("rebound {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        // A bare scene path (or nothing) launches the live window
        _ => cmd_live(&args[1..]),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    eprintln!("rebound - bouncing circles in a box");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!(
        "    {} [scene.yaml]                Interactive window (click to add circles)",
        program
    );
    eprintln!("    {} run [scene.yaml] [--json]   Simulate headless and report", program);
    eprintln!("    {} render [scene.yaml] -o <png>", program);
    eprintln!("    {} svg [scene.yaml] [-o <svg>]", program);
    eprintln!("    {} classify --circle <x,y,r> [--bounds <l,t,r,b>]", program);
    eprintln!("    {} scene [--example | <scene.yaml>]", program);
    eprintln!();
    eprintln!("Run `{} <command> --help` for command options.", program);
    eprintln!("Set RUST_LOG=debug to trace spawns and bounces.");
}
