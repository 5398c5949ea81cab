//! Classify command: report which zone a shape touches and how it bounces.

use rebound::{Bounded, Circle, Rectangle, Velocity, Zone};

use super::common::{flag_value, parse_floats};
use super::scene::Bounds;

/// Execute the classify command.
pub fn cmd_classify(args: &[String]) -> Result<(), String> {
    let mut shape: Option<Box<dyn Bounded>> = None;
    let mut bounds = Bounds::default().to_rectangle()?;
    let mut velocity = Velocity::new(1.0, 1.0);

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--circle" => {
                i += 1;
                let v = parse_floats(flag_value(args, i, "--circle")?, 3, "circle")?;
                let circle = Circle::from_coords(v[0], v[1], v[2]).map_err(|e| e.to_string())?;
                shape = Some(Box::new(circle));
            }
            "--rect" => {
                i += 1;
                let v = parse_floats(flag_value(args, i, "--rect")?, 4, "rectangle")?;
                let rect = Rectangle::from_coords(v[0], v[1], v[2], v[3])
                    .map_err(|e| e.to_string())?;
                shape = Some(Box::new(rect));
            }
            "--bounds" => {
                i += 1;
                let v = parse_floats(flag_value(args, i, "--bounds")?, 4, "bounds")?;
                bounds = Rectangle::from_coords(v[0], v[1], v[2], v[3])
                    .map_err(|e| format!("Invalid bounds: {}", e))?;
            }
            "--velocity" => {
                i += 1;
                let v = parse_floats(flag_value(args, i, "--velocity")?, 2, "velocity")?;
                velocity = Velocity::new(v[0], v[1]);
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            unknown => {
                return Err(format!("Unknown option: {}", unknown));
            }
        }
        i += 1;
    }

    let Some(shape) = shape else {
        print_usage();
        return Err("Missing --circle or --rect".to_string());
    };

    let zone = shape.classify_collision(&bounds);
    let bounced = zone.reflect(velocity);

    println!("zone: {} (code {})", zone, zone.code());
    println!("bounce: {}", describe_bounce(zone));
    println!(
        "velocity: ({}, {}) -> ({}, {})",
        velocity.vx, velocity.vy, bounced.vx, bounced.vy
    );
    Ok(())
}

fn describe_bounce(zone: Zone) -> &'static str {
    match zone {
        Zone::None => "none",
        Zone::Right | Zone::Left => "flip x",
        Zone::Top | Zone::Bottom => "flip y",
        _ => "flip x and y",
    }
}

fn print_usage() {
    eprintln!("rebound classify - Classify a shape against a bounding rectangle");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    rebound classify --circle <x,y,r> [OPTIONS]");
    eprintln!("    rebound classify --rect <left,top,right,bottom> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --bounds <l,t,r,b>     Bounding rectangle (default: -100,100,100,-100)");
    eprintln!("    --velocity <vx,vy>     Velocity to bounce (default: 1,1)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    rebound classify --circle 99,0,5            # right");
    eprintln!("    rebound classify --circle 99,99,5           # top-right");
    eprintln!("    rebound classify --rect -150,10,150,0       # left (wins over right)");
}
