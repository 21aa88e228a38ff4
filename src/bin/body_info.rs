use std::f32::consts::PI;
use std::path::PathBuf;

use clap::Parser;

use solar_orrery::file::read_file;
use solar_orrery::model::orbit::{ORBIT_SCALE, SPIN_SCALE_Y};
use solar_orrery::model::{BodyRegistry, Orrery};

#[derive(Debug, Parser)]
struct Args {
    name: String,
    /// Body table to read instead of the built-in one.
    #[arg(long)]
    bodies: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let registry = match &args.bodies {
        Some(path) => match read_file(path) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => BodyRegistry::default(),
    };

    let sun = registry.sun();
    if sun.name.to_lowercase() == args.name.to_lowercase() {
        println!("{} sits at the center: radius {}", sun.name, sun.radius);
        return;
    }

    let orrery = Orrery::new(registry);
    let mut found = false;
    for (id, body) in orrery.registry().planets() {
        if body.name.to_lowercase() != args.name.to_lowercase() {
            continue;
        }
        found = true;

        let angular_velocity = body.base_angular_speed * ORBIT_SCALE;
        println!("Orbital characteristics for {}", body.name);
        println!("- Description: {}", body.description);
        println!("- Radius: {}", body.radius);
        println!("- Orbital distance: {}", body.orbital_distance);
        println!("- Base speed: {:.2}x", body.base_angular_speed);
        if angular_velocity > 0.0 {
            println!("- Orbital period: {:.1} s", 2.0 * PI / angular_velocity);
        } else {
            println!("- Orbital period: never");
        }
        println!(
            "- Spin period: {:.1} s",
            2.0 * PI / (body.rotation_speed * SPIN_SCALE_Y)
        );
        println!(
            "- Starting angle: {:.1} deg",
            orrery.state(id).angle.to_degrees()
        );
        println!();
    }

    if !found {
        eprintln!("No body named {}", args.name);
        std::process::exit(1);
    }
}
