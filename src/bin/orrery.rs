use clap::Parser;

use solar_orrery::config::{init_logging, Args};

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    // Startup failures are reported once; nothing is retried
    if let Err(e) = solar_orrery::gui::run(&args) {
        log::error!("Error loading 3D scene: {}", e);
        std::process::exit(1);
    }
}
