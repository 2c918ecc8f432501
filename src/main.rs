//! MargaNav binary: runs the explorer against the scripted mock rig.

use env_logger::Env;
use log::{error, info};
use marga_nav::devices::MockRig;
use marga_nav::sync::CancelToken;
use marga_nav::{MargaApp, MargaConfig};
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match MargaConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No config file given, using defaults");
            MargaConfig::default()
        }
    };

    let token = CancelToken::new();
    let ctrlc_token = token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Interrupt received, shutting down");
        ctrlc_token.cancel();
    }) {
        error!("Failed to install interrupt handler: {}", e);
        std::process::exit(1);
    }

    let rig = demo_rig();
    let app = MargaApp::new(config, rig.clone(), rig.clone(), token);
    match app.run(rig) {
        Ok(()) => info!("Exploration finished"),
        Err(e) => {
            error!("Exploration failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Scripted rig driving a few corridors with crossroad approaches, then
/// pressing the abort switch when the script runs out
fn demo_rig() -> MockRig {
    let rig = MockRig::new(4).abort_on_empty();
    for _ in 0..3 {
        rig.push_corridor(20, 20);
        rig.push_widening(4, 20);
        rig.push_corridor(5, 20);
    }
    rig
}
