//! Lane Racer entry point

use rara_arcade::Variant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Lane Racer starting...");

    if let Err(e) = rara_arcade::app::run(Variant::LaneRacer) {
        log::error!("Fatal: {}", e);
        eprintln!("lane-racer: {}", e);
        std::process::exit(1);
    }
}
