//! FlippyBlock Extreme entry point

use rara_arcade::Variant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("FlippyBlock Extreme starting...");

    if let Err(e) = rara_arcade::app::run(Variant::FlippyBlock) {
        log::error!("Fatal: {}", e);
        eprintln!("flippy-block: {}", e);
        std::process::exit(1);
    }
}
