//! Rara Avis entry point

use rara_arcade::Variant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    log::info!("Rara Avis starting...");

    if let Err(e) = rara_arcade::app::run(Variant::RaraAvis) {
        log::error!("Fatal: {}", e);
        eprintln!("rara-avis: {}", e);
        std::process::exit(1);
    }
}
