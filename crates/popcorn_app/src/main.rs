mod config;
mod platform;

use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let config_path = config::config_path_from_args(std::env::args().skip(1))?;
    let config = config::AppConfig::load(&config_path)?;

    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    popcorn_logging::initialize(config.log_destination.into(), level, &config.log_file);

    platform::run_app(config)
}
