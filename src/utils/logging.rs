use env_logger::Env;
use log::LevelFilter;

/// Map the number of `-v` flags to a log level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize logging using env_logger.
/// `RUST_LOG` wins when set, e.g. `RUST_LOG=ics_rs=debug ics-rs get-status`;
/// otherwise the level comes from the `-v` count. Logs go to stderr.
pub fn init_logging(verbosity: u8) {
    let default_level = level_for_verbosity(verbosity).to_string().to_lowercase();
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
