use log::LevelFilter;

/// Initialize logging at the given level; RUST_LOG still overrides.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
