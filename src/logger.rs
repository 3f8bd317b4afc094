use log::LevelFilter;

/// Initialize the logger with the specified level.
///
/// An explicit RUST_LOG in the environment still takes precedence.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_millis()
        .init();
}
