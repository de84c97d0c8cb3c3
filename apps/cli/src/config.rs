//! CLI configuration loading and merging.

use tune_core::TuneConfig;

/// Load and merge CLI configuration.
///
/// Configuration precedence:
/// 1. CLI arguments (handled by clap)
/// 2. Environment variables
/// 3. Local config file (./.tunerc)
/// 4. Global config file ($TUNE_HOME/config.toml)
/// 5. Defaults
pub fn load_config() -> TuneConfig {
    TuneConfig::discover_and_load()
}

/// Resolve the log level from the flag, then the config file.
pub fn log_level(flag: Option<&str>, config: &TuneConfig) -> tracing::Level {
    match flag.or(config.log_level.as_deref()).unwrap_or("warn") {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    }
}
