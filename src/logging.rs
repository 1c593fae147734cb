use log::LevelFilter;
use std::env;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

pub fn parse_rust_log_level(rust_log: &str) -> LogLevel {
    let level_str = rust_log
        .split(',')
        .next()
        .unwrap_or(rust_log)
        .split('=')
        .next_back()
        .unwrap_or(rust_log)
        .to_lowercase();

    match level_str.as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        _ => LogLevel::Warn,
    }
}

/// Picks the threshold: `--verbose` forces debug, otherwise `RUST_LOG`, otherwise warn.
pub fn resolve_log_level(verbose: bool) -> LogLevel {
    if verbose {
        return LogLevel::Debug;
    }
    match env::var("RUST_LOG") {
        Ok(rust_log) => parse_rust_log_level(&rust_log),
        Err(_) => LogLevel::Warn,
    }
}

/// Installs the global logger. Output goes to stderr so rendered views stay clean on stdout.
pub fn init_logging(verbose: bool) {
    let level = resolve_log_level(verbose);
    let _ = env_logger::Builder::new()
        .filter_level(level.into())
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rust_log_level() {
        assert_eq!(parse_rust_log_level("debug"), LogLevel::Debug);
        assert_eq!(parse_rust_log_level("info"), LogLevel::Info);
        assert_eq!(parse_rust_log_level("warning"), LogLevel::Warn);
        assert_eq!(parse_rust_log_level("error"), LogLevel::Error);
        assert_eq!(parse_rust_log_level("trace"), LogLevel::Trace);

        assert_eq!(
            parse_rust_log_level("nanny_dashboard=debug"),
            LogLevel::Debug
        );
        assert_eq!(
            parse_rust_log_level("nanny_dashboard=info,reqwest=warn"),
            LogLevel::Info
        );

        assert_eq!(parse_rust_log_level("nonsense"), LogLevel::Warn);
    }

    #[test]
    fn test_verbose_forces_debug() {
        assert_eq!(resolve_log_level(true), LogLevel::Debug);
    }
}
