use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LogConfig, Rotation};

/// Install the global tracing subscriber.
///
/// Keep the returned guard alive for the process lifetime; dropping it
/// flushes and stops the non-blocking file writer.
pub fn init_logging(config: &LogConfig) -> WorkerGuard {
    let file_appender = match config.rotation {
        Rotation::Hourly => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        Rotation::Daily => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        Rotation::Never => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true) // Keep target in JSON for structured queries
            .with_writer(non_blocking)
            .with_ansi(false);
        registry.with(file_layer).init();
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout_layer = fmt::layer().with_target(false).with_ansi(true);
        registry.with(file_layer).with(stdout_layer).init();
    }

    guard
}

fn filter_directive(config: &LogConfig) -> String {
    if config.enable_tracing {
        config.log_level.clone()
    } else {
        format!("{},paycore=off", config.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        let mut config = LogConfig::default();
        config.log_level = "debug".to_string();
        assert_eq!(filter_directive(&config), "debug");

        config.enable_tracing = false;
        assert_eq!(filter_directive(&config), "debug,paycore=off");
    }
}
