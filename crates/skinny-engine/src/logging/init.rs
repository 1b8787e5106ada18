use std::sync::Once;

/// Environment variable with the crate's own filter; takes precedence over
/// `RUST_LOG`.
pub const LOG_ENV: &str = "SKINNY_LOG";

/// Backend crates that are chatty at `info` and below.
const NOISY_TARGETS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "skinny_engine=debug,wgpu_core=warn").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level used when neither `env_filter` nor the environment set one.
    pub default_level: log::LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: log::LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Filter precedence: `config.env_filter`,
/// then `SKINNY_LOG`, then `RUST_LOG`, then `config.default_level`. The
/// GPU backend targets are capped at `warn` unless the filter names them.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = config
            .env_filter
            .or_else(|| std::env::var(LOG_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok());

        match &filter {
            Some(filter) => {
                builder.parse_filters(filter);
            }
            None => {
                builder.filter_level(config.default_level);
            }
        }

        for target in NOISY_TARGETS {
            let named = filter.as_deref().is_some_and(|f| f.contains(target));
            if !named {
                builder.filter_module(target, log::LevelFilter::Warn);
            }
        }

        builder.write_style(config.write_style);

        // `try_init` so a logger installed by a test harness is not fatal.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized (filter: {})", filter.as_deref().unwrap_or("default"));
    });
}
