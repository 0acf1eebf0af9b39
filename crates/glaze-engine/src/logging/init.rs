use std::sync::Once;

use super::driver::DRIVER_TARGET;

/// How `init_logging` sets up `env_logger`.
///
/// Resource lifetimes log at `trace` under `glaze_engine::resource`, so
/// `"glaze_engine::resource=trace"` shows every create and delete.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// `env_logger` directives; overrides `RUST_LOG` when set.
    pub env_filter: Option<String>,

    /// Separate cap for GL debug-output messages (log target
    /// `glaze_engine::driver`). Driver notifications are chatty; `Some(Warn)`
    /// keeps only the medium and high severity ones.
    pub driver_messages: Option<log::LevelFilter>,

    pub write_style: env_logger::WriteStyle,
}

static INIT: Once = Once::new();

/// Installs the global logger the first time it is called.
///
/// A logger installed by the host application is left alone.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&resolve_filter(config.env_filter, std::env::var("RUST_LOG").ok()));
        if let Some(level) = config.driver_messages {
            builder.filter_module(DRIVER_TARGET, level);
        }
        builder.write_style(config.write_style);

        match builder.try_init() {
            Ok(()) => log::debug!("logger installed"),
            Err(_) => log::debug!("logger already installed; keeping it"),
        }
    });
}

fn resolve_filter(configured: Option<String>, from_env: Option<String>) -> String {
    configured
        .or(from_env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| "info".to_owned())
}
