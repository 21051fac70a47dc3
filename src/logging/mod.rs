//! Structured logging via the `tracing` crate.
//!
//! - Level-based filtering (TRACE/DEBUG/INFO/WARN/ERROR)
//! - Per-module filter overrides
//! - Idempotent initialization, safe from tests and the CLI alike

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Log level for the caves core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration for tracing initialization
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub default_level: LogLevel,
    pub module_filters: Vec<(String, LogLevel)>,
    pub show_timestamps: bool,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    pub show_file_line: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_level: LogLevel::Info,
            module_filters: vec![
                ("caves_core::generation".to_string(), LogLevel::Info),
                ("caves_core::roster".to_string(), LogLevel::Info),
                ("caves_core::render".to_string(), LogLevel::Warn),
            ],
            show_timestamps: true,
            show_thread_ids: false,
            show_targets: true,
            show_file_line: false,
        }
    }
}

impl TracingConfig {
    pub fn to_env_filter_string(&self) -> String {
        let mut parts = vec![self.default_level.as_str().to_string()];
        for (module, level) in &self.module_filters {
            parts.push(format!("{}={}", module, level.as_str()));
        }
        parts.join(",")
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with default settings (idempotent - safe to call multiple times)
pub fn init_tracing_default() {
    init_tracing(&TracingConfig::default());
}

/// Initialize tracing with custom config (idempotent - first call wins).
/// The `RUST_LOG` environment variable overrides the config filter entirely.
pub fn init_tracing(config: &TracingConfig) {
    let filter_str = config.to_env_filter_string();
    let show_timestamps = config.show_timestamps;
    let show_thread_ids = config.show_thread_ids;
    let show_targets = config.show_targets;
    let show_file_line = config.show_file_line;
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(show_targets)
            .with_thread_ids(show_thread_ids)
            .with_file(show_file_line)
            .with_line_number(show_file_line)
            .compact();

        // Ignore error if a global subscriber is already set (e.g., by a test harness)
        if show_timestamps {
            let _ = builder.try_init();
        } else {
            let _ = builder.without_time().try_init();
        }
    });
}
