use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Switches the global log level when `enableDebug` changes.
///
/// Inert when `RUST_LOG` picked the filter, so an explicit environment
/// setting is never overridden.
#[derive(Clone, Default)]
pub struct DebugToggle {
    handle: Option<FilterHandle>,
}

impl DebugToggle {
    pub fn new(handle: FilterHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn set(&self, enable_debug: bool) -> Result<()> {
        let Some(handle) = &self.handle else {
            return Ok(());
        };
        handle
            .reload(level_filter(enable_debug))
            .context("Failed to switch log level")
    }
}

pub fn level_filter(enable_debug: bool) -> EnvFilter {
    EnvFilter::new(if enable_debug { "debug" } else { "info" })
}

/// Install the global subscriber on stderr.
pub fn init(enable_debug: bool) -> DebugToggle {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => {
            tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(std::io::stderr).with_ansi(true))
                .init();
            DebugToggle::default()
        }
        Err(_) => {
            let (filter, handle) = reload::Layer::new(level_filter(enable_debug));
            tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(std::io::stderr).with_ansi(true))
                .init();
            DebugToggle::new(handle)
        }
    }
}
