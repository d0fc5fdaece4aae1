/// Process-wide configuration for Strata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default `tracing` filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

impl Config {
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_profiling(mut self, profiling: ProfilingMode) -> Self {
        self.profiling = profiling;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    Off,
    /// Scopes are recorded in-process only
    On,
    /// Scopes are recorded and served to `puffin_viewer` over HTTP
    WithWebServer {
        /// Bind address, e.g. `0.0.0.0:8585`
        address: String,
    },
}

impl ProfilingMode {
    /// Default `puffin_http` bind address.
    pub const DEFAULT_ADDRESS: &'static str = "0.0.0.0:8585";

    pub fn web_server() -> Self {
        ProfilingMode::WithWebServer {
            address: Self::DEFAULT_ADDRESS.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, ProfilingMode::Off)
    }
}
