//! Profiling scopes based on the `puffin` crate.
//!
//! With the `profiling` feature disabled, `profile_function!` and
//! `profile_scope!` still exist but expand to nothing.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
pub use crate::{__strata_noop_profile as profile_function, __strata_noop_profile as profile_scope};

use crate::config::ProfilingMode;

#[cfg(not(feature = "profiling"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __strata_noop_profile {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Turn profiling on according to `mode`.
///
/// Returns `true` if scopes are being recorded afterwards. A web server that
/// fails to bind is logged and leaves scopes recorded in-process.
///
/// # Example
/// ```no_run
/// use strata_core::config::ProfilingMode;
/// use strata_core::profiling::init_profiling;
///
/// init_profiling(&ProfilingMode::web_server());
/// ```
#[cfg(feature = "profiling")]
pub fn init_profiling(mode: &ProfilingMode) -> bool {
    match mode {
        ProfilingMode::Off => {
            puffin::set_scopes_on(false);
            false
        }
        ProfilingMode::On => {
            puffin::set_scopes_on(true);
            true
        }
        ProfilingMode::WithWebServer { address } => {
            puffin::set_scopes_on(true);

            if PROFILING_SERVER.get().is_some() {
                tracing::debug!("Puffin server already running");
                return true;
            }

            match puffin_http::Server::new(address) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{}", address);
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server on {}: {}", address, e);
                }
            }
            true
        }
    }
}

#[cfg(not(feature = "profiling"))]
pub fn init_profiling(mode: &ProfilingMode) -> bool {
    if mode.is_enabled() {
        tracing::warn!("Profiling requested but the `profiling` feature is disabled");
    }
    false
}

/// Close the current profiling frame.
///
/// Call once per batch of geometry work (e.g. after building a scene) so
/// the viewer groups scopes sensibly.
#[inline]
pub fn finish_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
