//! # Labwire Common
//!
//! Types shared by every crate in the workspace: the probe data model,
//! caller-side input validation, the instrument inventory and the runtime
//! configuration.

pub mod config;
pub mod device;
pub mod error;
pub mod probe;

#[doc(hidden)]
pub use tracing as __tracing;

/// Logs a positive outcome. Rendered with a `[+]` prefix by the terminal formatter.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::__tracing::info!(target: "labwire::success", $($arg)*)
    };
}
