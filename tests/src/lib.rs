//! Cross-crate tests that drive the prober against real loopback sockets.

mod probe;
mod sweep;
mod utils;
