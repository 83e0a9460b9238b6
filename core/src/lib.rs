//! # Labwire Core
//!
//! Reachability probing of laboratory instruments.
//!
//! * **[`network`]**: the socket-level connection race.
//! * **[`scanner`]**: the [`scanner::Prober`] seam, its TCP implementation and inventory sweeps.
//! * **[`retry`]**: caller-side retry on top of any prober.

pub mod network;
pub mod retry;
pub mod scanner;
