//! The central **abstraction** for reachability probing.
//!
//! Callers depend on the [`Prober`] trait rather than on the socket code in
//! [`crate::network::tcp`]. [`TcpProber`] is the production implementation;
//! the sweep and retry layers take any `Prober`, which keeps them testable
//! without a network.
//!
//! Each invocation is independent and stateless with respect to every other
//! one: a probe owns its socket and its timer, and concurrent probes share
//! nothing but the counters in [`ProbeStats`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use labwire_common::config::ProbeConfig;
use labwire_common::error::ValidationError;
use labwire_common::probe::{ConnectionTestInput, ProbeRequest, ProbeResult};
use tracing::warn;

use crate::network::tcp;

mod sweep;

pub use sweep::{DeviceReport, sweep};

/// Resolves a request to exactly one terminal [`ProbeResult`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult;
}

/// Bookkeeping shared by every probe issued through one [`TcpProber`].
#[derive(Debug, Default)]
pub struct ProbeStats {
    started: AtomicUsize,
    settled: AtomicUsize,
    in_flight: AtomicUsize,
}

impl ProbeStats {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::Acquire)
    }

    /// Probes that produced a result. A probe dropped by its caller never settles.
    pub fn settled(&self) -> usize {
        self.settled.load(Ordering::Acquire)
    }

    /// Probes currently holding a socket or a timer.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Decrements `in_flight` on every exit path, including cancellation by drop.
struct InFlightGuard<'a> {
    stats: &'a ProbeStats,
}

impl<'a> InFlightGuard<'a> {
    fn enter(stats: &'a ProbeStats) -> Self {
        stats.started.fetch_add(1, Ordering::AcqRel);
        stats.in_flight.fetch_add(1, Ordering::AcqRel);
        Self { stats }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.stats.in_flight.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Probes over plain TCP connects with a fixed deadline.
#[derive(Debug, Clone)]
pub struct TcpProber {
    deadline: Duration,
    stats: Arc<ProbeStats>,
}

impl TcpProber {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            stats: Arc::new(ProbeStats::default()),
        }
    }

    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self::new(cfg.timeout)
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn stats(&self) -> &ProbeStats {
        &self.stats
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        let _guard: InFlightGuard = InFlightGuard::enter(&self.stats);
        let result: ProbeResult = tcp::connect_probe(request, self.deadline).await;
        self.stats.settled.fetch_add(1, Ordering::AcqRel);
        result
    }
}

/// Validates raw caller input, then probes it.
///
/// Validation failures are returned synchronously as errors and never open a
/// socket. Once the request is valid, every network outcome is a result.
pub async fn test_connection(
    prober: &dyn Prober,
    input: &ConnectionTestInput,
) -> Result<ProbeResult, ValidationError> {
    let request: ProbeRequest = match input.to_request() {
        Ok(request) => request,
        Err(e) => {
            warn!("rejected connection test for {}:{}: {e}", input.ip, input.port);
            return Err(e);
        }
    };
    Ok(prober.probe(&request).await)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
