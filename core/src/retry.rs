//! Caller-side retry around a [`Prober`].
//!
//! A probe is a single attempt. Layers that want another try invoke it again
//! through [`probe_with_retry`], pausing a fixed interval between attempts.
//! [`RetryingProber`] applies the same policy wherever a [`Prober`] is expected,
//! which is how sweeps retry each instrument.

use async_trait::async_trait;
use labwire_common::config::RetryPolicy;
use labwire_common::probe::{ProbeRequest, ProbeResult};
use tokio::time::sleep;
use tracing::debug;

use crate::scanner::Prober;

#[derive(Debug, Clone)]
pub struct RetryOutcome {
    /// Result of the last attempt made.
    pub result: ProbeResult,
    pub attempts: u32,
}

/// Probes until the target is reachable or the policy's attempts run out.
pub async fn probe_with_retry(
    prober: &dyn Prober,
    request: &ProbeRequest,
    policy: &RetryPolicy,
) -> RetryOutcome {
    let max_attempts: u32 = policy.attempts.max(1);
    let mut attempts: u32 = 1;
    let mut result: ProbeResult = prober.probe(request).await;

    while !result.reachable && attempts < max_attempts {
        debug!(
            "attempt {attempts}/{max_attempts} against {request} ended {}, retrying in {}ms",
            result.outcome,
            policy.interval.as_millis()
        );
        sleep(policy.interval).await;
        attempts += 1;
        result = prober.probe(request).await;
    }

    RetryOutcome { result, attempts }
}

/// A [`Prober`] that runs every request through [`probe_with_retry`].
#[derive(Debug, Clone)]
pub struct RetryingProber<P> {
    inner: P,
    policy: RetryPolicy,
}

impl<P: Prober> RetryingProber<P> {
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: Prober> Prober for RetryingProber<P> {
    async fn probe(&self, request: &ProbeRequest) -> ProbeResult {
        probe_with_retry(&self.inner, request, &self.policy).await.result
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
