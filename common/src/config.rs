use std::time::Duration;

pub const DEFAULT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_CONCURRENCY: usize = 16;

pub struct Config {
    /// Suppresses the start-up banner.
    pub no_banner: bool,
    /// Output reduction level. `1` drops decorations, `2` prints outcomes only.
    pub quiet: u8,
    /// Emits machine-readable results on stdout instead of the terminal report.
    pub json: bool,
    pub probe: ProbeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            json: false,
            probe: ProbeConfig::default(),
        }
    }
}

/// Knobs of a single probe and of the layers calling it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Deadline of one connection attempt. Fixed for the lifetime of the attempt.
    pub timeout: Duration,
    /// Upper bound on probes in flight during a sweep.
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            concurrency: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
        }
    }
}

/// Caller-side retry. The prober itself never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. `0` is treated as `1`.
    pub attempts: u32,
    /// Fixed pause between attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
        }
    }
}
