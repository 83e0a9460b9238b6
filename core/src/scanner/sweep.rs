use std::sync::Arc;
use std::time::Duration;

use labwire_common::device::{Device, DeviceStatus};
use labwire_common::probe::{ProbeOutcome, ProbeRequest, ProbeResult};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

use super::Prober;

/// Connection check of one inventory entry.
#[derive(Debug, Clone)]
pub struct DeviceReport {
    pub device: Device,
    pub status: DeviceStatus,
    /// `None` when the device address failed validation and no socket was opened.
    pub result: Option<ProbeResult>,
    pub message: String,
}

impl DeviceReport {
    fn probed(device: Device, result: ProbeResult) -> Self {
        Self {
            status: DeviceStatus::from(result.outcome),
            message: result.message.clone(),
            result: Some(result),
            device,
        }
    }

    fn invalid(device: Device, reason: String) -> Self {
        Self {
            status: DeviceStatus::Error,
            result: None,
            message: reason,
            device,
        }
    }

    fn task_failed(device: Device) -> Self {
        let message: String = format!("Connection check of {} did not complete.", device.address());
        Self {
            status: DeviceStatus::Error,
            result: None,
            message,
            device,
        }
    }

    pub fn reachable(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.outcome == ProbeOutcome::Connected)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.result.as_ref().map(|r| r.elapsed)
    }
}

/// Probes every device concurrently, at most `concurrency` at a time.
///
/// Reports come back in inventory order, one per device. `on_report` is called
/// with the number of finished devices each time one settles.
pub async fn sweep(
    prober: Arc<dyn Prober>,
    devices: Vec<Device>,
    concurrency: usize,
    on_report: Option<Box<dyn Fn(usize) + Send + Sync>>,
) -> Vec<DeviceReport> {
    let total: usize = devices.len();
    let permits: Arc<Semaphore> = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut reports: Vec<Option<DeviceReport>> = vec![None; total];
    // Devices handed to a task, kept so a task that dies still gets a report.
    let mut pending: Vec<Option<Device>> = vec![None; total];
    let mut tasks: JoinSet<(usize, DeviceReport)> = JoinSet::new();

    for (idx, device) in devices.into_iter().enumerate() {
        let request: ProbeRequest = match device.request() {
            Ok(request) => request,
            Err(e) => {
                debug!("skipping {} ({}): {e}", device.id, device.address());
                reports[idx] = Some(DeviceReport::invalid(device, e.to_string()));
                continue;
            }
        };

        pending[idx] = Some(device.clone());
        let prober: Arc<dyn Prober> = Arc::clone(&prober);
        let permits: Arc<Semaphore> = Arc::clone(&permits);
        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = permits.acquire_owned().await;
            let result: ProbeResult = prober.probe(&request).await;
            (idx, DeviceReport::probed(device, result))
        });
    }

    let mut done: usize = reports.iter().filter(|r| r.is_some()).count();
    if done > 0 {
        if let Some(cb) = &on_report {
            cb(done);
        }
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((idx, report)) => {
                pending[idx] = None;
                reports[idx] = Some(report);
            }
            Err(e) => error!("probe task failed: {e}"),
        }
        done += 1;
        if let Some(cb) = &on_report {
            cb(done);
        }
    }

    reports
        .into_iter()
        .zip(pending)
        .filter_map(|(report, lost)| report.or_else(|| lost.map(DeviceReport::task_failed)))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
