use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use labwire_common::{
    config::Config,
    device::{self, Device, DeviceStatus},
    probe::ConnectionTestOutput,
    success,
};
use labwire_core::retry::RetryingProber;
use labwire_core::scanner::{self, DeviceReport, TcpProber};
use serde_json::json;
use tracing::{info, warn};

use crate::{mprint, terminal::{colors, format, print::{self, Row}, spinner}};

pub async fn sweep(inventory: &Path, cfg: &Config) -> anyhow::Result<ExitCode> {
    let devices: Vec<Device> = device::load_inventory(inventory)?;
    let total: usize = devices.len();
    if !cfg.json {
        info!("Loaded {total} instruments from {}", inventory.display());
    }

    let tcp: TcpProber = TcpProber::from_config(&cfg.probe);
    let prober: Arc<RetryingProber<TcpProber>> = Arc::new(RetryingProber::new(tcp, cfg.probe.retry));
    let show_progress: bool = !cfg.json && total > 0;
    let on_report: Option<Box<dyn Fn(usize) + Send + Sync>> = if show_progress {
        spinner::start_sweep(total);
        Some(Box::new(spinner::report_sweep_progress))
    } else {
        None
    };

    let start_time: Instant = Instant::now();
    let reports: Vec<DeviceReport> =
        scanner::sweep(prober, devices, cfg.probe.concurrency, on_report).await;

    if show_progress {
        spinner::finish_sweep();
    }

    let reachable: usize = reports.iter().filter(|r| r.reachable()).count();
    if cfg.json {
        print_json(&reports)?;
    } else {
        sweep_ends(&reports, reachable, start_time.elapsed(), cfg);
    }

    Ok(if all_reached(reachable, total) { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Counted against the inventory, not the reports, so a lost device still fails the sweep.
fn all_reached(reachable: usize, total: usize) -> bool {
    reachable == total
}

fn print_json(reports: &[DeviceReport]) -> anyhow::Result<()> {
    let rows: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            let output = report.result.as_ref().map(ConnectionTestOutput::from);
            json!({
                "id": report.device.id,
                "name": report.device.name,
                "address": report.device.address(),
                "status": report.status,
                "success": report.reachable(),
                "message": report.message,
                "outcome": output.as_ref().map(|o| o.outcome),
                "elapsed_ms": output.as_ref().map(|o| o.elapsed_ms),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn sweep_ends(reports: &[DeviceReport], reachable: usize, total_time: Duration, cfg: &Config) {
    if reports.is_empty() {
        warn!("Inventory contains no instruments");
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("instrument sweep", cfg.quiet);
    for (idx, report) in reports.iter().enumerate() {
        match cfg.quiet {
            2 => print_status_line(report),
            _ => print_device_tree(report, idx),
        }
        if idx + 1 != reports.len() && cfg.quiet < 2 {
            mprint!();
        }
    }
    print_summary(reports, reachable, total_time, cfg);
}

fn print_status_line(report: &DeviceReport) {
    print::status_line(format!(
        "{} {} {}",
        report.device.id.color(colors::PRIMARY),
        report.device.address().color(colors::SEPARATOR),
        format::status(report.status)
    ));
}

fn print_device_tree(report: &DeviceReport, idx: usize) {
    let mut rows: Vec<Row<'_>> = vec![("ID", report.device.id.color(colors::TEXT_DEFAULT))];
    if let Some(model) = &report.device.model {
        rows.push(("Model", model.color(colors::TEXT_DEFAULT)));
    }
    let address: ColoredString = match report.device.request() {
        Ok(request) => format::address(&request),
        Err(_) => report.device.address().color(colors::UNREACHABLE),
    };
    rows.push(("Address", address));
    rows.push(("Status", format::status(report.status)));
    if let Some(elapsed) = report.elapsed() {
        rows.push(("Elapsed", format::millis(elapsed)));
    }
    rows.push(("Detail", report.message.color(colors::TEXT_DEFAULT)));

    print::device_tree(idx, &report.device.name, &rows);
}

fn print_summary(reports: &[DeviceReport], reachable: usize, total_time: Duration, cfg: &Config) {
    let total: usize = reports.len();
    let counted: ColoredString = format!("{reachable}/{total} instruments reachable").bold().green();
    let output: String = format!("Sweep Complete: {counted} in {}", format::seconds(total_time));

    match cfg.quiet {
        0 => {
            print::rule();
            print::centered(&output);
            print::rule();
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }

    if reachable < total && cfg.quiet == 0 {
        let count = |status: DeviceStatus| reports.iter().filter(|r| r.status == status).count();
        warn!(
            "{} disconnected, {} in error",
            count(DeviceStatus::Disconnected),
            count(DeviceStatus::Error)
        );
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
