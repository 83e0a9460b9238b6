#![cfg(test)]
use labwire_common::config::RetryPolicy;
use labwire_common::device::{self, Device, DeviceStatus};
use labwire_common::probe::{ProbeOutcome, ProbeRequest};
use labwire_core::retry::{self, RetryOutcome, RetryingProber};
use labwire_core::scanner::{self, DeviceReport, TcpProber};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::utils;

/// Sweeps an inventory mixing a live instrument, a dead port and a bad address.
#[tokio::test]
async fn sweep_maps_each_instrument_to_a_status() {
    let live: SocketAddr = utils::accepting_listener().await;
    let dead: u16 = utils::closed_port().await;

    let json: String = format!(
        r#"[
            {{ "id": "DEV-001", "name": "Chemistry Analyzer", "model": "Cobas C501",
               "ip": "127.0.0.1", "port": "{live}" }},
            {{ "id": "DEV-002", "name": "Hematology Analyzer", "ip": "127.0.0.1", "port": {dead} }},
            {{ "id": "DEV-003", "name": "Urinalysis Station", "ip": "not-an-ip", "port": "5000" }}
        ]"#,
        live = live.port(),
        dead = dead,
    );
    let devices: Vec<Device> = device::parse_inventory(&json).unwrap();
    let prober: Arc<TcpProber> = Arc::new(TcpProber::new(Duration::from_millis(2000)));

    let reports: Vec<DeviceReport> = scanner::sweep(prober.clone(), devices, 4, None).await;

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].status, DeviceStatus::Connected);
    assert_eq!(reports[1].status, DeviceStatus::Error);
    assert_eq!(reports[2].status, DeviceStatus::Error);

    assert!(reports[1].message.starts_with("Failed to connect to 127.0.0.1:"));
    assert!(reports[2].message.starts_with("Invalid IP address"));

    // The invalid device never reached the network.
    assert_eq!(prober.stats().started(), 2);
    assert_eq!(prober.stats().in_flight(), 0);
}

#[tokio::test]
async fn silent_instrument_is_reported_disconnected() {
    let Some(listener) = utils::saturated_listener().await else {
        eprintln!("Skipping disconnected test: kernel did not drop SYNs for a full backlog.");
        return;
    };
    let device: Device = Device {
        id: "DEV-009".into(),
        name: "Coagulation Analyzer".into(),
        model: None,
        ip: listener.addr.ip().to_string(),
        port: listener.addr.port().into(),
        connection_type: Some("TCP/IP Bi-directional".into()),
    };
    let prober: Arc<TcpProber> = Arc::new(TcpProber::new(Duration::from_millis(300)));

    let reports: Vec<DeviceReport> = scanner::sweep(prober, vec![device], 1, None).await;

    assert_eq!(reports[0].status, DeviceStatus::Disconnected);
    assert!(reports[0].message.contains("timed out after 0.3 seconds"));
}

#[tokio::test]
async fn retry_gives_up_after_configured_attempts() {
    let dead: u16 = utils::closed_port().await;
    let prober: TcpProber = TcpProber::new(Duration::from_millis(2000));
    let request: ProbeRequest = ProbeRequest::parse("127.0.0.1", &dead.to_string()).unwrap();
    let policy: RetryPolicy = RetryPolicy { attempts: 3, interval: Duration::from_millis(20) };

    let outcome: RetryOutcome = retry::probe_with_retry(&prober, &request, &policy).await;

    assert_eq!(outcome.attempts, 3);
    assert_eq!(outcome.result.outcome, ProbeOutcome::Failed);
    assert_eq!(prober.stats().settled(), 3);
}

/// The instrument comes up during the retry pause, so the second attempt reaches it.
#[tokio::test]
async fn sweep_retries_instrument_that_comes_up_late() {
    let port: u16 = utils::closed_port().await;
    let device: Device = Device {
        id: "DEV-005".into(),
        name: "Blood Gas Analyzer".into(),
        model: None,
        ip: "127.0.0.1".into(),
        port: port.into(),
        connection_type: None,
    };
    let policy: RetryPolicy = RetryPolicy { attempts: 3, interval: Duration::from_millis(400) };
    let prober: Arc<RetryingProber<TcpProber>> =
        Arc::new(RetryingProber::new(TcpProber::new(Duration::from_millis(2000)), policy));

    let late_start = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        let listener: TcpListener = TcpListener::bind(("127.0.0.1", port)).await.ok()?;
        let accepted = listener.accept().await.ok();
        Some((listener, accepted))
    });

    let reports: Vec<DeviceReport> = scanner::sweep(prober.clone(), vec![device], 1, None).await;
    if late_start.await.unwrap().is_none() {
        eprintln!("Skipping late-instrument test: port {port} was taken before the retry.");
        return;
    }

    assert_eq!(reports[0].status, DeviceStatus::Connected, "{}", reports[0].message);
    assert_eq!(prober.inner().stats().started(), 2);
    assert_eq!(prober.inner().stats().settled(), 2);
}
