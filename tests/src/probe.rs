#![cfg(test)]
use labwire_common::probe::{ConnectionTestInput, ProbeOutcome, ProbeRequest, ProbeResult};
use labwire_core::scanner::{self, Prober, TcpProber};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use crate::utils::{self, SaturatedListener};

const DEADLINE: Duration = Duration::from_millis(2000);

/// A listener accepting on loopback yields a reachable result quickly.
#[tokio::test]
async fn probe_reaches_local_listener() {
    let addr: SocketAddr = utils::accepting_listener().await;
    let prober: TcpProber = TcpProber::new(DEADLINE);

    let input: ConnectionTestInput = ConnectionTestInput::new("127.0.0.1", addr.port().to_string());
    let started: Instant = Instant::now();
    let result: ProbeResult = scanner::test_connection(&prober, &input).await.unwrap();

    assert!(result.reachable, "unexpected: {}", result.message);
    assert_eq!(
        result.message,
        format!("Successfully connected to instrument at 127.0.0.1:{}.", addr.port())
    );
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn probe_reports_refused_port_well_before_deadline() {
    let port: u16 = utils::closed_port().await;
    let prober: TcpProber = TcpProber::new(DEADLINE);
    let request: ProbeRequest = ProbeRequest::parse("127.0.0.1", &port.to_string()).unwrap();

    let started: Instant = Instant::now();
    let result: ProbeResult = prober.probe(&request).await;

    assert!(!result.reachable);
    assert_eq!(result.outcome, ProbeOutcome::Failed);
    assert!(
        result.message.starts_with(&format!("Failed to connect to 127.0.0.1:{port}. Error: ")),
        "unexpected: {}",
        result.message
    );
    assert!(started.elapsed() < DEADLINE / 2);
}

#[tokio::test]
async fn probe_times_out_against_silent_listener() {
    let Some(listener) = utils::saturated_listener().await else {
        eprintln!("Skipping timeout test: kernel did not drop SYNs for a full backlog.");
        return;
    };
    let SaturatedListener { addr, .. } = &listener;

    let deadline: Duration = Duration::from_millis(400);
    let prober: TcpProber = TcpProber::new(deadline);
    let request: ProbeRequest = ProbeRequest::new(addr.ip(), addr.port()).unwrap();

    let started: Instant = Instant::now();
    let result: ProbeResult = prober.probe(&request).await;
    let elapsed: Duration = started.elapsed();

    assert_eq!(result.outcome, ProbeOutcome::TimedOut);
    assert_eq!(
        result.message,
        format!("Connection to 127.0.0.1:{} timed out after 0.4 seconds.", addr.port())
    );
    assert!(elapsed >= deadline, "settled early after {elapsed:?}");
    assert!(elapsed < deadline + Duration::from_millis(300), "settled late after {elapsed:?}");
    assert_eq!(prober.stats().in_flight(), 0);
}

/// A caller abandoning a pending probe releases its socket and timer without a result.
#[tokio::test]
async fn dropped_probe_leaves_nothing_in_flight() {
    let Some(listener) = utils::saturated_listener().await else {
        eprintln!("Skipping drop test: kernel did not drop SYNs for a full backlog.");
        return;
    };
    let prober: TcpProber = TcpProber::new(DEADLINE);
    let request: ProbeRequest = ProbeRequest::new(listener.addr.ip(), listener.addr.port()).unwrap();

    let abandoned = tokio::time::timeout(Duration::from_millis(100), prober.probe(&request)).await;

    assert!(abandoned.is_err());
    assert_eq!(prober.stats().started(), 1);
    assert_eq!(prober.stats().settled(), 0);
    assert_eq!(prober.stats().in_flight(), 0);
}

#[tokio::test]
async fn concurrent_probes_do_not_interfere() {
    let open: SocketAddr = utils::accepting_listener().await;
    let closed: u16 = utils::closed_port().await;
    let prober: TcpProber = TcpProber::new(DEADLINE);

    let reach: ProbeRequest = ProbeRequest::new(open.ip(), open.port()).unwrap();
    let refuse: ProbeRequest = ProbeRequest::parse("127.0.0.1", &closed.to_string()).unwrap();

    let (a, b, c, d) = tokio::join!(
        prober.probe(&reach),
        prober.probe(&refuse),
        prober.probe(&reach),
        prober.probe(&refuse),
    );

    assert_eq!(
        [a.outcome, b.outcome, c.outcome, d.outcome],
        [ProbeOutcome::Connected, ProbeOutcome::Failed, ProbeOutcome::Connected, ProbeOutcome::Failed]
    );
    assert_eq!(prober.stats().settled(), 4);
    assert_eq!(prober.stats().in_flight(), 0);
}

#[tokio::test]
async fn ipv6_loopback_is_bracketed_in_messages() {
    let Ok(listener) = tokio::net::TcpListener::bind("[::1]:0").await else {
        eprintln!("Skipping IPv6 test: no IPv6 loopback.");
        return;
    };
    let port: u16 = listener.local_addr().unwrap().port();
    let prober: TcpProber = TcpProber::new(DEADLINE);

    let input: ConnectionTestInput = ConnectionTestInput::new("::1", port);
    let result: ProbeResult = scanner::test_connection(&prober, &input).await.unwrap();

    assert!(result.reachable);
    assert_eq!(
        result.message,
        format!("Successfully connected to instrument at [::1]:{port}.")
    );
}

#[tokio::test]
#[ignore]
async fn probe_times_out_on_non_routable_address() {
    let prober: TcpProber = TcpProber::new(DEADLINE);
    let input: ConnectionTestInput = ConnectionTestInput::new("10.255.255.1", "9999");

    let started: Instant = Instant::now();
    let result: ProbeResult = scanner::test_connection(&prober, &input).await.unwrap();

    assert_eq!(
        result.message,
        "Connection to 10.255.255.1:9999 timed out after 2 seconds."
    );
    assert!(started.elapsed() >= DEADLINE);
}
