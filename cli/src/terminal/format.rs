use crate::terminal::colors;
use colored::*;
use labwire_common::device::DeviceStatus;
use labwire_common::probe::{ProbeOutcome, ProbeRequest};
use std::net::IpAddr;
use std::time::Duration;

pub fn address(request: &ProbeRequest) -> ColoredString {
    let color: Color = match request.host {
        IpAddr::V4(_) => colors::IPV4_ADDR,
        IpAddr::V6(_) => colors::IPV6_ADDR,
    };
    request.to_string().color(color)
}

pub fn outcome(outcome: ProbeOutcome) -> ColoredString {
    match outcome {
        ProbeOutcome::Connected => "reachable".color(colors::REACHABLE).bold(),
        ProbeOutcome::Failed => "unreachable".color(colors::UNREACHABLE).bold(),
        ProbeOutcome::TimedOut => "timed out".color(colors::TIMED_OUT).bold(),
    }
}

pub fn status(status: DeviceStatus) -> ColoredString {
    let label: String = status.to_string();
    match status {
        DeviceStatus::Connected => label.color(colors::REACHABLE).bold(),
        DeviceStatus::Disconnected => label.color(colors::TIMED_OUT).bold(),
        DeviceStatus::Error => label.color(colors::UNREACHABLE).bold(),
    }
}

pub fn millis(duration: Duration) -> ColoredString {
    format!("{}ms", duration.as_millis()).color(colors::ACCENT)
}

pub fn seconds(duration: Duration) -> ColoredString {
    format!("{:.2}s", duration.as_secs_f64()).bold().yellow()
}
