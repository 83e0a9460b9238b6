use std::process::ExitCode;

use colored::*;
use tracing::{error, info_span, warn};

use crate::{mprint, terminal::{format, print::{self, Row}}};
use labwire_common::{
    config::Config,
    probe::{ConnectionTestInput, ConnectionTestOutput, ProbeOutcome, ProbeRequest},
    success,
};
use labwire_core::retry::{self, RetryOutcome};
use labwire_core::scanner::TcpProber;

/// Exit status when the arguments never reached the network.
pub const EXIT_INVALID_INPUT: u8 = 2;

pub async fn probe(ip: String, port: String, cfg: &Config) -> anyhow::Result<ExitCode> {
    let input: ConnectionTestInput = ConnectionTestInput::new(ip, port);
    let request: ProbeRequest = match input.to_request() {
        Ok(request) => request,
        Err(e) => {
            if cfg.json {
                println!("{}", serde_json::json!({ "success": false, "message": e.to_string() }));
            } else {
                error!("{e}");
            }
            return Ok(ExitCode::from(EXIT_INVALID_INPUT));
        }
    };

    let span = info_span!("probe", target_addr = %request);
    let _guard = span.enter();

    let prober: TcpProber = TcpProber::from_config(&cfg.probe);
    let outcome: RetryOutcome = retry::probe_with_retry(&prober, &request, &cfg.probe.retry).await;

    if cfg.json {
        let output: ConnectionTestOutput = ConnectionTestOutput::from(&outcome.result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_outcome(&request, &outcome, cfg);
    }

    Ok(if outcome.result.reachable { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn print_outcome(request: &ProbeRequest, outcome: &RetryOutcome, cfg: &Config) {
    let result = &outcome.result;
    match result.outcome {
        ProbeOutcome::Connected => success!("{}", result.message),
        ProbeOutcome::Failed => error!("{}", result.message),
        ProbeOutcome::TimedOut => warn!("{}", result.message),
    }

    if cfg.quiet > 1 {
        return;
    }

    mprint!();
    print::header("probe result", cfg.quiet);
    let mut rows: Vec<Row<'_>> = vec![
        ("Target", format::address(request)),
        ("Outcome", format::outcome(result.outcome)),
        ("Elapsed", format::millis(result.elapsed)),
    ];
    if cfg.probe.retry.attempts > 1 {
        let attempts: String = format!("{} of {}", outcome.attempts, cfg.probe.retry.attempts);
        rows.push(("Attempts", attempts.yellow()));
    }
    print::details(&rows);
    if cfg.quiet == 0 {
        print::rule();
    }
}
