use colored::*;
use labwire_common::config::Config;
use labwire_common::probe::format_seconds;

use crate::terminal::{colors, print};

pub fn info(cfg: &Config) -> anyhow::Result<()> {
    if cfg.json {
        let settings = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "timeout_ms": cfg.probe.timeout.as_millis() as u64,
            "attempts": cfg.probe.retry.attempts,
            "retry_interval_ms": cfg.probe.retry.interval.as_millis() as u64,
            "concurrency": cfg.probe.concurrency,
        });
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    let setting = |value: String| value.color(colors::TEXT_DEFAULT);
    print::header("about the tool", cfg.quiet);
    print::details(&[
        ("Version", env!("CARGO_PKG_VERSION").color(colors::ACCENT)),
        ("Timeout", setting(format!("{}s", format_seconds(cfg.probe.timeout)))),
        ("Attempts", setting(cfg.probe.retry.attempts.to_string())),
        ("Retry interval", setting(format!("{}ms", cfg.probe.retry.interval.as_millis()))),
        ("Concurrency", setting(cfg.probe.concurrency.to_string())),
    ]);
    if cfg.quiet == 0 {
        print::rule();
    }
    Ok(())
}
