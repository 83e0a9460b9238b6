use std::io::Write;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} instruments {msg:.dim}";

static SWEEP_BAR: OnceLock<ProgressBar> = OnceLock::new();

/// Starts the sweep progress bar. Later calls return the bar already running.
pub fn start_sweep(total: usize) -> &'static ProgressBar {
    SWEEP_BAR.get_or_init(|| {
        let style: ProgressStyle = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸ ")
            .tick_strings(&["▁▂▃", "▂▃▄", "▃▄▅", "▄▅▆", "▅▆▇", "▆▇█", "▅▆▇", "▄▅▆", "▃▄▅", "▂▃▄"]);

        let bar: ProgressBar = ProgressBar::new(total as u64).with_style(style);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    })
}

pub fn report_sweep_progress(done: usize) {
    if let Some(bar) = SWEEP_BAR.get() {
        bar.set_position(done as u64);
        if done as u64 >= bar.length().unwrap_or(0) {
            bar.set_message("done");
        }
    }
}

pub fn finish_sweep() {
    if let Some(bar) = SWEEP_BAR.get() {
        bar.finish_and_clear();
    }
}

/// Routes log output above the progress bar while it runs, straight to the terminal otherwise.
///
/// `stderr` keeps stdout clean for machine-readable output.
#[derive(Clone, Copy)]
pub struct SpinnerWriter {
    pub stderr: bool,
}

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match SWEEP_BAR.get() {
            Some(bar) if !bar.is_finished() => {
                bar.println(String::from_utf8_lossy(buf).trim_end());
                Ok(buf.len())
            }
            _ if self.stderr => std::io::stderr().write(buf),
            _ => std::io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.stderr {
            std::io::stderr().flush()
        } else {
            std::io::stdout().flush()
        }
    }
}
