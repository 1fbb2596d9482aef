//! Batch progress spinner.
//!
//! A single process-wide spinner; log lines are routed through it (see
//! [`SpinnerWriter`]) so they print above the bar instead of through it.

use std::sync::OnceLock;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use ipamr_core::report::RunReport;

static SPINNER: OnceLock<ProgressBar> = OnceLock::new();

fn get_spinner() -> &'static ProgressBar {
    SPINNER.get_or_init(|| {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ]);
        bar.set_style(style);
        bar
    })
}

pub fn start(message: &str) {
    let bar = get_spinner();
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message.to_string());
}

pub fn report_batch_progress(report: &RunReport) {
    get_spinner().set_message(format!(
        "Processed {} records, written: {}, skipped: {}",
        report.processed.to_string().green().bold(),
        report.written().to_string().green(),
        report.skipped().to_string().yellow()
    ));
}

pub fn finish() {
    get_spinner().finish_and_clear();
}

pub struct SpinnerWriter;

impl std::io::Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf);
        let msg = msg.trim_end();
        get_spinner().println(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
