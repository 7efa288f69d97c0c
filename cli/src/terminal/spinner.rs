use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:24.green/black}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("█▓░")
}

/// A span carrying the sweep's progress bar. The bar lives as long as the span.
pub fn start_sweep_progress(total: usize) -> Span {
    let span: Span = info_span!("sweep", indicatif.pb_show = true);
    span.pb_set_style(&sweep_style());
    span.pb_set_length(total as u64);
    span.pb_set_message(&format!("{}", "Sweeping".italic()));
    span.pb_start();
    span
}

pub fn report_sweep_progress(span: &Span, completed: usize, total: usize) {
    span.pb_set_position(completed as u64);
    if completed == total {
        span.pb_set_message("Finishing up");
    }
}
