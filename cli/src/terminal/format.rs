//! Plain-text rendering of a finished sweep.
//!
//! Everything here returns strings. Colour comes in through a [`Palette`];
//! printing happens in the command layer.

use std::time::Duration;

use netsweep_common::network::host::{HostRecord, ScanReport};
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 4] = ["HOSTNAME", "IP ADDRESS", "MAC ADDRESS", "RTT"];
const COLUMN_GAP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Hostname,
    Address,
    Mac,
    Rtt,
}

const COLUMNS: [Column; 4] = [Column::Hostname, Column::Address, Column::Mac, Column::Rtt];

/// Decorates table text after it has been padded, so escape codes never
/// count towards column widths.
pub trait Palette {
    fn header(&self, line: String) -> String {
        line
    }

    /// `raw` is the unpadded value, `padded` what ends up in the line.
    fn cell(&self, _column: Column, _raw: &str, padded: String) -> String {
        padded
    }
}

/// No decoration at all.
pub struct Plain;

impl Palette for Plain {}

type Row = [String; 4];

fn host_row(host: &HostRecord) -> Row {
    [
        host.hostname().to_string(),
        host.address().to_string(),
        host.mac_address().to_string(),
        format!("{:?}", host.round_trip_time()),
    ]
}

/// Display width of every column, headers included.
fn column_widths(rows: &[Row]) -> [usize; 4] {
    let mut widths: [usize; 4] = HEADERS.map(UnicodeWidthStr::width);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }
    widths
}

pub fn pad(cell: &str, width: usize) -> String {
    let fill: usize = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

/// Pads every cell but the last one, which needs no trailing fill.
fn layout<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize; 4],
) -> impl Iterator<Item = (usize, &'a str, String)> {
    cells.zip(widths).enumerate().map(move |(idx, (cell, width))| {
        let padded: String = match idx + 1 == widths.len() {
            true => cell.to_string(),
            false => pad(cell, *width),
        };
        (idx, cell, padded)
    })
}

fn plain_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 4]) -> String {
    layout(cells, widths)
        .map(|(_, _, padded)| padded)
        .collect::<Vec<String>>()
        .join(&" ".repeat(COLUMN_GAP))
}

/// Header, underline and one line per live host, in report order.
pub fn table(report: &ScanReport, palette: &impl Palette) -> Vec<String> {
    let rows: Vec<Row> = report.hosts().iter().map(host_row).collect();
    let widths: [usize; 4] = column_widths(&rows);
    let gap: String = " ".repeat(COLUMN_GAP);

    let underline: [String; 4] = HEADERS.map(|h| "-".repeat(h.len()));
    let mut lines: Vec<String> = vec![
        palette.header(plain_line(HEADERS.into_iter(), &widths)),
        palette.header(plain_line(underline.iter().map(String::as_str), &widths)),
    ];

    lines.extend(rows.iter().map(|row| {
        layout(row.iter().map(String::as_str), &widths)
            .map(|(idx, raw, padded)| palette.cell(COLUMNS[idx], raw, padded))
            .collect::<Vec<String>>()
            .join(&gap)
    }));
    lines
}

pub fn summary(report: &ScanReport) -> String {
    format!(
        "Targets Scanned: {}   Up: {}",
        report.targets_scanned(),
        report.hosts_up()
    )
}

pub fn total_time(report: &ScanReport) -> String {
    format!("Total Scan Time: {:?}", round_to_micros(report.elapsed()))
}

pub fn no_hosts(report: &ScanReport) -> String {
    format!("No live hosts found in {}", report.space())
}

/// The full report as it would be printed without colour.
pub fn render(report: &ScanReport) -> String {
    let mut lines: Vec<String> = if report.is_empty() {
        vec![no_hosts(report)]
    } else {
        table(report, &Plain)
    };
    lines.push(String::new());
    lines.push(summary(report));
    lines.push(total_time(report));
    lines.join("\n")
}

pub fn round_to_micros(elapsed: Duration) -> Duration {
    let nanos: u128 = elapsed.as_nanos() + 500;
    Duration::from_micros((nanos / 1_000) as u64)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
