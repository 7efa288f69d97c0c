use anyhow::Context;
use colored::*;
use tracing::Span;

use crate::terminal::format::{self, Column, Palette};
use crate::terminal::{colors, print, spinner};
use netsweep_common::network::host::{NOT_AVAILABLE, ScanReport};
use netsweep_common::network::range::{AddressSpace, HOSTS_PER_SUBNET};
use netsweep_common::{config::Config, success, warn};
use netsweep_core::discovery::{self, DiscoveryService};

pub async fn discover(base: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    let space: AddressSpace = discovery::resolve_space(base).context("cannot decide which subnet to sweep")?;

    if !is_root::is_root() {
        warn!("Not running as root: ICMP echo may be refused, leaving every host unreachable");
    }

    print::header("getting ready", cfg.quiet);
    if cfg.quiet == 0 {
        print::aligned_line("IPv4 LAN address", space.base());
        print::aligned_line("Scanning subnet", space);
        print::aligned_line("Concurrency", cfg.concurrency);
        print::aligned_line("Probe timeout", format!("{:?}", cfg.probe_timeout));
        print::aligned_line("Worst case", format!("{:?}", cfg.worst_case_duration(HOSTS_PER_SUBNET)));
    }

    let progress: Option<Span> = (cfg.quiet == 0).then(|| spinner::start_sweep_progress(HOSTS_PER_SUBNET));
    let mut service: DiscoveryService = DiscoveryService::system(cfg)?;
    if let Some(span) = progress.clone() {
        service = service.with_progress(Box::new(move |completed, total| {
            spinner::report_sweep_progress(&span, completed, total);
        }));
    }

    let report: ScanReport = service.perform_discovery(space).await?;
    drop(service);
    drop(progress);

    discovery_ends(&report, cfg);
    Ok(())
}

/// Terminal colours for the host table.
struct Coloured;

impl Palette for Coloured {
    fn header(&self, line: String) -> String {
        line.color(colors::SEPARATOR).to_string()
    }

    fn cell(&self, column: Column, raw: &str, padded: String) -> String {
        let color: Color = match column {
            _ if raw == NOT_AVAILABLE => colors::NOT_AVAILABLE,
            Column::Hostname => colors::HOSTNAME,
            Column::Address => colors::IPV4_ADDR,
            Column::Mac => colors::MAC_ADDR,
            Column::Rtt => colors::RTT,
        };
        padded.color(color).to_string()
    }
}

fn discovery_ends(report: &ScanReport, cfg: &Config) {
    match cfg.quiet {
        0 => {
            if report.is_empty() {
                print::header("zero hosts detected", cfg.quiet);
                print::print_status(format::no_hosts(report));
            } else {
                print::header("live hosts", cfg.quiet);
                for line in format::table(report, &Coloured) {
                    print::print(&line);
                }
            }
            print::fat_separator();
            print::centerln(&format::summary(report).bold().to_string());
            print::centerln(&format::total_time(report).color(colors::ACCENT).to_string());
        }
        1 => format::render(report).lines().for_each(print::print),
        _ => {
            success!("{}", format::summary(report));
            success!("{}", format::total_time(report));
        }
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
