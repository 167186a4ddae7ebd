pub mod style;


use std::fmt::Write;

use crate::analysis::finding::Finding;
use crate::format::{format_megabytes, truncate_unicode};
use crate::system::process::{ProcessSample, ProcessScan};

use self::style::Style;

const NAME_WIDTH: usize = 32;

/// Everything one run prints, borrowed from the analysis and the scan.
pub struct Report<'a> {
    pub findings: &'a [Finding],
    pub processes: &'a ProcessScan,
}

impl<'a> Report<'a> {
    pub fn new(findings: &'a [Finding], processes: &'a ProcessScan) -> Self {
        Report {
            findings,
            processes,
        }
    }

    pub fn render(&self, style: Style) -> String {
        render(self, style)
    }
}

pub fn render(report: &Report<'_>, style: Style) -> String {
    let glyphs = style.glyphs();
    let mut out = String::new();

    let _ = writeln!(out, "{}", glyphs.header);
    let _ = writeln!(out);
    if report.findings.is_empty() {
        let _ = writeln!(out, "{}", glyphs.no_issues);
    } else {
        for finding in report.findings {
            let _ = writeln!(out, "{}{}", glyphs.issue, finding.issue);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", glyphs.recommendations);
    let _ = writeln!(out);
    for finding in report.findings {
        let _ = writeln!(out, "{}{}", glyphs.advice, finding.recommendation);
    }

    render_ranking(
        &mut out,
        glyphs.top_cpu,
        &report.processes.top_by_cpu(),
        report.processes,
        |p| format!("{:.1}%", p.cpu_percent),
    );
    render_ranking(
        &mut out,
        glyphs.top_ram,
        &report.processes.top_by_memory(),
        report.processes,
        |p| format_megabytes(p.resident_memory_bytes),
    );

    out
}

fn render_ranking(
    out: &mut String,
    heading: &str,
    ranked: &[&ProcessSample],
    scan: &ProcessScan,
    value: impl Fn(&ProcessSample) -> String,
) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(out);

    if ranked.is_empty() {
        let _ = writeln!(out, "- no process data");
    }
    for process in ranked {
        let _ = writeln!(
            out,
            "- {} | {} | {}",
            process.pid,
            truncate_unicode(&process.name, NAME_WIDTH),
            value(*process)
        );
    }

    if let Some(first) = scan.skipped.first() {
        let count = scan.skipped.len();
        let noun = if count == 1 { "process" } else { "processes" };
        let _ = writeln!(out, "  ({count} {noun} skipped: {})", first.reason);
    }
}
