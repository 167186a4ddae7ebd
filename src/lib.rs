pub mod analysis;
pub mod config;
pub mod format;
pub mod logging;
pub mod report;
pub mod system;

use color_eyre::Result;

use analysis::rules::evaluate;
use report::Report;
use report::style::Style;
use system::source::MetricsSource;

/// Capture from `source`, run the rules, and render the text report.
pub fn diagnose<S: MetricsSource + ?Sized>(source: &mut S, style: Style) -> Result<String> {
    let capture = source.capture()?;
    let findings = evaluate(&capture.metrics);
    tracing::info!(findings = findings.len(), "analysis complete");
    Ok(Report::new(&findings, &capture.processes).render(style))
}
