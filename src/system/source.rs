use std::str::FromStr;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde::Deserialize;

use super::process::ProcessScan;
use super::snapshot::MetricsSnapshot;

/// Everything one source hands to the analysis: host metrics plus the
/// process scan taken alongside them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Capture {
    pub metrics: MetricsSnapshot,
    pub processes: ProcessScan,
}

/// Where a run gets its metrics from. Piped JSON and the live host both
/// implement this, so the rules never know which one they are looking at.
pub trait MetricsSource {
    fn capture(&mut self) -> Result<Capture>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Stdin when it is piped, host otherwise.
    #[default]
    Auto,
    #[serde(alias = "json")]
    Stdin,
    #[serde(alias = "live")]
    Host,
}

impl SourceKind {
    /// Collapse `Auto` into a concrete source.
    pub fn resolve(self, stdin_is_terminal: bool, has_input_file: bool) -> SourceKind {
        match self {
            SourceKind::Auto if has_input_file || !stdin_is_terminal => SourceKind::Stdin,
            SourceKind::Auto => SourceKind::Host,
            other => other,
        }
    }

    /// An empty pipe under `Auto` means nothing was piped at all (cron,
    /// systemd, `</dev/null`), so the live host is checked instead. An
    /// explicit `Stdin` still requires a document.
    pub fn falls_back_to_host(self, stdin_document: &str) -> bool {
        self == SourceKind::Auto && stdin_document.trim().is_empty()
    }
}

impl FromStr for SourceKind {
    type Err = color_eyre::eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SourceKind::Auto),
            "stdin" | "json" => Ok(SourceKind::Stdin),
            "host" | "live" => Ok(SourceKind::Host),
            other => Err(eyre!(
                "unknown metrics source `{other}` (expected auto, stdin or host)"
            )),
        }
    }
}
