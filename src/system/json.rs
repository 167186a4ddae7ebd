use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use serde_json::Value;

use super::process::{ProcessSample, ProcessScan, SkipReason};
use super::snapshot::MetricsSnapshot;
use super::source::{Capture, MetricsSource};

/// Reads one metrics document from any reader: the buffered stdin pipe in
/// the usual case, a file when `--input` is given.
pub struct JsonSource<R> {
    reader: R,
    label: String,
}

impl JsonSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Ok(JsonSource {
            reader: BufReader::new(file),
            label: path.display().to_string(),
        })
    }
}

impl<R: Read> JsonSource<R> {
    pub fn from_reader(reader: R, label: impl Into<String>) -> Self {
        JsonSource {
            reader,
            label: label.into(),
        }
    }
}

impl<R: Read> MetricsSource for JsonSource<R> {
    fn capture(&mut self) -> Result<Capture> {
        let _span = tracing::debug_span!("json.read", source = %self.label).entered();

        let mut raw = String::new();
        self.reader
            .read_to_string(&mut raw)
            .wrap_err_with(|| format!("failed to read {}", self.label))?;
        if raw.trim().is_empty() {
            return Err(eyre!("no metrics document on {}", self.label));
        }
        parse_document(&raw)
            .wrap_err_with(|| format!("failed to parse metrics document from {}", self.label))
    }
}

/// Parse a metrics document. Absent metric fields fall back to their
/// defaults; a bad entry in `processes` is skipped, not fatal.
pub fn parse_document(raw: &str) -> Result<Capture> {
    let mut document: Value = serde_json::from_str(raw)?;
    if !document.is_object() {
        return Err(eyre!("expected a JSON object at the top level"));
    }

    let process_entries = match document.as_object_mut().and_then(|o| o.remove("processes")) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            tracing::warn!(kind = value_kind(&other), "`processes` is not an array, ignoring it");
            Vec::new()
        }
    };

    let metrics: MetricsSnapshot = serde_json::from_value(document)?;
    let processes = parse_processes(process_entries);
    tracing::debug!(
        samples = processes.samples.len(),
        skipped = processes.skipped.len(),
        "metrics document parsed"
    );

    Ok(Capture { metrics, processes })
}

fn parse_processes(entries: Vec<Value>) -> ProcessScan {
    let mut scan = ProcessScan::default();
    for entry in entries {
        let pid = entry
            .get("pid")
            .and_then(Value::as_u64)
            .and_then(|pid| u32::try_from(pid).ok());
        match serde_json::from_value::<ProcessSample>(entry) {
            Ok(sample) => scan.samples.push(sample),
            Err(e) => scan.skip(pid, SkipReason::Malformed(e.to_string())),
        }
    }
    scan
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
