/*!
Status report module.

Builds the document written after a successful load. It echoes the validated
input back in the same camelCase shape plus a `status` field:

```json
{
  "status": "success",
  "controlCollection": "ctrlA",
  "treatedCollection": "treatB",
  "markerName": "CD45"
}
```

`markerName` only appears when a marker is set.
*/

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::config::AnalysisConfig;

/// Default output path used by the CLI.
pub const DEFAULT_OUTPUT_PATH: &str = "output.json";

/// Outcome recorded in the report.
#[derive(Debug, Copy, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

/// Output document echoing the loaded configuration.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport<'a> {
    pub status: Status,
    pub control_collection: &'a str,
    pub treated_collection: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_name: Option<&'a str>,
}

impl<'a> StatusReport<'a> {
    pub fn success(config: &'a AnalysisConfig) -> Self {
        Self {
            status: Status::Success,
            control_collection: config.control_collection(),
            treated_collection: config.treated_collection(),
            marker_name: config.marker_name(),
        }
    }
}

/// Write the report to any writer as pretty JSON followed by a newline.
pub fn write_report_to_writer<W: Write>(report: &StatusReport<'_>, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to serialize report")?;
    writer
        .write_all(b"\n")
        .context("Failed to write report to writer")?;
    writer.flush().context("Failed to flush report")?;
    Ok(())
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_report<P: AsRef<Path>>(report: &StatusReport<'_>, path: P) -> Result<()> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref)
        .with_context(|| format!("Failed to create output file {}", path_ref.display()))?;
    write_report_to_writer(report, BufWriter::new(file))
        .with_context(|| format!("Failed to write output file {}", path_ref.display()))?;
    debug!(path = %path_ref.display(), "Report written");
    info!(
        control = report.control_collection,
        treated = report.treated_collection,
        marker = report.marker_name.unwrap_or("(none)"),
        "Analysis input echoed to output"
    );
    Ok(())
}
