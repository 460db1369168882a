use std::fmt;

use schemars::JsonSchema;
use serde::Serialize;

use super::error::{ConfigError, FieldProblem};

/// JSON key of the control ("T-") collection.
pub const CONTROL_COLLECTION_KEY: &str = "controlCollection";
/// JSON key of the treated ("T+") collection.
pub const TREATED_COLLECTION_KEY: &str = "treatedCollection";
/// JSON key of the optional marker filter.
pub const MARKER_NAME_KEY: &str = "markerName";

/// Validated analysis input.
///
/// Built once from the input document and immutable afterwards. The serialized
/// shape matches the input file format, which is also what the JSON Schema
/// exported by [`crate::config::generate_schema`] describes:
///
/// ```json
/// { "controlCollection": "ctrlA", "treatedCollection": "treatB", "markerName": "CD45" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Collection holding the control (T-) clone.
    #[schemars(length(min = 1))]
    control_collection: String,

    /// Collection holding the treated (T+) clone.
    #[schemars(length(min = 1))]
    treated_collection: String,

    /// Optional marker used to narrow the analysis. Empty means "no marker".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    marker_name: Option<String>,
}

impl AnalysisConfig {
    /// Build a config, rejecting empty collection names.
    ///
    /// An empty marker is normalized to `None`.
    pub fn new(
        control_collection: impl Into<String>,
        treated_collection: impl Into<String>,
        marker_name: Option<String>,
    ) -> Result<Self, ConfigError> {
        let control_collection = non_empty(CONTROL_COLLECTION_KEY, control_collection.into())?;
        let treated_collection = non_empty(TREATED_COLLECTION_KEY, treated_collection.into())?;
        Ok(Self {
            control_collection,
            treated_collection,
            marker_name: marker_name.filter(|m| !m.is_empty()),
        })
    }

    pub fn control_collection(&self) -> &str {
        &self.control_collection
    }

    pub fn treated_collection(&self) -> &str {
        &self.treated_collection
    }

    pub fn marker_name(&self) -> Option<&str> {
        self.marker_name.as_deref()
    }

    /// True iff a non-empty marker was supplied.
    pub fn has_marker(&self) -> bool {
        self.marker_name.is_some()
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Control Collection: {}", self.control_collection)?;
        writeln!(f, "Treated Collection: {}", self.treated_collection)?;
        write!(
            f,
            "Marker Name: {}",
            self.marker_name.as_deref().unwrap_or("(none)")
        )
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::MissingField {
            field,
            problem: FieldProblem::Empty,
        });
    }
    Ok(value)
}
