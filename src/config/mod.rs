//! Configuration module for the analysis input.
//!
//! Wires together the data model, the loader and its error types. Import from
//! here for a convenient, stable API.
//!
//! Example:
//! use analysis_input::config::{AnalysisConfig, load};
//!
//! let cfg: AnalysisConfig = load("input.json")?;

pub mod error;
pub mod loader;
pub mod models;

// Re-export the data model
pub use models::{AnalysisConfig, CONTROL_COLLECTION_KEY, MARKER_NAME_KEY, TREATED_COLLECTION_KEY};

// Re-export errors
pub use error::{ConfigError, ErrorKind, FieldProblem};

// Re-export loader utilities
pub use loader::{
    generate_schema, load, load_from_path, load_from_reader, load_from_str, load_from_value,
    write_schema_to_writer,
};
