//! # Error Types
//!
//! Structured error types for alweld_core. Every failure in the pipeline
//! surfaces as one of these variants; nothing is caught or retried inside the
//! library, so the first error aborts the run and no partial result is built.
//!
//! ## Example
//!
//! ```rust
//! use alweld_core::errors::{CalcError, CalcResult};
//!
//! fn validate_thickness(t: f64) -> CalcResult<()> {
//!     if t <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "t".to_string(),
//!             value: t.to_string(),
//!             reason: "Wall thickness must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for alweld_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for partition, mesh, and analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (unknown grade, bad face, non-positive dimension)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The mesher could not triangulate the partitioned geometry
    #[error("Mesh generation failed: {reason}")]
    MeshGeneration { reason: String },

    /// The section solver failed while computing properties or stresses
    #[error("Analysis failed during {stage}: {reason}")]
    Analysis { stage: String, reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create the InvalidInput error raised for an alloy grade missing from the catalog
    pub fn unknown_grade(grade_id: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: "grade".to_string(),
            value: grade_id.into(),
            reason: "Alloy grade not found in catalog".to_string(),
        }
    }

    /// Create a MeshGeneration error
    pub fn mesh_generation(reason: impl Into<String>) -> Self {
        CalcError::MeshGeneration {
            reason: reason.into(),
        }
    }

    /// Create an Analysis error
    pub fn analysis(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Analysis {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// The pipeline never retries, so every variant is terminal for the run.
    pub fn is_recoverable(&self) -> bool {
        false
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MeshGeneration { .. } => "MESH_GENERATION_ERROR",
            CalcError::Analysis { .. } => "ANALYSIS_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Reject non-finite or non-positive values for a named input field.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a positive, finite number",
        ));
    }
    Ok(())
}
