//! Error types for entity policies.

use crate::path::FieldPath;
use thiserror::Error;

/// Why a policy rejected an entity.
///
/// Every message names the offending field, so callers can match on the
/// rendered text as well as on the variant.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The declared `apiVersion` is not recognized for this kind.
    #[error("invalid apiVersion {found} for kind {kind}, expected one of [{}]", .expected.join(", "))]
    InvalidApiVersion {
        kind: String,
        found: String,
        expected: Vec<String>,
    },

    /// The `kind` field does not name the expected kind.
    #[error("invalid kind {found}, expected {expected}")]
    InvalidKind { found: String, expected: String },

    /// A required field is absent.
    #[error("missing required field {path}")]
    MissingField { path: FieldPath },

    /// A field is present but has the wrong JSON type.
    #[error("{path} must be {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    /// A string field is present but empty.
    #[error("{path} must not be empty")]
    EmptyValue { path: FieldPath },

    /// A validated entity could not be decoded into its typed form.
    #[error("failed to decode entity: {0}")]
    Decode(#[from] serde_json::Error),
}

impl PolicyError {
    /// The field the diagnostic is about, when it points at one.
    pub fn path(&self) -> Option<FieldPath> {
        match self {
            Self::InvalidApiVersion { .. } => Some(FieldPath::parse("apiVersion")),
            Self::InvalidKind { .. } => Some(FieldPath::parse("kind")),
            Self::MissingField { path }
            | Self::TypeMismatch { path, .. }
            | Self::EmptyValue { path } => Some(path.clone()),
            Self::Decode(_) => None,
        }
    }
}

/// Result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
