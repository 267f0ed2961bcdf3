//! Structured error types shared across geogram crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`GeogramError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, dimensions, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the geogram engine.
///
/// Every variant is unrecoverable for the operation that produced it; callers
/// decide whether to retry with different input or configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum GeogramError {
    /// Vertex widths, edge endpoints or segment shapes disagree with the declared layout.
    #[error("shape error: {0}")]
    Shape(ErrorInfo),
    /// Geometry that cannot be normalised (for example a zero scale factor).
    #[error("geometry error: {0}")]
    Geometry(ErrorInfo),
    /// A configuration or code path that is declared but not implemented.
    #[error("unsupported: {0}")]
    Unsupported(ErrorInfo),
    /// An internal invariant of the induction engine was violated.
    #[error("invariant violated: {0}")]
    Invariant(ErrorInfo),
    /// Serialization, schema and file I/O errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl GeogramError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            GeogramError::Shape(info)
            | GeogramError::Geometry(info)
            | GeogramError::Unsupported(info)
            | GeogramError::Invariant(info)
            | GeogramError::Serde(info) => info,
        }
    }

    /// Shorthand for a [`GeogramError::Shape`] error.
    pub fn shape(code: impl Into<String>, message: impl Into<String>) -> Self {
        GeogramError::Shape(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GeogramError::Geometry`] error.
    pub fn geometry(code: impl Into<String>, message: impl Into<String>) -> Self {
        GeogramError::Geometry(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GeogramError::Unsupported`] error.
    pub fn unsupported(code: impl Into<String>, message: impl Into<String>) -> Self {
        GeogramError::Unsupported(ErrorInfo::new(code, message))
    }

    /// Shorthand for a [`GeogramError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        GeogramError::Serde(ErrorInfo::new(code, message))
    }

    /// Adds a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            GeogramError::Shape(info) => GeogramError::Shape(info.with_context(key, value)),
            GeogramError::Geometry(info) => GeogramError::Geometry(info.with_context(key, value)),
            GeogramError::Unsupported(info) => {
                GeogramError::Unsupported(info.with_context(key, value))
            }
            GeogramError::Invariant(info) => GeogramError::Invariant(info.with_context(key, value)),
            GeogramError::Serde(info) => GeogramError::Serde(info.with_context(key, value)),
        }
    }

    /// Sets a remediation hint regardless of the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            GeogramError::Shape(info) => GeogramError::Shape(info.with_hint(hint)),
            GeogramError::Geometry(info) => GeogramError::Geometry(info.with_hint(hint)),
            GeogramError::Unsupported(info) => GeogramError::Unsupported(info.with_hint(hint)),
            GeogramError::Invariant(info) => GeogramError::Invariant(info.with_hint(hint)),
            GeogramError::Serde(info) => GeogramError::Serde(info.with_hint(hint)),
        }
    }

    /// Returns whether the error stems from degenerate geometry during normalisation.
    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(self, GeogramError::Geometry(info) if info.code == DEGENERATE_GEOMETRY)
    }
}

/// Error code reported when a candidate has a zero normalisation scale.
pub const DEGENERATE_GEOMETRY: &str = "degenerate-geometry";
