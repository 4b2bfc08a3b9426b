//! Error type shared by the fallible geometry helpers.
//!
//! Most operations in this crate are total: absence is reported with `Option`
//! and degenerate geometry is skipped under an epsilon gate. `GeomError` is only
//! used where a silent answer would be wrong (e.g. curvature of coincident points).

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Input points are too close to each other for the requested quantity.
    DegeneratePoints { reason: String },
    /// Parameters outside the accepted domain (e.g. vertex count below 3).
    InvalidParams { reason: String },
}

impl GeomError {
    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegeneratePoints {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegeneratePoints { reason } => write!(f, "degenerate points: {reason}"),
            Self::InvalidParams { reason } => write!(f, "invalid params: {reason}"),
        }
    }
}

impl std::error::Error for GeomError {}
