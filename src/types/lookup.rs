//! Doctor directory lookup outcome

use serde::{Deserialize, Serialize};

/// Tagged result of one directory lookup. Transport failures never escape as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DoctorLookup {
    /// Directory knows the doctor
    Found { info: String },
    /// Directory answered 404
    NotFound,
    /// Timeout, transport error, unexpected status or malformed body.
    /// `reason` is for operators only.
    Unavailable { reason: String },
}

impl DoctorLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, DoctorLookup::Found { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, DoctorLookup::Unavailable { .. })
    }
}
