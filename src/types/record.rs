//! Audit log record - one row per handled action

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::types::Turn;
use crate::{SLOT_DEPARTMENT, SLOT_DOCTOR_NAME, SLOT_PREFERRED_DATE, SLOT_PREFERRED_TIME, SLOT_SYMPTOM};

/// Timestamp layout stored in the `timestamp` column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One audit row. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Local time the action ran
    pub timestamp: String,
    pub intent: Option<String>,
    pub user_message: Option<String>,
    pub department: Option<String>,
    /// `preferred_date` slot
    pub date: Option<String>,
    /// `preferred_time` slot
    pub time: Option<String>,
    /// `doctor_name` slot
    pub doctor: Option<String>,
    pub symptom: Option<String>,
}

impl LogRecord {
    /// Snapshot a turn now
    pub fn from_turn(turn: &Turn) -> Self {
        Self::from_turn_at(turn, Local::now())
    }

    /// Snapshot a turn at a given time
    pub fn from_turn_at(turn: &Turn, at: DateTime<Local>) -> Self {
        let slot = |name: &str| turn.slot(name).map(str::to_string);
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            intent: turn.intent.clone(),
            user_message: turn.text.clone(),
            department: slot(SLOT_DEPARTMENT),
            date: slot(SLOT_PREFERRED_DATE),
            time: slot(SLOT_PREFERRED_TIME),
            doctor: slot(SLOT_DOCTOR_NAME),
            symptom: slot(SLOT_SYMPTOM),
        }
    }
}

/// A record as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    #[serde(flatten)]
    pub record: LogRecord,
}
