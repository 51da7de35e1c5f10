//! Action names and action outcomes

use serde::{Deserialize, Serialize};

use crate::types::LogRecord;

/// Every action the server registers with the dialogue engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    /// Static "you have an appointment" stub
    CheckAppointment,
    /// Confirm the filled booking form
    SubmitAppointment,
    /// Look a doctor up in the directory
    DoctorInfo,
    /// Advice for the first mentioned symptom
    SymptomCheck,
    /// Hand the conversation to a human
    LogHandover,
    /// Validate booking form slots as they are filled
    ValidateBookingForm,
}

impl ActionName {
    pub const ALL: [ActionName; 6] = [
        ActionName::CheckAppointment,
        ActionName::SubmitAppointment,
        ActionName::DoctorInfo,
        ActionName::SymptomCheck,
        ActionName::LogHandover,
        ActionName::ValidateBookingForm,
    ];

    /// Name registered in the assistant's domain
    pub fn name(&self) -> &'static str {
        match self {
            Self::CheckAppointment => "action_check_appointment",
            Self::SubmitAppointment => "action_submit_appointment",
            Self::DoctorInfo => "action_doctor_info",
            Self::SymptomCheck => "action_symptom_check",
            Self::LogHandover => "action_log_handover",
            Self::ValidateBookingForm => "validate_booking_form",
        }
    }

    /// Resolve a registered name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl std::fmt::Display for ActionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Session mutation: set (or clear) one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotEvent {
    pub name: String,
    pub value: Option<String>,
}

impl SlotEvent {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// What one action produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Messages for the user, in order
    pub replies: Vec<String>,
    /// Slot mutations for the session
    pub events: Vec<SlotEvent>,
    /// Audit row to persist, if this action logs
    pub record: Option<LogRecord>,
}

impl ActionOutcome {
    /// Single reply, nothing logged
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            replies: vec![text.into()],
            ..Self::default()
        }
    }

    /// Attach the audit row
    pub fn logged(mut self, record: LogRecord) -> Self {
        self.record = Some(record);
        self
    }

    /// First reply, if any
    pub fn reply_text(&self) -> Option<&str> {
        self.replies.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_resolve() {
        for action in ActionName::ALL {
            assert_eq!(ActionName::from_name(action.name()), Some(action));
        }
        assert_eq!(ActionName::from_name("action_unknown"), None);
    }

    #[test]
    fn test_reply_has_no_record() {
        let outcome = ActionOutcome::reply("hello");
        assert_eq!(outcome.reply_text(), Some("hello"));
        assert!(outcome.record.is_none());
        assert!(outcome.events.is_empty());
    }
}
