//! Turn action dispatcher
//!
//! Each action is a stateless transition `(turn) -> (replies, slot events, audit row)`.
//! The dispatcher persists the audit row after the reply is composed; a failed
//! write is logged and never changes the reply.
//!
//! | action                    | logs                          |
//! |---------------------------|-------------------------------|
//! | action_check_appointment  | always                        |
//! | action_submit_appointment | always                        |
//! | action_doctor_info        | always (including the prompt) |
//! | action_symptom_check      | only when a symptom was given |
//! | action_log_handover       | always                        |
//! | validate_booking_form     | never                         |

use tracing::{debug, error, info};

use crate::core::advisory::advise;
use crate::core::normalize::doctor_key;
use crate::core::{AuditStore, DirectoryClient, SlotValidator};
use crate::types::{
    ActionName, ActionOutcome, DoctorLookup, FormField, LogRecord, SlotEvent, Turn,
};
use crate::{SLOT_DEPARTMENT, SLOT_DOCTOR_NAME, SLOT_PREFERRED_DATE, SLOT_PREFERRED_TIME, SLOT_SYMPTOM};

/// Fixed reply of the appointment check stub
pub const CHECK_APPOINTMENT_REPLY: &str = "You have an appointment with Dr. Sharma on Monday at 10 AM.";

/// Prompt when no doctor name has been given
pub const ASK_DOCTOR_PROMPT: &str = "Which doctor would you like to know about?";

/// Reply when the directory cannot be reached
pub const DOCTOR_LOOKUP_FAILED: &str = "Something went wrong while fetching the doctor info.";

/// Prompt when no symptom entity was extracted
pub const ASK_SYMPTOM_PROMPT: &str = "Please describe your symptom so I can help.";

/// Reply of the human handover
pub const HANDOVER_REPLY: &str = "Connecting you to a human representative...";

/// Runs actions against a turn
#[derive(Debug, Clone)]
pub struct ActionDispatcher {
    directory: DirectoryClient,
    store: AuditStore,
    validator: SlotValidator,
}

impl ActionDispatcher {
    pub fn new(directory: DirectoryClient, store: AuditStore) -> Self {
        Self {
            directory,
            store,
            validator: SlotValidator::new(),
        }
    }

    pub fn store(&self) -> &AuditStore {
        &self.store
    }

    /// Run an action and persist its audit row
    pub async fn dispatch(&self, action: ActionName, turn: &Turn) -> ActionOutcome {
        let outcome = self.run(action, turn).await;
        if let Some(record) = &outcome.record {
            self.persist(action, record);
        }
        info!(
            action = action.name(),
            intent = turn.intent.as_deref().unwrap_or("-"),
            replies = outcome.replies.len(),
            events = outcome.events.len(),
            logged = outcome.record.is_some(),
            "action handled"
        );
        outcome
    }

    /// Run an action without touching the audit log
    pub async fn run(&self, action: ActionName, turn: &Turn) -> ActionOutcome {
        match action {
            ActionName::CheckAppointment => self.check_appointment(turn),
            ActionName::SubmitAppointment => self.submit_appointment(turn),
            ActionName::DoctorInfo => self.doctor_info(turn).await,
            ActionName::SymptomCheck => self.symptom_check(turn),
            ActionName::LogHandover => self.log_handover(turn),
            ActionName::ValidateBookingForm => self.validate_booking_form(turn),
        }
    }

    /// Static stub; no scheduling backend is consulted
    pub fn check_appointment(&self, turn: &Turn) -> ActionOutcome {
        ActionOutcome::reply(CHECK_APPOINTMENT_REPLY).logged(LogRecord::from_turn(turn))
    }

    /// Confirm the booking from the form's slot values
    pub fn submit_appointment(&self, turn: &Turn) -> ActionOutcome {
        let reply = booking_confirmation(
            turn.slot(SLOT_DEPARTMENT),
            turn.slot(SLOT_PREFERRED_DATE),
            turn.slot(SLOT_PREFERRED_TIME),
        );
        ActionOutcome::reply(reply).logged(LogRecord::from_turn(turn))
    }

    /// Ask for a doctor name, or look the named doctor up
    pub async fn doctor_info(&self, turn: &Turn) -> ActionOutcome {
        let record = LogRecord::from_turn(turn);

        let Some(raw) = turn.slot(SLOT_DOCTOR_NAME) else {
            return ActionOutcome::reply(ASK_DOCTOR_PROMPT).logged(record);
        };

        let key = doctor_key(raw);
        let lookup = self.directory.lookup(&key).await;
        debug!(doctor = %key, found = lookup.is_found(), "doctor lookup finished");

        ActionOutcome::reply(doctor_reply(&key, lookup)).logged(record)
    }

    /// Advice for the first symptom mentioned in the message
    pub fn symptom_check(&self, turn: &Turn) -> ActionOutcome {
        match turn.first_entity(SLOT_SYMPTOM) {
            Some(symptom) => ActionOutcome::reply(symptom_reply(symptom)).logged(LogRecord::from_turn(turn)),
            // no symptom: prompt only, no audit row
            None => ActionOutcome::reply(ASK_SYMPTOM_PROMPT),
        }
    }

    /// Hand the conversation to a human
    pub fn log_handover(&self, turn: &Turn) -> ActionOutcome {
        ActionOutcome::reply(HANDOVER_REPLY).logged(LogRecord::from_turn(turn))
    }

    /// Validate the booking form slots proposed during this turn.
    ///
    /// Emits one slot event per validated slot and one reply per rejection.
    pub fn validate_booking_form(&self, turn: &Turn) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();

        for (field, proposed) in slots_to_validate(turn) {
            let result = self.validator.validate_field(field, proposed.as_deref(), turn);
            if let Some(message) = result.rejection_message {
                debug!(slot = field.slot_name(), "slot value rejected");
                outcome.replies.push(message);
            }
            outcome
                .events
                .push(SlotEvent::new(field.slot_name(), result.normalized_value));
        }

        outcome
    }

    fn persist(&self, action: ActionName, record: &LogRecord) {
        match self.store.append(record) {
            Ok(id) => debug!(action = action.name(), id, "audit row written"),
            Err(e) => error!(action = action.name(), error = %e, "audit log append failed"),
        }
    }
}

/// Form slots to validate: those proposed this turn, or else every filled form slot
fn slots_to_validate(turn: &Turn) -> Vec<(FormField, Option<String>)> {
    if !turn.proposed.is_empty() {
        return turn
            .proposed
            .iter()
            .filter_map(|e| FormField::from_slot_name(&e.name).map(|f| (f, e.value.clone())))
            .collect();
    }

    FormField::ALL
        .into_iter()
        .filter_map(|f| turn.slot(f.slot_name()).map(|v| (f, Some(v.to_string()))))
        .collect()
}

/// "Your appointment for {department} has been booked on {date} at {time}."
///
/// Missing values render as "None"; the form guarantees they are filled.
pub fn booking_confirmation(department: Option<&str>, date: Option<&str>, time: Option<&str>) -> String {
    let show = |v: Option<&str>| v.unwrap_or("None").to_string();
    format!(
        "Your appointment for {} has been booked on {} at {}.",
        show(department),
        show(date),
        show(time)
    )
}

/// User-facing text for a lookup outcome. The failure cause is never shown.
pub fn doctor_reply(doctor_key: &str, lookup: DoctorLookup) -> String {
    match lookup {
        DoctorLookup::Found { info } => info,
        DoctorLookup::NotFound => format!("Sorry, I couldn't find details for {doctor_key}."),
        DoctorLookup::Unavailable { .. } => DOCTOR_LOOKUP_FAILED.to_string(),
    }
}

/// "For {symptom}, {advice}"
pub fn symptom_reply(symptom: &str) -> String {
    format!("For {symptom}, {}", advise(symptom))
}

// =============================================================================
// TESTS
// =============================================================================
