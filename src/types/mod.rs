//! Core types for Clinicbot

mod action;
mod form;
mod lookup;
mod record;
mod turn;

pub use action::{ActionName, ActionOutcome, SlotEvent};
pub use form::{BookingForm, FormField, FormSlot, ValidationResult};
pub use lookup::DoctorLookup;
pub use record::{LogRecord, StoredRecord, TIMESTAMP_FORMAT};
pub use turn::{Entity, Turn};
