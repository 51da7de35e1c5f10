//! Booking form slots and validation results

use serde::{Deserialize, Serialize};

use crate::types::Turn;
use crate::{SLOT_DEPARTMENT, SLOT_PREFERRED_DATE, SLOT_PREFERRED_TIME};

/// The fields of the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Department,
    PreferredDate,
    PreferredTime,
}

impl FormField {
    /// All required fields, in the order the form asks for them
    pub const ALL: [FormField; 3] = [
        FormField::Department,
        FormField::PreferredDate,
        FormField::PreferredTime,
    ];

    /// Slot name as declared in the domain
    pub fn slot_name(&self) -> &'static str {
        match self {
            FormField::Department => SLOT_DEPARTMENT,
            FormField::PreferredDate => SLOT_PREFERRED_DATE,
            FormField::PreferredTime => SLOT_PREFERRED_TIME,
        }
    }

    /// Parse a slot name; `None` for slots outside the form
    pub fn from_slot_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.slot_name() == name)
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slot_name())
    }
}

/// Outcome of validating one proposed slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub accepted: bool,
    /// Value to store in the slot; `None` clears it
    pub normalized_value: Option<String>,
    /// Message to show the user when rejected
    pub rejection_message: Option<String>,
}

impl ValidationResult {
    /// Accept, storing `value` as-is
    pub fn accept(value: Option<String>) -> Self {
        Self {
            accepted: true,
            normalized_value: value,
            rejection_message: None,
        }
    }

    /// Reject, clearing the slot
    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            normalized_value: None,
            rejection_message: Some(message.into()),
        }
    }
}

/// One named field of the booking form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSlot {
    pub field: FormField,
    pub current_value: Option<String>,
}

impl FormSlot {
    pub fn name(&self) -> &'static str {
        self.field.slot_name()
    }

    pub fn is_filled(&self) -> bool {
        self.current_value.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Multi-turn booking form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    slots: Vec<FormSlot>,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingForm {
    /// Start an empty form
    pub fn new() -> Self {
        Self {
            slots: FormField::ALL
                .into_iter()
                .map(|field| FormSlot { field, current_value: None })
                .collect(),
        }
    }

    /// Read the form's current values from a turn's slots
    pub fn from_turn(turn: &Turn) -> Self {
        let mut form = Self::new();
        for slot in &mut form.slots {
            slot.current_value = turn.slot(slot.field.slot_name()).map(str::to_string);
        }
        form
    }

    /// Current value of a field
    pub fn value(&self, field: FormField) -> Option<&str> {
        self.slot(field).and_then(|s| s.current_value.as_deref())
    }

    /// Store a validation result into the form
    pub fn apply(&mut self, field: FormField, result: &ValidationResult) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.field == field) {
            slot.current_value = result.normalized_value.clone();
        }
    }

    /// True when every required field is filled
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(FormSlot::is_filled)
    }

    /// Fields still waiting for a value
    pub fn missing(&self) -> Vec<FormField> {
        self.slots
            .iter()
            .filter(|s| !s.is_filled())
            .map(|s| s.field)
            .collect()
    }

    pub fn slots(&self) -> &[FormSlot] {
        &self.slots
    }

    fn slot(&self, field: FormField) -> Option<&FormSlot> {
        self.slots.iter().find(|s| s.field == field)
    }
}
