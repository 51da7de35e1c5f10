//! Slot validators for the booking form
//!
//! - department: case-insensitive member of a fixed set, original casing kept
//! - preferred_date / preferred_time: accepted unchanged
//!
//! Validators only propose values. Writing them into the session is the
//! dispatcher's job.

use crate::core::normalize::title_case;
use crate::types::{BookingForm, FormField, Turn, ValidationResult};

/// Departments that can be booked
pub const DEPARTMENTS: [&str; 5] = [
    "cardiology",
    "neurology",
    "dermatology",
    "orthopedics",
    "pediatrics",
];

/// Form slot validator
#[derive(Debug, Default, Clone, Copy)]
pub struct SlotValidator;

impl SlotValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a proposed value for `slot_name`.
    ///
    /// Slots outside the booking form pass through unchanged.
    pub fn validate(&self, slot_name: &str, proposed: Option<&str>, turn: &Turn) -> ValidationResult {
        match FormField::from_slot_name(slot_name) {
            Some(field) => self.validate_field(field, proposed, turn),
            None => ValidationResult::accept(proposed.map(str::to_string)),
        }
    }

    /// Validate a proposed value for a known form field
    pub fn validate_field(&self, field: FormField, proposed: Option<&str>, _turn: &Turn) -> ValidationResult {
        match field {
            FormField::Department => validate_department(proposed),
            // No calendar parsing yet; any value is taken as given
            FormField::PreferredDate | FormField::PreferredTime => {
                ValidationResult::accept(proposed.map(str::to_string))
            }
        }
    }

    /// Validate and store into the form in one step
    pub fn validate_into(
        &self,
        form: &mut BookingForm,
        field: FormField,
        proposed: Option<&str>,
        turn: &Turn,
    ) -> ValidationResult {
        let result = self.validate_field(field, proposed, turn);
        form.apply(field, &result);
        result
    }
}

fn validate_department(proposed: Option<&str>) -> ValidationResult {
    match proposed {
        Some(value) if is_department(value) => ValidationResult::accept(Some(value.to_string())),
        _ => ValidationResult::reject(department_rejection()),
    }
}

/// Case-insensitive membership in [`DEPARTMENTS`]
pub fn is_department(value: &str) -> bool {
    let lower = value.to_lowercase();
    DEPARTMENTS.iter().any(|d| *d == lower)
}

/// "Sorry, we don't have that department. Please choose from A, B, ..., or E."
pub fn department_rejection() -> String {
    let names: Vec<String> = DEPARTMENTS.iter().map(|d| title_case(d)).collect();
    let choices = match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {}", rest.join(", "), last),
        Some((last, _)) => last.clone(),
        None => String::new(),
    };
    format!("Sorry, we don't have that department. Please choose from {choices}.")
}

// =============================================================================
// TESTS
// =============================================================================
