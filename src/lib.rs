//! Clinicbot: action server for a hospital appointment assistant
//!
//! The dialogue engine classifies the user's message and calls a named action here.
//! Actions validate booking-form slots, answer symptom questions, look doctors up in
//! an external directory and append one audit row per handled turn.

pub mod config;
pub mod core;
pub mod types;

// =============================================================================
// SLOT NAMES - as declared in the assistant's domain
// =============================================================================

/// Booking form: department to book with
pub const SLOT_DEPARTMENT: &str = "department";

/// Booking form: requested day
pub const SLOT_PREFERRED_DATE: &str = "preferred_date";

/// Booking form: requested time of day
pub const SLOT_PREFERRED_TIME: &str = "preferred_time";

/// Doctor the user asked about
pub const SLOT_DOCTOR_NAME: &str = "doctor_name";

/// Symptom the user described (also extracted as an entity)
pub const SLOT_SYMPTOM: &str = "symptom";

// =============================================================================
// DEFAULTS [C]
// =============================================================================

/// Hard bound on one doctor directory request (milliseconds)
pub const LOOKUP_TIMEOUT_MS: u64 = 5000;

/// Directory service base address when `DOCTOR_API_BASE` is unset
pub const DEFAULT_DIRECTORY_URL: &str = "http://host.docker.internal:8000";

/// Audit database location when `DB_PATH` is unset
pub const DEFAULT_DB_PATH: &str = "user_logs.db";

/// Action server bind address (the dialogue engine's conventional action port)
pub const DEFAULT_ACTION_ADDR: &str = "0.0.0.0:5055";

/// Mock directory bind address
pub const DEFAULT_DIRECTORY_ADDR: &str = "127.0.0.1:8000";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
