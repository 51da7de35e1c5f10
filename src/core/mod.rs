//! Core modules for Clinicbot

pub mod advisory;
pub mod api;
pub mod directory;
pub mod dispatcher;
pub mod mock_directory;
pub mod normalize;
pub mod store;
pub mod validators;

pub use advisory::{advice_for, advise};
pub use api::{create_router, run_server, ActionError};
pub use directory::{DirectoryClient, LookupError};
pub use dispatcher::ActionDispatcher;
pub use mock_directory::{create_directory_router, run_mock_directory};
pub use normalize::{doctor_key, title_case};
pub use store::{AuditStore, StoreError};
pub use validators::SlotValidator;
