//! Adapters layer: Concrete implementations of ports.
//!
//! - `json`: JSON roster files as a `PatientSource`
//! - `sanitize`: identifier redaction for logs

pub mod json;
pub mod sanitize;

pub use json::{JsonPatientSource, Roster, RosterError};
