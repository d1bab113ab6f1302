//! Ports layer: Trait definitions for external operations.
//!
//! The scoring core never reads input itself; callers hand it a
//! `PatientData`. These traits define how the application layer obtains
//! those records.

mod patient_source;

pub use patient_source::PatientSource;
