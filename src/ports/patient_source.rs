//! Patient source port: Trait for loading patient records.
//!
//! This trait abstracts where roster data comes from (a JSON file, an
//! in-memory fixture, a form) from the assessment logic.

use crate::domain::PatientRecord;

/// Read-only source of patient records.
pub trait PatientSource: Send + Sync {
    /// Error type for load operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load every patient, in roster order.
    ///
    /// # Errors
    /// Returns error if the underlying source cannot be read or parsed.
    fn load_patients(&self) -> Result<Vec<PatientRecord>, Self::Error>;

    /// Find one patient by roster id.
    ///
    /// # Returns
    /// `None` if no patient has that id.
    ///
    /// # Errors
    /// Returns error if the underlying source cannot be read or parsed.
    fn find_patient(&self, id: &str) -> Result<Option<PatientRecord>, Self::Error> {
        Ok(self
            .load_patients()?
            .into_iter()
            .find(|record| record.id == id))
    }

    /// Number of patients in the source.
    ///
    /// # Errors
    /// Returns error if the underlying source cannot be read or parsed.
    fn count_patients(&self) -> Result<usize, Self::Error> {
        Ok(self.load_patients()?.len())
    }
}
