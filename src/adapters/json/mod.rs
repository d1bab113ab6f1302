//! JSON roster adapter: Implementation of PatientSource.
//!
//! Reads a roster document of the form
//!
//! ```json
//! { "patients": [ { "id": "patient-1", "name": "...", "lastVisit": "2024-01-15", "data": { ... } } ] }
//! ```
//!
//! File-backed sources re-read the file on every load, so edits to the
//! roster are picked up without restarting. Nothing is ever written back.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::PatientRecord;
use crate::ports::PatientSource;

/// Error type for roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Failed to read roster {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate patient id: {0}")]
    DuplicateId(String),

    #[error("Patient at position {0} has an empty id")]
    EmptyId(usize),
}

/// On-disk roster document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub patients: Vec<PatientRecord>,
}

impl Roster {
    /// Parse and check a roster document.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or ids are empty or repeated.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RosterError> {
        let roster: Self = serde_json::from_reader(reader)?;
        roster.check_ids()?;
        Ok(roster)
    }

    /// Parse and check a roster document held in memory.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or ids are empty or repeated.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let roster: Self = serde_json::from_str(json)?;
        roster.check_ids()?;
        Ok(roster)
    }

    fn check_ids(&self) -> Result<(), RosterError> {
        let mut seen = HashSet::with_capacity(self.patients.len());
        for (position, record) in self.patients.iter().enumerate() {
            if record.id.trim().is_empty() {
                return Err(RosterError::EmptyId(position));
            }
            if !seen.insert(record.id.as_str()) {
                return Err(RosterError::DuplicateId(record.id.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Backing {
    File(PathBuf),
    Memory(Vec<PatientRecord>),
}

/// Patient source backed by a JSON roster.
#[derive(Debug, Clone)]
pub struct JsonPatientSource {
    backing: Backing,
}

impl JsonPatientSource {
    /// Source that reads the roster file at `path` on each load.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            backing: Backing::File(path.as_ref().to_path_buf()),
        }
    }

    /// In-memory source over an already-parsed roster.
    #[must_use]
    pub fn from_roster(roster: Roster) -> Self {
        Self {
            backing: Backing::Memory(roster.patients),
        }
    }

    /// In-memory source parsed from a JSON string.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or ids are empty or repeated.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        Ok(Self::from_roster(Roster::from_json(json)?))
    }

    /// Path of the backing file, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.backing {
            Backing::File(path) => Some(path),
            Backing::Memory(_) => None,
        }
    }

    fn read_file(path: &Path) -> Result<Roster, RosterError> {
        let file = std::fs::File::open(path).map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Roster::from_reader(std::io::BufReader::new(file))
    }
}

impl PatientSource for JsonPatientSource {
    type Error = RosterError;

    fn load_patients(&self) -> Result<Vec<PatientRecord>, Self::Error> {
        match &self.backing {
            Backing::File(path) => {
                let roster = Self::read_file(path)?;
                tracing::debug!("Loaded {} patients from roster file", roster.patients.len());
                Ok(roster.patients)
            }
            Backing::Memory(patients) => Ok(patients.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ROSTER: &str = r#"{
        "patients": [
            {
                "id": "patient-1",
                "name": "John Smith",
                "lastVisit": "2024-01-15",
                "data": {
                    "age": 65, "gender": "male",
                    "bloodPressureSystolic": 140, "bloodPressureDiastolic": 90,
                    "cholesterolTotal": 250, "cholesterolHDL": 35, "cholesterolLDL": 160,
                    "bmi": 32, "smokingStatus": true, "diabetesStatus": true,
                    "familyHistory": true, "physicalActivity": "low"
                }
            },
            {
                "id": "patient-2",
                "name": "Sarah Johnson",
                "data": {
                    "age": 52, "gender": "female",
                    "bloodPressureSystolic": 130, "bloodPressureDiastolic": 85,
                    "cholesterolTotal": 220, "cholesterolHDL": 45, "cholesterolLDL": 130,
                    "bmi": 28, "smokingStatus": false, "diabetesStatus": false,
                    "familyHistory": true, "physicalActivity": "moderate"
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_roster() {
        let source = JsonPatientSource::from_json(ROSTER).expect("Should parse");
        let patients = source.load_patients().expect("Should load");
        assert_eq!(patients.len(), 2);
        assert_eq!(patients[0].id, "patient-1");
        assert_eq!(
            patients[0].last_visit,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert!(patients[1].last_visit.is_none());
        assert!(source.path().is_none());
    }

    #[test]
    fn test_find_patient() {
        let source = JsonPatientSource::from_json(ROSTER).expect("Should parse");
        let found = source.find_patient("patient-2").expect("Should load");
        assert_eq!(found.map(|r| r.data.age), Some(52));
        assert!(source.find_patient("patient-9").expect("Should load").is_none());
        assert_eq!(source.count_patients().expect("Should count"), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let duplicated = ROSTER.replace("patient-2", "patient-1");
        match JsonPatientSource::from_json(&duplicated) {
            Err(RosterError::DuplicateId(id)) => assert_eq!(id, "patient-1"),
            other => panic!("Expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        let blank = ROSTER.replace("\"patient-2\"", "\"  \"");
        assert!(matches!(
            JsonPatientSource::from_json(&blank),
            Err(RosterError::EmptyId(1))
        ));
    }

    #[test]
    fn test_malformed_roster() {
        assert!(matches!(
            JsonPatientSource::from_json("{\"patients\": [{}]}"),
            Err(RosterError::Parse(_))
        ));
    }

    #[test]
    fn test_file_backed_source_rereads() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let path = dir.path().join("patients.json");
        std::fs::write(&path, r#"{"patients": []}"#).expect("Should write");

        let source = JsonPatientSource::from_path(&path);
        assert_eq!(source.count_patients().expect("Should count"), 0);

        let mut file = std::fs::File::create(&path).expect("Should open");
        file.write_all(ROSTER.as_bytes()).expect("Should write");
        drop(file);

        assert_eq!(source.count_patients().expect("Should count"), 2);
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_file() {
        let source = JsonPatientSource::from_path("/nonexistent/roster.json");
        assert!(matches!(source.load_patients(), Err(RosterError::Io { .. })));
    }
}
