use crate::core::generate_random_scores;
use crate::models::{School, Student};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised at the dataset boundary
///
/// The matching core itself never fails for well-formed input; contract
/// violations are rejected here, before any engine code runs.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate student id {0}")]
    DuplicateStudent(u32),

    #[error("Duplicate school id {0}")]
    DuplicateSchool(u32),

    #[error("Student {student_id} lists school {school_id} more than once")]
    DuplicatePreference { student_id: u32, school_id: u32 },

    #[error("Student {student_id} has a non-finite score")]
    NonFiniteScore { student_id: u32 },
}

/// Raw student row as stored in a dataset file
///
/// `score` may be absent; real exam results take precedence, and a
/// dataset with no scores at all gets seeded pseudo-random ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: u32,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub preferences: Vec<u32>,
}

/// In-memory snapshot of one admissions dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub students: Vec<StudentRecord>,
    pub schools: Vec<School>,
}

impl Dataset {
    /// Load and validate a dataset from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path)?;
        let dataset: Dataset = serde_json::from_str(&raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the caller-contract invariants the engine does not re-check
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut student_ids = HashSet::new();
        for record in &self.students {
            if !student_ids.insert(record.id) {
                return Err(DatasetError::DuplicateStudent(record.id));
            }

            if let Some(score) = record.score {
                if !score.is_finite() {
                    return Err(DatasetError::NonFiniteScore { student_id: record.id });
                }
            }

            let mut seen = HashSet::new();
            for &school_id in &record.preferences {
                if !seen.insert(school_id) {
                    return Err(DatasetError::DuplicatePreference {
                        student_id: record.id,
                        school_id,
                    });
                }
            }
        }

        let mut school_ids = HashSet::new();
        for school in &self.schools {
            if !school_ids.insert(school.id) {
                return Err(DatasetError::DuplicateSchool(school.id));
            }
        }

        // Unknown references are legal - the engine auto-rejects them -
        // but worth surfacing.
        for record in &self.students {
            for &school_id in &record.preferences {
                if !school_ids.contains(&school_id) {
                    warn!(
                        student_id = record.id,
                        school_id, "preference references a school with no record"
                    );
                }
            }
        }

        Ok(())
    }

    /// Resolve student rows into engine inputs
    ///
    /// When no row carries a score, all scores are generated from `seed`
    /// (e.g. the session id) so repeated policy comparisons on the same
    /// dataset see identical scores. When only some rows lack a score,
    /// those default to 0.
    pub fn resolve_students(&self, min: i64, max: i64, seed: u64) -> Vec<Student> {
        let generated = if self.students.iter().all(|record| record.score.is_none()) {
            let ids: Vec<u32> = self.students.iter().map(|record| record.id).collect();
            debug!(students = ids.len(), seed, "no stored scores, generating");
            generate_random_scores(&ids, min, max, seed)
        } else {
            Default::default()
        };

        self.students
            .iter()
            .map(|record| Student {
                id: record.id,
                score: record
                    .score
                    .or_else(|| generated.get(&record.id).map(|&score| score as f64))
                    .unwrap_or(0.0),
                preferences: record.preferences.clone(),
            })
            .collect()
    }
}
