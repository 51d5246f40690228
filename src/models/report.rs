use crate::models::{MatchResult, MatchingAlgorithm, MatchingOutcome, Student};
use serde::{Deserialize, Serialize};

/// One row of the per-rank breakdown in a run report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSummaryRow {
    #[serde(rename = "preferenceOrder")]
    pub preference_order: usize,
    #[serde(rename = "matchedCount")]
    pub matched_count: usize,
    #[serde(rename = "matchedRate")]
    pub matched_rate: f64,
}

/// A match result annotated with the 1-based rank of the assigned school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedMatchResult {
    #[serde(rename = "studentId")]
    pub student_id: u32,
    #[serde(rename = "schoolId")]
    pub school_id: Option<u32>,
    #[serde(rename = "matchedPreferenceOrder")]
    pub matched_preference_order: Option<usize>,
}

/// Serialized envelope for one matching run
///
/// What the runner binary prints and what a persistence layer would store:
/// the policy, when the run happened, the outcome and its derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub algorithm: MatchingAlgorithm,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub outcome: MatchingOutcome,
    #[serde(rename = "summaryByPreference")]
    pub summary_by_preference: Vec<PreferenceSummaryRow>,
    pub results: Vec<AnnotatedMatchResult>,
}

impl RunReport {
    /// Build a report from an outcome, resolving ranks against `students`
    pub fn new(
        algorithm: MatchingAlgorithm,
        outcome: MatchingOutcome,
        students: &[Student],
    ) -> Self {
        let summary_by_preference = outcome
            .summary
            .preference_stats
            .iter()
            .enumerate()
            .map(|(index, &count)| PreferenceSummaryRow {
                preference_order: index + 1,
                matched_count: count,
                matched_rate: outcome.summary.preference_rates.get(index).copied().unwrap_or(0.0),
            })
            .collect();

        let results = outcome
            .results
            .iter()
            .map(|result| annotate(result, students))
            .collect();

        Self {
            algorithm,
            generated_at: chrono::Utc::now(),
            outcome,
            summary_by_preference,
            results,
        }
    }
}

fn annotate(result: &MatchResult, students: &[Student]) -> AnnotatedMatchResult {
    let matched_preference_order = result.school_id.and_then(|school_id| {
        students
            .iter()
            .find(|student| student.id == result.student_id)
            .and_then(|student| {
                student.preferences.iter().position(|&id| id == school_id)
            })
            .map(|index| index + 1)
    });

    AnnotatedMatchResult {
        student_id: result.student_id,
        school_id: result.school_id,
        matched_preference_order,
    }
}
