use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student snapshot: exam score plus ranked school preferences
///
/// `preferences` is ordered by rank (first entry = first choice) and must
/// not contain duplicates. A matching run never mutates a student; the
/// safety-first strategy returns derived copies instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub score: f64,
    #[serde(default)]
    pub preferences: Vec<u32>,
}

/// A school snapshot: seat capacity only
///
/// Capacity is non-negative by construction; a school with capacity 0 can
/// never hold anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: u32,
    pub capacity: u32,
}

/// Final assignment for one student, `None` means unmatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "studentId")]
    pub student_id: u32,
    #[serde(rename = "schoolId")]
    pub school_id: Option<u32>,
}

/// Allocation policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingAlgorithm {
    /// Irrevocable single-pass merit-order assignment (the "current system")
    Baseline,
    /// Student-proposing deferred acceptance (Gale-Shapley)
    Da,
}

impl fmt::Display for MatchingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingAlgorithm::Baseline => write!(f, "baseline"),
            MatchingAlgorithm::Da => write!(f, "da"),
        }
    }
}

impl FromStr for MatchingAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(MatchingAlgorithm::Baseline),
            "da" => Ok(MatchingAlgorithm::Da),
            other => Err(format!("unknown matching algorithm: {}", other)),
        }
    }
}

/// One recorded event in the chronological execution log of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceAction {
    Propose,
    Hold,
    Reject,
    Finalize,
}

/// Append-only trace entry; order is chronological and significant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub round: u32,
    #[serde(rename = "studentId")]
    pub student_id: u32,
    #[serde(rename = "schoolId")]
    pub school_id: u32,
    pub action: TraceAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Aggregate statistics derived from a set of assignments
///
/// `preference_stats` is 1-indexed by rank conceptually (bucket 0 = first
/// choice) and padded to at least 5 ranks; longer preference lists extend
/// it rather than being truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingSummary {
    #[serde(rename = "totalStudents")]
    pub total_students: usize,
    #[serde(rename = "matchedStudents")]
    pub matched_students: usize,
    #[serde(rename = "unmatchedCount")]
    pub unmatched_count: usize,
    #[serde(rename = "matchRate")]
    pub match_rate: f64,
    #[serde(rename = "preferenceStats")]
    pub preference_stats: Vec<usize>,
    #[serde(rename = "preferenceRates")]
    pub preference_rates: Vec<f64>,
    #[serde(rename = "firstChoiceRate")]
    pub first_choice_rate: f64,
}

/// The sole externally visible artifact of a matching run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingOutcome {
    pub results: Vec<MatchResult>,
    pub summary: MatchingSummary,
    pub trace: Vec<TraceStep>,
}
