//! Admit Algo - school-assignment matching engine
//!
//! This library converts per-student ranked preference lists and
//! per-school capacities into an assignment under two interchangeable
//! allocation policies: a merit-order baseline modeling the current
//! single-shot system, and student-proposing deferred acceptance
//! (Gale-Shapley). Every run emits a step-by-step execution trace suitable
//! for visualization, and a safety-first preference-truncation transform
//! models risk-averse student behavior for policy comparison.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    apply_safety_first_strategy, generate_random_scores, run_matching, summarize_results,
};
pub use crate::models::{
    MatchResult, MatchingAlgorithm, MatchingOutcome, MatchingSummary, RunReport, School,
    Student, TraceAction, TraceStep,
};
pub use crate::services::{Dataset, DatasetError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let scores = generate_random_scores(&[1, 2, 3], 0, 100, 7);
        assert_eq!(scores.len(), 3);
    }
}
