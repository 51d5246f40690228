// Model exports
pub mod domain;
pub mod report;

pub use domain::{
    MatchResult, MatchingAlgorithm, MatchingOutcome, MatchingSummary, School, Student,
    TraceAction, TraceStep,
};
pub use report::{AnnotatedMatchResult, PreferenceSummaryRow, RunReport};
