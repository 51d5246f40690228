use crate::core::{baseline::run_baseline_matching, da::run_student_proposing_da};
use crate::models::{MatchingAlgorithm, MatchingOutcome, School, Student};
use tracing::info;

/// Run a matching under the selected allocation policy
///
/// Pure dispatch: `Da` routes straight to deferred acceptance on the given
/// students (no strategy transform - DA is strategy-proof, so truncating
/// lists there would be a bug); `Baseline` routes straight to the
/// merit-order pass. Callers wanting a "realistic current system"
/// comparison pre-apply `apply_safety_first_strategy` before calling with
/// `Baseline`. Keeping the transform outside the dispatcher keeps both
/// matchers composable and independently testable.
///
/// # Arguments
/// * `algorithm` - Allocation policy selector
/// * `students` - Student snapshots, immutable during the run
/// * `schools` - School snapshots, immutable during the run
///
/// # Returns
/// MatchingOutcome with assignments, summary and the chronological trace
pub fn run_matching(
    algorithm: MatchingAlgorithm,
    students: &[Student],
    schools: &[School],
) -> MatchingOutcome {
    info!(
        %algorithm,
        students = students.len(),
        schools = schools.len(),
        "running matching"
    );

    match algorithm {
        MatchingAlgorithm::Baseline => run_baseline_matching(students, schools),
        MatchingAlgorithm::Da => run_student_proposing_da(students, schools),
    }
}
