use crate::core::summary::summarize_results;
use crate::models::{
    MatchResult, MatchingOutcome, School, Student, TraceAction, TraceStep,
};
use std::collections::HashMap;
use tracing::debug;

/// Run the baseline merit-order assignment (the "current system" model)
///
/// Students are processed once in priority order (score descending, id
/// ascending as tie-break) and walk their preference lists top-down; the
/// first school with a free seat takes them permanently. A later student
/// can never displace an earlier one, which is what makes this policy
/// non-stable in general - the property the deferred-acceptance run is
/// compared against.
///
/// Every step is reported as round 1 since there is no multi-round
/// negotiation. Exhausting a preference list leaves the student unmatched
/// without a trace step of its own.
pub fn run_baseline_matching(students: &[Student], schools: &[School]) -> MatchingOutcome {
    let mut sorted_students: Vec<&Student> = students.iter().collect();
    sorted_students.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut remaining_capacity: HashMap<u32, u32> = schools
        .iter()
        .map(|school| (school.id, school.capacity))
        .collect();

    let mut results = Vec::with_capacity(students.len());
    let mut trace = Vec::new();

    for student in sorted_students {
        let mut matched_school_id = None;

        for &school_id in &student.preferences {
            trace.push(TraceStep {
                round: 1,
                student_id: student.id,
                school_id,
                action: TraceAction::Propose,
                reason: Some("applied in preference order".to_string()),
            });

            // Unknown school ids behave as zero remaining capacity.
            let remaining = remaining_capacity.get(&school_id).copied().unwrap_or(0);
            if remaining > 0 {
                remaining_capacity.insert(school_id, remaining - 1);
                matched_school_id = Some(school_id);
                trace.push(TraceStep {
                    round: 1,
                    student_id: student.id,
                    school_id,
                    action: TraceAction::Finalize,
                    reason: Some("seat available".to_string()),
                });
                break;
            }

            trace.push(TraceStep {
                round: 1,
                student_id: student.id,
                school_id,
                action: TraceAction::Reject,
                reason: Some("capacity full".to_string()),
            });
        }

        results.push(MatchResult {
            student_id: student.id,
            school_id: matched_school_id,
        });
    }

    debug!(
        students = students.len(),
        matched = results.iter().filter(|r| r.school_id.is_some()).count(),
        "baseline matching finished"
    );

    MatchingOutcome {
        summary: summarize_results(&results, students),
        results,
        trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: u32, score: f64, preferences: Vec<u32>) -> Student {
        Student { id, score, preferences }
    }

    fn school(id: u32, capacity: u32) -> School {
        School { id, capacity }
    }

    fn assignment(outcome: &MatchingOutcome, student_id: u32) -> Option<u32> {
        outcome
            .results
            .iter()
            .find(|r| r.student_id == student_id)
            .and_then(|r| r.school_id)
    }

    #[test]
    fn test_merit_order_assignment() {
        let students = vec![
            student(1, 90.0, vec![1, 2]),
            student(2, 80.0, vec![1, 2]),
            student(3, 70.0, vec![2, 1]),
        ];
        let schools = vec![school(1, 1), school(2, 2)];

        let outcome = run_baseline_matching(&students, &schools);

        assert_eq!(assignment(&outcome, 1), Some(1));
        assert_eq!(assignment(&outcome, 2), Some(2));
        assert_eq!(assignment(&outcome, 3), Some(2));
        assert_eq!(outcome.summary.matched_students, 3);
    }

    #[test]
    fn test_ties_break_by_ascending_id() {
        let students = vec![student(9, 80.0, vec![1]), student(2, 80.0, vec![1])];
        let schools = vec![school(1, 1)];

        let outcome = run_baseline_matching(&students, &schools);

        assert_eq!(assignment(&outcome, 2), Some(1));
        assert_eq!(assignment(&outcome, 9), None);
    }

    #[test]
    fn test_assignment_is_irrevocable() {
        // Student 2 takes the only seat at school 1 before student 3 is
        // processed, even though student 3 ranks it first as well; no
        // displacement ever happens in this policy.
        let students = vec![
            student(2, 80.0, vec![1]),
            student(3, 70.0, vec![1, 2]),
        ];
        let schools = vec![school(1, 1), school(2, 1)];

        let outcome = run_baseline_matching(&students, &schools);

        assert_eq!(assignment(&outcome, 2), Some(1));
        assert_eq!(assignment(&outcome, 3), Some(2));
    }

    #[test]
    fn test_exhausted_list_leaves_student_unmatched() {
        let students = vec![student(1, 90.0, vec![1]), student(2, 50.0, vec![1])];
        let schools = vec![school(1, 1)];

        let outcome = run_baseline_matching(&students, &schools);

        assert_eq!(assignment(&outcome, 2), None);
        // One propose + one reject for the loser, nothing more.
        let steps_for_2: Vec<_> = outcome
            .trace
            .iter()
            .filter(|step| step.student_id == 2)
            .collect();
        assert_eq!(steps_for_2.len(), 2);
        assert_eq!(steps_for_2[0].action, TraceAction::Propose);
        assert_eq!(steps_for_2[1].action, TraceAction::Reject);
    }

    #[test]
    fn test_unknown_school_is_rejected_and_skipped() {
        let students = vec![student(1, 90.0, vec![99, 1])];
        let schools = vec![school(1, 1)];

        let outcome = run_baseline_matching(&students, &schools);

        assert_eq!(assignment(&outcome, 1), Some(1));
        assert!(outcome
            .trace
            .iter()
            .any(|step| step.school_id == 99 && step.action == TraceAction::Reject));
    }

    #[test]
    fn test_all_steps_are_round_one() {
        let students = vec![student(1, 90.0, vec![1, 2]), student(2, 80.0, vec![1, 2])];
        let schools = vec![school(1, 1), school(2, 1)];

        let outcome = run_baseline_matching(&students, &schools);

        assert!(outcome.trace.iter().all(|step| step.round == 1));
    }
}
