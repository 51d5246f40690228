use crate::core::summary::summarize_results;
use crate::models::{
    MatchResult, MatchingOutcome, School, Student, TraceAction, TraceStep,
};
use std::collections::HashMap;
use tracing::debug;

/// Priority rank per student id: score descending, id ascending
///
/// The same total order the baseline matcher sorts by, so both policies
/// agree on what "higher priority" means.
fn rank_by_priority(students: &[Student]) -> HashMap<u32, usize> {
    let mut sorted: Vec<&Student> = students.iter().collect();
    sorted.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    sorted
        .iter()
        .enumerate()
        .map(|(rank, student)| (student.id, rank))
        .collect()
}

/// Run student-proposing deferred acceptance (Gale-Shapley)
///
/// Produces a stable, student-optimal assignment under score-based school
/// priority. Each round, every still-unmatched student with preferences
/// left proposes to their next choice; the school pools the proposal with
/// its current holds, keeps the top `capacity` by priority and rejects the
/// rest. A previously held student can be displaced mid-run; their
/// `matched_school` reverts to `None` and they keep proposing in later
/// rounds. The loop ends when a full pass produces no proposal, after
/// which every held student is finalized at the final round number.
///
/// Proposals to school ids with no `School` record are rejected with a
/// "no school data" reason rather than failing the run.
pub fn run_student_proposing_da(students: &[Student], schools: &[School]) -> MatchingOutcome {
    let schools_by_id: HashMap<u32, &School> =
        schools.iter().map(|school| (school.id, school)).collect();
    let priority_rank = rank_by_priority(students);

    let mut next_choice_index: HashMap<u32, usize> =
        students.iter().map(|student| (student.id, 0)).collect();
    let mut matched_school: HashMap<u32, Option<u32>> =
        students.iter().map(|student| (student.id, None)).collect();
    let mut holds: HashMap<u32, Vec<u32>> =
        schools.iter().map(|school| (school.id, Vec::new())).collect();
    let mut trace = Vec::new();

    let mut round: u32 = 1;
    let mut progressed = true;

    while progressed {
        progressed = false;
        let mut proposals = 0usize;

        for student in students {
            if matched_school[&student.id].is_some() {
                continue;
            }

            let index = next_choice_index[&student.id];
            if index >= student.preferences.len() {
                continue;
            }

            progressed = true;
            proposals += 1;
            let school_id = student.preferences[index];
            next_choice_index.insert(student.id, index + 1);

            trace.push(TraceStep {
                round,
                student_id: student.id,
                school_id,
                action: TraceAction::Propose,
                reason: Some(format!("applied to preference {}", index + 1)),
            });

            let Some(school) = schools_by_id.get(&school_id) else {
                trace.push(TraceStep {
                    round,
                    student_id: student.id,
                    school_id,
                    action: TraceAction::Reject,
                    reason: Some("no school data".to_string()),
                });
                continue;
            };

            let mut candidates = holds.get(&school_id).cloned().unwrap_or_default();
            candidates.push(student.id);
            candidates.sort_by_key(|id| {
                priority_rank.get(id).copied().unwrap_or(usize::MAX)
            });

            let keep = (school.capacity as usize).min(candidates.len());
            let rejected = candidates.split_off(keep);
            let kept = candidates;

            for &student_id in &kept {
                matched_school.insert(student_id, Some(school_id));
                trace.push(TraceStep {
                    round,
                    student_id,
                    school_id,
                    action: TraceAction::Hold,
                    reason: Some("held within capacity".to_string()),
                });
            }

            for &student_id in &rejected {
                matched_school.insert(student_id, None);
                trace.push(TraceStep {
                    round,
                    student_id,
                    school_id,
                    action: TraceAction::Reject,
                    reason: Some("displaced by higher priority".to_string()),
                });
            }

            holds.insert(school_id, kept);
        }

        debug!(round, proposals, "deferred-acceptance round complete");
        round += 1;
    }

    let results: Vec<MatchResult> = students
        .iter()
        .map(|student| MatchResult {
            student_id: student.id,
            school_id: matched_school[&student.id],
        })
        .collect();

    for result in &results {
        if let Some(school_id) = result.school_id {
            trace.push(TraceStep {
                round,
                student_id: result.student_id,
                school_id,
                action: TraceAction::Finalize,
                reason: Some("final assignment".to_string()),
            });
        }
    }

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
    fn test_displacement_reverts_held_student() {
        // Student 2 is held at school 1 in round 1, then pushed out when
        // the higher-scoring student 1 proposes there too.
        let students = vec![
            student(2, 80.0, vec![1]),
            student(1, 90.0, vec![1]),
        ];
        let schools = vec![school(1, 1)];

        let outcome = run_student_proposing_da(&students, &schools);

        assert_eq!(assignment(&outcome, 1), Some(1));
        assert_eq!(assignment(&outcome, 2), None);
        assert!(outcome.trace.iter().any(|step| {
            step.student_id == 2 && step.action == TraceAction::Reject
        }));
    }

    #[test]
    fn test_displaced_student_proposes_again() {
        let students = vec![
            student(1, 90.0, vec![1, 2]),
            student(2, 80.0, vec![1, 2]),
        ];
        let schools = vec![school(1, 1), school(2, 1)];

        let outcome = run_student_proposing_da(&students, &schools);

        assert_eq!(assignment(&outcome, 1), Some(1));
        assert_eq!(assignment(&outcome, 2), Some(2));
    }

    #[test]
    fn test_capacity_is_respected() {
        let students = vec![
            student(1, 90.0, vec![1, 2]),
            student(2, 80.0, vec![1, 2]),
            student(3, 70.0, vec![2, 1]),
        ];
        let schools = vec![school(1, 1), school(2, 2)];

        let outcome = run_student_proposing_da(&students, &schools);

        for s in &schools {
            let assigned = outcome
                .results
                .iter()
                .filter(|r| r.school_id == Some(s.id))
                .count();
            assert!(assigned <= s.capacity as usize);
        }
        assert!(outcome.trace.iter().any(|step| step.action == TraceAction::Hold));
    }

    #[test]
    fn test_unknown_school_rejects_with_reason() {
        let students = vec![student(1, 90.0, vec![99])];
        let schools = vec![school(1, 1)];

        let outcome = run_student_proposing_da(&students, &schools);

        assert_eq!(assignment(&outcome, 1), None);
        let reject = outcome
            .trace
            .iter()
            .find(|step| step.action == TraceAction::Reject)
            .unwrap();
        assert_eq!(reject.school_id, 99);
        assert_eq!(reject.reason.as_deref(), Some("no school data"));
    }

    #[test]
    fn test_zero_capacity_school_never_holds() {
        let students = vec![student(1, 90.0, vec![1])];
        let schools = vec![school(1, 0)];

        let outcome = run_student_proposing_da(&students, &schools);

        assert_eq!(assignment(&outcome, 1), None);
        assert!(!outcome.trace.iter().any(|step| step.action == TraceAction::Hold));
    }

    #[test]
    fn test_finalize_steps_use_final_round() {
        let students = vec![student(1, 90.0, vec![1])];
        let schools = vec![school(1, 1)];

        let outcome = run_student_proposing_da(&students, &schools);

        let max_round = outcome.trace.iter().map(|step| step.round).max().unwrap();
        let finalize: Vec<_> = outcome
            .trace
            .iter()
            .filter(|step| step.action == TraceAction::Finalize)
            .collect();
        assert_eq!(finalize.len(), 1);
        assert_eq!(finalize[0].round, max_round);
    }

    #[test]
    fn test_empty_inputs_return_empty_outcome() {
        let outcome = run_student_proposing_da(&[], &[]);

        assert!(outcome.results.is_empty());
        assert!(outcome.trace.is_empty());
        assert_eq!(outcome.summary.total_students, 0);
    }
}
