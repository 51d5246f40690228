use crate::models::{MatchResult, MatchingSummary, Student};
use std::collections::HashMap;

/// Minimum number of preference-rank buckets in a summary
///
/// Historical five-choice convention; longer preference lists extend the
/// buckets beyond this floor instead of being truncated.
const MIN_PREFERENCE_BUCKETS: usize = 5;

/// Aggregate a set of assignments into match-rate and rank statistics
///
/// Pure function: ranks are looked up in the `students` passed in, so a
/// caller summarizing a baseline-with-strategy run should pass the
/// original, untruncated students to report ranks against real wishes.
///
/// # Arguments
/// * `results` - One assignment per student
/// * `students` - The students the ranks are resolved against
///
/// # Returns
/// MatchingSummary with counts and percentage rates (0 when no students)
pub fn summarize_results(results: &[MatchResult], students: &[Student]) -> MatchingSummary {
    let total_students = results.len();
    let matched_students = results.iter().filter(|r| r.school_id.is_some()).count();
    let unmatched_count = total_students - matched_students;
    let match_rate = if total_students > 0 {
        matched_students as f64 / total_students as f64 * 100.0
    } else {
        0.0
    };

    let longest_preferences = students
        .iter()
        .map(|student| student.preferences.len())
        .max()
        .unwrap_or(0);
    let bucket_count = longest_preferences.max(MIN_PREFERENCE_BUCKETS);
    let mut preference_stats = vec![0usize; bucket_count];

    let students_by_id: HashMap<u32, &Student> =
        students.iter().map(|student| (student.id, student)).collect();

    for result in results {
        let Some(school_id) = result.school_id else {
            continue;
        };
        let Some(student) = students_by_id.get(&result.student_id) else {
            continue;
        };

        if let Some(rank) = student.preferences.iter().position(|&id| id == school_id) {
            preference_stats[rank] += 1;
        }
    }

    let preference_rates: Vec<f64> = preference_stats
        .iter()
        .map(|&count| {
            if total_students > 0 {
                count as f64 / total_students as f64 * 100.0
            } else {
                0.0
            }
        })
        .collect();

    let first_choice_rate = preference_rates.first().copied().unwrap_or(0.0);

    MatchingSummary {
        total_students,
        matched_students,
        unmatched_count,
        match_rate,
        preference_stats,
        preference_rates,
        first_choice_rate,
    }
}
