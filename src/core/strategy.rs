use crate::models::{School, Student};
use std::collections::HashMap;

/// Estimate each school's admission cutoff from everyone's original lists
///
/// The cutoff is the `capacity`-th highest score among all students who
/// listed the school anywhere. Fewer applicants than seats means everyone
/// qualifies (`-inf`); a school with no seats admits no one (`+inf`).
fn estimate_risk_cutoffs(students: &[Student], schools: &[School]) -> HashMap<u32, f64> {
    let mut interested_scores: HashMap<u32, Vec<f64>> = HashMap::new();

    for student in students {
        for &school_id in &student.preferences {
            interested_scores.entry(school_id).or_default().push(student.score);
        }
    }

    let mut cutoffs = HashMap::with_capacity(schools.len());
    for school in schools {
        if school.capacity == 0 {
            cutoffs.insert(school.id, f64::INFINITY);
            continue;
        }

        let mut scores = interested_scores.get(&school.id).cloned().unwrap_or_default();
        scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let capacity = school.capacity as usize;
        if scores.len() < capacity {
            cutoffs.insert(school.id, f64::NEG_INFINITY);
        } else {
            cutoffs.insert(school.id, scores[capacity - 1]);
        }
    }

    cutoffs
}

/// Model risk-averse "choice narrowing" under single-shot admissions
///
/// Each student keeps scanning down their list until a school whose
/// estimated cutoff they clear, then drops every higher-ranked choice. A
/// student who clears no cutoff keeps only their last (presumed safest)
/// choice. Cutoffs are estimated once from the original lists; truncation
/// never feeds back into the estimate.
///
/// Returns derived copies; the input students are untouched. Intended as
/// preprocessing for the baseline matcher only - deferred acceptance is
/// strategy-proof and must receive the original lists.
pub fn apply_safety_first_strategy(students: &[Student], schools: &[School]) -> Vec<Student> {
    let cutoffs = estimate_risk_cutoffs(students, schools);

    students
        .iter()
        .map(|student| {
            if student.preferences.len() <= 1 {
                return student.clone();
            }

            let mut safe_index = 0;
            for (i, school_id) in student.preferences.iter().enumerate() {
                let cutoff = cutoffs.get(school_id).copied().unwrap_or(f64::INFINITY);
                if student.score >= cutoff {
                    safe_index = i;
                    break;
                }
                safe_index = i + 1;
            }

            if safe_index == 0 {
                return student.clone();
            }

            let start = safe_index.min(student.preferences.len() - 1);
            Student {
                id: student.id,
                score: student.score,
                preferences: student.preferences[start..].to_vec(),
            }
        })
        .collect()
}
