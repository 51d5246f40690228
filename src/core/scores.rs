use std::collections::HashMap;

/// Fractional part of a scaled sine wave, in [0, 1)
///
/// Smooth non-cryptographic mixing function; good enough to spread exam
/// scores, not suitable for anything security-related.
#[inline]
fn sine_hash(n: f64, seed: f64) -> f64 {
    let x = (n + seed).sin() * 43758.545_312_3;
    x - x.floor()
}

/// Generate deterministic pseudo-random scores for a set of students
///
/// Pure function of `(student_ids, min, max, seed)`: identical arguments
/// always produce identical output, with no dependency on wall-clock time
/// or external entropy. Re-running a policy comparison with the same seed
/// (e.g. the session id) therefore sees identical scores.
///
/// # Arguments
/// * `student_ids` - Ids to assign scores to, position-sensitive
/// * `min` - Lowest score, inclusive
/// * `max` - Highest score, inclusive; callers must not pass `max < min`
/// * `seed` - Stable seed shared across comparable runs
///
/// # Returns
/// Mapping from student id to a score in `[min, max]`
pub fn generate_random_scores(
    student_ids: &[u32],
    min: i64,
    max: i64,
    seed: u64,
) -> HashMap<u32, i64> {
    let span = (max - min + 1) as f64;

    student_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let frac = sine_hash(f64::from(id) + index as f64, seed as f64);
            let score = (frac * span).floor() as i64 + min;
            (id, score.clamp(min, max))
        })
        .collect()
}
