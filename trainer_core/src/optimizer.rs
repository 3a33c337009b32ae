//! Duration estimation and greedy trimming of the main-work section.

use crate::GeneratedWorkoutExercise;

/// Assumed time under tension per repetition
pub const SECONDS_PER_REP: u32 = 3;

/// Estimated seconds for one prescribed exercise
///
/// Work time is `reps * 3s` for rep-based entries, otherwise the target
/// duration. Rest is only counted between sets, never after the last one.
pub fn exercise_duration_seconds(item: &GeneratedWorkoutExercise) -> u32 {
    let work_time = match item.target_reps {
        Some(reps) if reps > 0 => reps * SECONDS_PER_REP,
        _ => item.target_duration_seconds.unwrap_or(0),
    };
    let rest_time = item.rest_seconds * item.sets.saturating_sub(1);
    work_time * item.sets + rest_time
}

/// Estimated seconds for a list of prescribed exercises
pub fn total_duration_seconds(exercises: &[GeneratedWorkoutExercise]) -> u32 {
    exercises.iter().map(exercise_duration_seconds).sum()
}

/// Trim exercises until they fit in `target_minutes`
///
/// While over budget: take one set off the first entry that still has more
/// than two sets; once nothing is above two sets, drop the last entry.
/// An empty result is possible and valid.
pub fn trim_to_duration(
    mut exercises: Vec<GeneratedWorkoutExercise>,
    target_minutes: u32,
) -> Vec<GeneratedWorkoutExercise> {
    let target_seconds = target_minutes.saturating_mul(60);
    let mut current = total_duration_seconds(&exercises);

    while current > target_seconds && !exercises.is_empty() {
        if let Some(item) = exercises.iter_mut().find(|e| e.sets > 2) {
            item.sets -= 1;
            tracing::debug!(
                "Over budget ({}s > {}s): reduced {} to {} sets",
                current,
                target_seconds,
                item.exercise.id,
                item.sets
            );
        } else if let Some(dropped) = exercises.pop() {
            tracing::debug!(
                "Over budget ({}s > {}s): dropped {}",
                current,
                target_seconds,
                dropped.exercise.id
            );
        }
        current = total_duration_seconds(&exercises);
    }

    exercises
}
