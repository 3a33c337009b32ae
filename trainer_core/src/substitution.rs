//! Swapping a single exercise in a generated workout.

use crate::{
    Error, Exercise, GeneratedWorkout, GeneratedWorkoutExercise, Phase, Result,
    WorkoutGenerationOptions,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of a substitution attempt
#[derive(Clone, Debug, PartialEq)]
pub enum SubstitutionOutcome {
    /// A replacement was found; the new workout is returned
    Replaced(GeneratedWorkout),
    /// No exercise qualified; the workout is unchanged
    NoCandidates,
}

/// Candidates that may replace `current` in `workout`
///
/// A candidate shares the category of the exercise being replaced, passes
/// the request's difficulty rule, shares at least one piece of equipment with
/// what the user has, and is not already anywhere in the workout.
pub fn substitution_candidates<'a>(
    workout: &GeneratedWorkout,
    current: &Exercise,
    catalog: &'a [Exercise],
    options: &WorkoutGenerationOptions,
) -> Vec<&'a Exercise> {
    catalog
        .iter()
        .filter(|e| e.category == current.category)
        .filter(|e| !workout.contains_exercise(&e.id))
        .filter(|e| {
            options
                .difficulty
                .map_or(true, |d| d.accepts(e.difficulty))
        })
        .filter(|e| e.equipment_overlaps(&options.available_equipment))
        .collect()
}

/// Replace the exercise at `index` within `phase`
///
/// The replacement keeps the slot's sets, rest and order index. Its target
/// follows the new exercise's own reps or duration; the old target is kept
/// only when the new exercise has neither.
pub fn substitute_exercise<R: Rng + ?Sized>(
    workout: &GeneratedWorkout,
    phase: Phase,
    index: usize,
    catalog: &[Exercise],
    options: &WorkoutGenerationOptions,
    rng: &mut R,
) -> Result<SubstitutionOutcome> {
    let current = workout
        .phase(phase)
        .get(index)
        .ok_or(Error::InvalidSlot { phase, index })?;

    let candidates = substitution_candidates(workout, &current.exercise, catalog, options);
    let Some(replacement) = candidates.choose(rng) else {
        tracing::info!(
            "No alternative found for {} in {} slot {}",
            current.exercise.id,
            phase,
            index
        );
        return Ok(SubstitutionOutcome::NoCandidates);
    };

    let (target_reps, target_duration_seconds) =
        match (replacement.default_reps, replacement.default_duration_seconds) {
            (None, None) => (current.target_reps, current.target_duration_seconds),
            (reps, duration) => (reps, duration),
        };

    let entry = GeneratedWorkoutExercise {
        exercise: (*replacement).clone(),
        sets: current.sets,
        target_reps,
        target_duration_seconds,
        rest_seconds: current.rest_seconds,
        order_index: current.order_index,
    };

    tracing::info!(
        "Substituted {} -> {} in {} slot {} ({} candidates)",
        current.exercise.id,
        entry.exercise.id,
        phase,
        index,
        candidates.len()
    );

    let mut updated = workout.clone();
    updated.phase_mut(phase)[index] = entry;
    Ok(SubstitutionOutcome::Replaced(updated))
}
