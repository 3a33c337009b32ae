//! Default exercise catalog and catalog validation.
//!
//! This module provides the built-in exercise library used when no catalog
//! export is configured, plus loading and validation for external catalogs.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

use Difficulty::{Advanced, Beginner, Intermediate};
use Equipment::*;
use ExerciseCategory as Cat;
use ExerciseLocation::{Both, Gym, Home};
use MuscleGroup as M;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog_internal);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// **Note**: For production use, prefer `get_default_catalog()` which returns a
/// cached reference. This function is retained for testing and custom catalog creation.
pub fn build_default_catalog() -> Catalog {
    build_default_catalog_internal()
}

#[allow(clippy::too_many_arguments)]
fn reps(
    id: &str,
    name: &str,
    category: ExerciseCategory,
    location: ExerciseLocation,
    difficulty: Difficulty,
    equipment: &[Equipment],
    sets: u32,
    reps: u32,
    primary: &[MuscleGroup],
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        category,
        location,
        difficulty,
        equipment: equipment.to_vec(),
        description: String::new(),
        form_cues: vec![],
        default_sets: sets,
        default_reps: Some(reps),
        default_duration_seconds: None,
        muscles_primary: primary.to_vec(),
        muscles_secondary: vec![],
        progression_exercise_id: None,
        regression_exercise_id: None,
        is_default: true,
    }
}

#[allow(clippy::too_many_arguments)]
fn timed(
    id: &str,
    name: &str,
    category: ExerciseCategory,
    location: ExerciseLocation,
    difficulty: Difficulty,
    equipment: &[Equipment],
    sets: u32,
    seconds: u32,
    primary: &[MuscleGroup],
) -> Exercise {
    Exercise {
        default_reps: None,
        default_duration_seconds: Some(seconds),
        ..reps(id, name, category, location, difficulty, equipment, sets, 0, primary)
    }
}

/// Internal function that actually builds the catalog
fn build_default_catalog_internal() -> Catalog {
    #[rustfmt::skip]
    let mut exercises = vec![
        // ====================================================================
        // Upper push
        // ====================================================================
        reps("knee_push_up", "Knee Push-up", Cat::UpperPush, Both, Beginner, &[BodyweightOnly], 3, 10, &[M::Chest, M::Triceps]),
        reps("incline_push_up", "Incline Push-up", Cat::UpperPush, Both, Beginner, &[BodyweightOnly], 3, 12, &[M::Chest, M::Shoulders]),
        reps("push_up", "Push-up", Cat::UpperPush, Both, Intermediate, &[BodyweightOnly], 3, 12, &[M::Chest, M::Triceps, M::Shoulders]),
        reps("pike_push_up", "Pike Push-up", Cat::UpperPush, Both, Intermediate, &[BodyweightOnly], 3, 8, &[M::Shoulders, M::Triceps]),
        reps("bench_dip", "Bench Dip", Cat::UpperPush, Both, Beginner, &[Bench], 3, 10, &[M::Triceps]),
        reps("parallel_bar_dip", "Parallel Bar Dip", Cat::UpperPush, Both, Intermediate, &[DipBars], 3, 8, &[M::Triceps, M::Chest]),
        reps("dumbbell_bench_press", "Dumbbell Bench Press", Cat::UpperPush, Gym, Intermediate, &[Dumbbells, Bench], 4, 10, &[M::Chest, M::Triceps]),
        reps("barbell_bench_press", "Barbell Bench Press", Cat::UpperPush, Gym, Intermediate, &[Barbell, Bench], 4, 8, &[M::Chest, M::Triceps]),
        reps("pseudo_planche_push_up", "Pseudo Planche Push-up", Cat::UpperPush, Both, Advanced, &[Parallettes], 3, 8, &[M::Chest, M::Shoulders]),
        reps("ring_dip", "Ring Dip", Cat::UpperPush, Both, Advanced, &[Rings], 3, 6, &[M::Triceps, M::Chest]),
        reps("wall_handstand_push_up", "Wall Handstand Push-up", Cat::UpperPush, Home, Advanced, &[Wall], 3, 5, &[M::Shoulders, M::Triceps]),
        // ====================================================================
        // Upper pull
        // ====================================================================
        reps("band_pull_apart", "Band Pull-apart", Cat::UpperPull, Both, Beginner, &[ResistanceBands], 3, 15, &[M::UpperBack, M::Shoulders]),
        timed("dead_hang", "Dead Hang", Cat::UpperPull, Both, Beginner, &[PullUpBar], 3, 30, &[M::Forearms, M::Lats]),
        reps("dumbbell_row", "Single-arm Dumbbell Row", Cat::UpperPull, Gym, Beginner, &[Dumbbells, Bench], 3, 10, &[M::Lats, M::UpperBack]),
        reps("ring_row", "Ring Row", Cat::UpperPull, Both, Beginner, &[Rings], 3, 10, &[M::UpperBack, M::Biceps]),
        reps("negative_pull_up", "Negative Pull-up", Cat::UpperPull, Both, Intermediate, &[PullUpBar], 3, 5, &[M::Lats, M::Biceps]),
        reps("pull_up", "Pull-up", Cat::UpperPull, Both, Intermediate, &[PullUpBar], 3, 6, &[M::Lats, M::Biceps, M::UpperBack]),
        reps("chin_up", "Chin-up", Cat::UpperPull, Both, Intermediate, &[PullUpBar], 3, 6, &[M::Biceps, M::Lats]),
        reps("barbell_row", "Barbell Bent-over Row", Cat::UpperPull, Gym, Intermediate, &[Barbell], 4, 8, &[M::UpperBack, M::Lats]),
        reps("archer_pull_up", "Archer Pull-up", Cat::UpperPull, Both, Advanced, &[PullUpBar], 3, 4, &[M::Lats, M::Biceps]),
        reps("muscle_up", "Muscle-up", Cat::UpperPull, Both, Advanced, &[PullUpBar], 3, 3, &[M::Lats, M::Triceps, M::Chest]),
        // ====================================================================
        // Lower body
        // ====================================================================
        reps("bodyweight_squat", "Bodyweight Squat", Cat::LowerBody, Both, Beginner, &[BodyweightOnly], 3, 15, &[M::Quads, M::Glutes]),
        reps("glute_bridge", "Glute Bridge", Cat::LowerBody, Both, Beginner, &[BodyweightOnly], 3, 15, &[M::Glutes, M::Hamstrings]),
        reps("reverse_lunge", "Reverse Lunge", Cat::LowerBody, Both, Beginner, &[BodyweightOnly], 3, 10, &[M::Quads, M::Glutes]),
        timed("wall_sit", "Wall Sit", Cat::LowerBody, Home, Beginner, &[Wall], 3, 45, &[M::Quads]),
        reps("goblet_squat", "Goblet Squat", Cat::LowerBody, Both, Beginner, &[Kettlebell], 3, 12, &[M::Quads, M::Glutes]),
        reps("bulgarian_split_squat", "Bulgarian Split Squat", Cat::LowerBody, Both, Intermediate, &[Bench], 3, 8, &[M::Quads, M::Glutes]),
        reps("jump_squat", "Jump Squat", Cat::LowerBody, Both, Intermediate, &[BodyweightOnly], 3, 12, &[M::Quads, M::Calves]),
        reps("kettlebell_swing", "Kettlebell Swing", Cat::LowerBody, Both, Intermediate, &[Kettlebell], 4, 15, &[M::Glutes, M::Hamstrings]),
        reps("barbell_back_squat", "Barbell Back Squat", Cat::LowerBody, Gym, Intermediate, &[Barbell], 4, 8, &[M::Quads, M::Glutes]),
        reps("romanian_deadlift", "Romanian Deadlift", Cat::LowerBody, Gym, Intermediate, &[Barbell], 4, 8, &[M::Hamstrings, M::LowerBack]),
        reps("pistol_squat", "Pistol Squat", Cat::LowerBody, Both, Advanced, &[BodyweightOnly], 3, 5, &[M::Quads, M::Glutes, M::Balance]),
        reps("shrimp_squat", "Shrimp Squat", Cat::LowerBody, Both, Advanced, &[BodyweightOnly], 3, 5, &[M::Quads, M::Glutes]),
        // ====================================================================
        // Core
        // ====================================================================
        timed("plank", "Plank", Cat::Core, Both, Beginner, &[BodyweightOnly], 3, 30, &[M::Core, M::Abs]),
        reps("dead_bug", "Dead Bug", Cat::Core, Both, Beginner, &[BodyweightOnly], 3, 10, &[M::Core, M::Abs]),
        reps("bird_dog", "Bird Dog", Cat::Core, Both, Beginner, &[BodyweightOnly], 3, 10, &[M::Core, M::LowerBack]),
        reps("crunch", "Crunch", Cat::Core, Both, Beginner, &[BodyweightOnly], 3, 15, &[M::Abs]),
        timed("side_plank", "Side Plank", Cat::Core, Both, Beginner, &[BodyweightOnly], 2, 30, &[M::Obliques]),
        timed("hollow_hold", "Hollow Body Hold", Cat::Core, Both, Intermediate, &[BodyweightOnly], 3, 30, &[M::Abs, M::Core]),
        reps("hanging_knee_raise", "Hanging Knee Raise", Cat::Core, Both, Intermediate, &[PullUpBar], 3, 10, &[M::Abs, M::HipFlexors]),
        reps("ab_wheel_rollout", "Ab Wheel Rollout", Cat::Core, Both, Intermediate, &[AbRoller], 3, 8, &[M::Abs, M::Core]),
        timed("l_sit", "L-sit", Cat::Core, Both, Advanced, &[Parallettes], 3, 15, &[M::Abs, M::HipFlexors]),
        reps("dragon_flag", "Dragon Flag", Cat::Core, Both, Advanced, &[Bench], 3, 5, &[M::Abs, M::Core]),
        reps("toes_to_bar", "Toes to Bar", Cat::Core, Both, Advanced, &[PullUpBar], 3, 8, &[M::Abs, M::HipFlexors]),
        // ====================================================================
        // Cardio
        // ====================================================================
        timed("jumping_jacks", "Jumping Jacks", Cat::Cardio, Both, Beginner, &[BodyweightOnly], 1, 45, &[M::Cardiovascular]),
        timed("high_knees", "High Knees", Cat::Cardio, Both, Beginner, &[BodyweightOnly], 1, 30, &[M::Cardiovascular, M::HipFlexors]),
        timed("mountain_climbers", "Mountain Climbers", Cat::Cardio, Both, Beginner, &[BodyweightOnly], 3, 30, &[M::Cardiovascular, M::Core]),
        timed("jump_rope_intervals", "Jump Rope Intervals", Cat::Cardio, Both, Beginner, &[JumpRope], 3, 60, &[M::Cardiovascular, M::Calves]),
        reps("burpee", "Burpee", Cat::Cardio, Both, Intermediate, &[BodyweightOnly], 3, 10, &[M::FullBody, M::Cardiovascular]),
        timed("skater_jumps", "Skater Jumps", Cat::Cardio, Both, Intermediate, &[BodyweightOnly], 3, 40, &[M::Cardiovascular, M::Legs]),
        reps("tuck_jump", "Tuck Jump", Cat::Cardio, Both, Advanced, &[BodyweightOnly], 3, 10, &[M::Cardiovascular, M::Legs]),
        timed("double_unders", "Double Unders", Cat::Cardio, Both, Advanced, &[JumpRope], 3, 45, &[M::Cardiovascular, M::Calves]),
        // ====================================================================
        // Skills
        // ====================================================================
        timed("frog_stand", "Frog Stand", Cat::Skills, Both, Beginner, &[BodyweightOnly], 3, 20, &[M::Wrists, M::Balance]),
        timed("crow_pose", "Crow Pose", Cat::Skills, Both, Intermediate, &[YogaMat], 3, 20, &[M::Balance, M::Wrists]),
        timed("wall_handstand", "Wall Handstand", Cat::Skills, Home, Intermediate, &[Wall], 3, 30, &[M::Shoulders, M::Balance]),
        timed("freestanding_handstand", "Freestanding Handstand", Cat::Skills, Both, Advanced, &[BodyweightOnly], 5, 15, &[M::Coordination, M::Balance]),
        timed("tuck_planche", "Tuck Planche", Cat::Skills, Both, Advanced, &[Parallettes], 4, 10, &[M::Shoulders, M::Wrists]),
        // ====================================================================
        // Mobility
        // ====================================================================
        timed("cat_cow", "Cat-Cow", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 45, &[M::Spine]),
        timed("worlds_greatest_stretch", "World's Greatest Stretch", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 60, &[M::Hips, M::Spine]),
        timed("hip_circles", "Hip Circles", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 45, &[M::Hips]),
        timed("arm_circles", "Arm Circles", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 30, &[M::Shoulders]),
        timed("thoracic_rotation", "Thoracic Rotation", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 45, &[M::Spine]),
        timed("standing_hamstring_stretch", "Standing Hamstring Stretch", Cat::Mobility, Both, Beginner, &[BodyweightOnly], 1, 60, &[M::Hamstrings]),
        timed("childs_pose", "Child's Pose", Cat::Mobility, Both, Beginner, &[YogaMat], 1, 60, &[M::Spine, M::Hips]),
        timed("pigeon_pose", "Pigeon Pose", Cat::Mobility, Both, Intermediate, &[YogaMat], 1, 60, &[M::Hips, M::Glutes]),
        timed("deep_squat_hold", "Deep Squat Hold", Cat::Mobility, Both, Intermediate, &[BodyweightOnly], 1, 60, &[M::Hips, M::Ankles]),
        timed("couch_stretch", "Couch Stretch", Cat::Mobility, Home, Intermediate, &[Wall], 1, 60, &[M::HipFlexors, M::Quads]),
        timed("bridge_hold", "Bridge Hold", Cat::Mobility, Both, Advanced, &[BodyweightOnly], 1, 30, &[M::Spine, M::Shoulders]),
        timed("pancake_stretch", "Pancake Stretch", Cat::Mobility, Both, Advanced, &[BodyweightOnly], 1, 60, &[M::Hips, M::Hamstrings]),
        timed("jefferson_curl", "Jefferson Curl", Cat::Mobility, Both, Advanced, &[BodyweightOnly], 1, 45, &[M::Spine, M::Hamstrings]),
    ];

    // Progression/regression ladders within a movement family
    let ladders: &[&[&str]] = &[
        &["incline_push_up", "knee_push_up", "push_up", "pseudo_planche_push_up"],
        &["bench_dip", "parallel_bar_dip", "ring_dip"],
        &["ring_row", "negative_pull_up", "pull_up", "archer_pull_up"],
        &["bodyweight_squat", "jump_squat", "shrimp_squat", "pistol_squat"],
        &["plank", "hollow_hold", "l_sit"],
        &["hanging_knee_raise", "toes_to_bar"],
        &["frog_stand", "crow_pose", "tuck_planche"],
    ];
    for ladder in ladders {
        for pair in ladder.windows(2) {
            let (easier, harder) = (pair[0], pair[1]);
            for exercise in exercises.iter_mut() {
                if exercise.id == easier {
                    exercise.progression_exercise_id = Some(harder.into());
                } else if exercise.id == harder {
                    exercise.regression_exercise_id = Some(easier.into());
                }
            }
        }
    }

    for exercise in exercises.iter_mut() {
        exercise.description = format!("{} ({})", exercise.name, exercise.category.display_name());
    }

    Catalog { exercises }
}

impl Catalog {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Only the records flagged as library defaults
    ///
    /// Generation runs against these; user-created records are excluded.
    pub fn default_exercises(&self) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|e| e.is_default)
            .cloned()
            .collect()
    }

    /// Load a catalog export (a JSON array of exercises)
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded {} exercises from {:?}",
            catalog.exercises.len(),
            path
        );
        Ok(catalog)
    }

    /// Fail with every problem `validate` finds, joined into one error
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(errors.join("; ")));
        }
        Ok(())
    }

    /// Validate the catalog for internal consistency
    ///
    /// Returns a list of validation errors (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for exercise in &self.exercises {
            let id = &exercise.id;

            if !seen.insert(id.as_str()) {
                errors.push(format!("Duplicate exercise id '{}'", id));
            }

            match (exercise.default_reps, exercise.default_duration_seconds) {
                (Some(_), Some(_)) => errors.push(format!(
                    "Exercise '{}': has both default reps and default duration",
                    id
                )),
                (None, None) => errors.push(format!(
                    "Exercise '{}': has neither default reps nor default duration",
                    id
                )),
                _ => {}
            }

            if exercise.default_sets == 0 {
                errors.push(format!("Exercise '{}': default sets must be at least 1", id));
            }

            for (label, link) in [
                ("progression", &exercise.progression_exercise_id),
                ("regression", &exercise.regression_exercise_id),
            ] {
                let Some(target_id) = link else { continue };
                match self.get(target_id) {
                    None => errors.push(format!(
                        "Exercise '{}': {} '{}' not found",
                        id, label, target_id
                    )),
                    Some(target) if target.category != exercise.category => {
                        errors.push(format!(
                            "Exercise '{}': {} '{}' is in category {} not {}",
                            id, label, target_id, target.category, exercise.category
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        for category in ExerciseCategory::ALL {
            if !self.exercises.iter().any(|e| e.category == category) {
                errors.push(format!("Catalog has no {} exercises", category));
            }
        }

        errors
    }
}
