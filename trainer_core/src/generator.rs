//! Workout generation.
//!
//! A generated workout has three phases:
//! - Warmup: mobility and cardio drills, one timed set each
//! - Main work: exercises from the requested categories, trimmed to budget
//! - Cooldown: mobility holds, one timed set each
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator gives
//! reproducible workouts while the default thread RNG lets "regenerate"
//! produce something new from identical options.

use crate::optimizer::trim_to_duration;
use crate::{
    Difficulty, Error, Exercise, ExerciseCategory, GeneratedWorkout, GeneratedWorkoutExercise,
    Result, WorkoutGenerationOptions,
};
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed length of the warmup and cooldown blocks when requested
pub const PHASE_BLOCK_MINUTES: u32 = 5;

const WARMUP_WORK_SECONDS: u32 = 45;
const WARMUP_REST_SECONDS: u32 = 15;
const COOLDOWN_HOLD_SECONDS: u32 = 60;
const COOLDOWN_REST_SECONDS: u32 = 10;
const MAIN_WORK_REST_SECONDS: u32 = 60;
/// Budget per main-work exercise when spreading time across categories
const MAIN_WORK_SECONDS_PER_EXERCISE: u32 = 180;
const MIN_PHASE_EXERCISES: usize = 2;

/// Longest workout a request may ask for
pub const MAX_WORKOUT_MINUTES: u32 = 24 * 60;

impl WorkoutGenerationOptions {
    pub fn warmup_minutes(&self) -> u32 {
        if self.include_warmup {
            PHASE_BLOCK_MINUTES
        } else {
            0
        }
    }

    pub fn cooldown_minutes(&self) -> u32 {
        if self.include_cooldown {
            PHASE_BLOCK_MINUTES
        } else {
            0
        }
    }

    /// Minutes left for main work after warmup and cooldown
    pub fn main_work_minutes(&self) -> u32 {
        self.duration_minutes
            .saturating_sub(self.warmup_minutes() + self.cooldown_minutes())
    }

    /// Requested categories in caller order with repeats removed
    pub fn unique_categories(&self) -> Vec<ExerciseCategory> {
        let mut seen = Vec::with_capacity(self.categories.len());
        for category in &self.categories {
            if !seen.contains(category) {
                seen.push(*category);
            }
        }
        seen
    }

    /// Check the request and return the difficulty to generate for
    pub fn validate(&self) -> Result<Difficulty> {
        if self.categories.is_empty() {
            return Err(Error::Validation("select at least one category".into()));
        }
        if self.available_equipment.is_empty() {
            return Err(Error::Validation(
                "select at least one piece of equipment".into(),
            ));
        }
        let difficulty = self
            .difficulty
            .ok_or_else(|| Error::Validation("select a difficulty level".into()))?;
        if self.duration_minutes == 0 {
            return Err(Error::Validation("duration must be positive".into()));
        }
        if self.duration_minutes > MAX_WORKOUT_MINUTES {
            return Err(Error::Validation(format!(
                "duration must be at most {} minutes, got {}",
                MAX_WORKOUT_MINUTES, self.duration_minutes
            )));
        }
        if self.main_work_minutes() == 0 {
            return Err(Error::Validation(format!(
                "{} minutes leaves no time for main work after warmup and cooldown",
                self.duration_minutes
            )));
        }
        Ok(difficulty)
    }

    /// The difficulty/equipment/location filter applied before any sampling
    pub fn is_eligible(&self, difficulty: Difficulty, exercise: &Exercise) -> bool {
        difficulty.accepts(exercise.difficulty)
            && exercise.equipment_satisfied_by(&self.available_equipment)
            && exercise.suits_location(self.location)
    }
}

/// Generate a complete workout from the catalog
///
/// Fails only when the options are invalid. Categories with no eligible
/// exercises are skipped rather than failing the call.
pub fn generate_workout<R: Rng + ?Sized>(
    catalog: &[Exercise],
    options: &WorkoutGenerationOptions,
    rng: &mut R,
) -> Result<GeneratedWorkout> {
    let difficulty = options.validate()?;
    let categories = options.unique_categories();

    let eligible: Vec<&Exercise> = catalog
        .iter()
        .filter(|e| options.is_eligible(difficulty, e))
        .collect();

    tracing::debug!(
        "{} of {} exercises eligible for {} {} workout",
        eligible.len(),
        catalog.len(),
        difficulty,
        options.location
    );

    let warmup = if options.include_warmup {
        generate_warmup(&eligible, options.warmup_minutes(), rng)
    } else {
        vec![]
    };

    let main_work = generate_main_work(&eligible, &categories, options.main_work_minutes(), rng);

    let cooldown = if options.include_cooldown {
        generate_cooldown(&eligible, options.cooldown_minutes(), rng)
    } else {
        vec![]
    };

    let workout = GeneratedWorkout {
        name: workout_name(&categories, difficulty),
        location: options.location,
        warmup,
        main_work,
        cooldown,
        total_duration_minutes: options.duration_minutes,
    };

    tracing::info!(
        "Generated '{}': {} warmup, {} main, {} cooldown",
        workout.name,
        workout.warmup.len(),
        workout.main_work.len(),
        workout.cooldown.len()
    );

    Ok(workout)
}

/// Pick up to `count` distinct exercises in random order
fn sample<'a, R: Rng + ?Sized>(
    pool: &[&'a Exercise],
    count: usize,
    rng: &mut R,
) -> Vec<&'a Exercise> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// Number of exercises a timed phase should hold, at least two
fn phase_count(minutes: u32, seconds_per_exercise: u32, pool_size: usize) -> usize {
    let fits = (minutes.saturating_mul(60) / seconds_per_exercise) as usize;
    fits.min(pool_size).max(MIN_PHASE_EXERCISES)
}

fn timed_entries(
    selected: Vec<&Exercise>,
    fallback_seconds: u32,
    rest_seconds: u32,
) -> Vec<GeneratedWorkoutExercise> {
    selected
        .into_iter()
        .enumerate()
        .map(|(index, exercise)| GeneratedWorkoutExercise {
            exercise: exercise.clone(),
            sets: 1,
            target_reps: None,
            target_duration_seconds: Some(
                exercise
                    .default_duration_seconds
                    .filter(|s| *s > 0)
                    .unwrap_or(fallback_seconds),
            ),
            rest_seconds,
            order_index: index as u32,
        })
        .collect()
}

fn generate_warmup<R: Rng + ?Sized>(
    eligible: &[&Exercise],
    minutes: u32,
    rng: &mut R,
) -> Vec<GeneratedWorkoutExercise> {
    let pool: Vec<&Exercise> = eligible
        .iter()
        .copied()
        .filter(|e| matches!(e.category, ExerciseCategory::Mobility | ExerciseCategory::Cardio))
        .collect();

    let count = phase_count(minutes, WARMUP_WORK_SECONDS + WARMUP_REST_SECONDS, pool.len());
    tracing::debug!("Warmup: picking {} from pool of {}", count, pool.len());

    timed_entries(sample(&pool, count, rng), WARMUP_WORK_SECONDS, WARMUP_REST_SECONDS)
}

fn generate_cooldown<R: Rng + ?Sized>(
    eligible: &[&Exercise],
    minutes: u32,
    rng: &mut R,
) -> Vec<GeneratedWorkoutExercise> {
    let pool: Vec<&Exercise> = eligible
        .iter()
        .copied()
        .filter(|e| e.category == ExerciseCategory::Mobility)
        .collect();

    let count = phase_count(minutes, COOLDOWN_HOLD_SECONDS + COOLDOWN_REST_SECONDS, pool.len());
    tracing::debug!("Cooldown: picking {} from pool of {}", count, pool.len());

    timed_entries(sample(&pool, count, rng), COOLDOWN_HOLD_SECONDS, COOLDOWN_REST_SECONDS)
}

fn generate_main_work<R: Rng + ?Sized>(
    eligible: &[&Exercise],
    categories: &[ExerciseCategory],
    minutes: u32,
    rng: &mut R,
) -> Vec<GeneratedWorkoutExercise> {
    let budget_per_category = categories.len() as u32 * MAIN_WORK_SECONDS_PER_EXERCISE;
    let per_category = ((minutes.saturating_mul(60) / budget_per_category) as usize).max(1);

    let mut entries = Vec::new();
    let mut order_index = 0;

    for category in categories {
        let pool: Vec<&Exercise> = eligible
            .iter()
            .copied()
            .filter(|e| e.category == *category)
            .collect();

        if pool.is_empty() {
            tracing::debug!("No eligible exercises for {}, skipping", category);
            continue;
        }

        for exercise in sample(&pool, per_category, rng) {
            entries.push(GeneratedWorkoutExercise {
                exercise: exercise.clone(),
                sets: exercise.default_sets,
                target_reps: exercise.default_reps,
                target_duration_seconds: exercise.default_duration_seconds,
                rest_seconds: MAIN_WORK_REST_SECONDS,
                order_index,
            });
            order_index += 1;
        }
    }

    trim_to_duration(entries, minutes)
}

/// Descriptive name, e.g. "Intermediate upper push, core Workout"
pub fn workout_name(categories: &[ExerciseCategory], difficulty: Difficulty) -> String {
    let category_names = categories
        .iter()
        .map(|c| c.as_str().replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ");

    let level = difficulty.as_str();
    let mut chars = level.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };

    format!("{} {} Workout", capitalized, category_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use crate::{Equipment, ExerciseLocation, WorkoutLocation};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn options() -> WorkoutGenerationOptions {
        WorkoutGenerationOptions {
            duration_minutes: 30,
            difficulty: Some(Difficulty::Intermediate),
            categories: vec![
                ExerciseCategory::UpperPush,
                ExerciseCategory::UpperPull,
                ExerciseCategory::LowerBody,
                ExerciseCategory::Core,
            ],
            location: WorkoutLocation::Home,
            available_equipment: vec![Equipment::BodyweightOnly, Equipment::PullUpBar],
            include_warmup: true,
            include_cooldown: true,
        }
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_rejects_empty_categories() {
        let mut opts = options();
        opts.categories.clear();
        let err = generate_workout(build_default_catalog().exercises(), &opts, &mut rng(1));
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_equipment() {
        let mut opts = options();
        opts.available_equipment.clear();
        let err = generate_workout(build_default_catalog().exercises(), &opts, &mut rng(1));
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_missing_difficulty() {
        let mut opts = options();
        opts.difficulty = None;
        let err = generate_workout(build_default_catalog().exercises(), &opts, &mut rng(1));
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn test_rejects_no_main_work_time() {
        let mut opts = options();
        opts.duration_minutes = 10;
        assert!(opts.validate().is_err());

        opts.include_cooldown = false;
        assert_eq!(opts.main_work_minutes(), 5);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_rejects_oversized_duration() {
        let mut opts = options();
        opts.duration_minutes = 80_000_000;
        let err = generate_workout(build_default_catalog().exercises(), &opts, &mut rng(1));
        assert!(matches!(err, Err(Error::Validation(_))));

        opts.duration_minutes = MAX_WORKOUT_MINUTES;
        assert!(generate_workout(build_default_catalog().exercises(), &opts, &mut rng(1)).is_ok());
    }

    #[test]
    fn test_equipment_difficulty_location_invariants() {
        let catalog = build_default_catalog();
        for seed in 0..20 {
            let opts = options();
            let workout = generate_workout(catalog.exercises(), &opts, &mut rng(seed)).unwrap();
            for (_, item) in workout.all_exercises() {
                let e = &item.exercise;
                assert!(e.equipment_satisfied_by(&opts.available_equipment), "{}", e.id);
                assert!(
                    matches!(e.difficulty, Difficulty::Intermediate | Difficulty::Beginner),
                    "{}",
                    e.id
                );
                assert_ne!(e.location, ExerciseLocation::Gym, "{}", e.id);
            }
        }
    }

    fn gym_only_catalog() -> Vec<Exercise> {
        build_default_catalog()
            .exercises()
            .iter()
            .filter(|e| e.location == ExerciseLocation::Gym)
            .cloned()
            .collect()
    }

    fn gym_options(location: WorkoutLocation) -> WorkoutGenerationOptions {
        WorkoutGenerationOptions {
            categories: vec![
                ExerciseCategory::UpperPush,
                ExerciseCategory::UpperPull,
                ExerciseCategory::LowerBody,
            ],
            location,
            available_equipment: vec![Equipment::Barbell, Equipment::Bench, Equipment::Dumbbells],
            ..options()
        }
    }

    #[test]
    fn test_gym_workout_selects_gym_only_exercises() {
        let catalog = gym_only_catalog();
        assert!(!catalog.is_empty());
        let gym_ids: HashSet<_> = catalog.iter().map(|e| e.id.as_str()).collect();

        for seed in 0..5 {
            let opts = gym_options(WorkoutLocation::Gym);
            let workout = generate_workout(&catalog, &opts, &mut rng(seed)).unwrap();
            assert!(!workout.main_work.is_empty());
            for item in &workout.main_work {
                assert!(gym_ids.contains(item.exercise.id.as_str()), "{}", item.exercise.id);
                assert_eq!(item.exercise.location, ExerciseLocation::Gym);
            }
        }
    }

    #[test]
    fn test_home_workout_skips_gym_only_exercises() {
        let opts = gym_options(WorkoutLocation::Home);
        let workout = generate_workout(&gym_only_catalog(), &opts, &mut rng(1)).unwrap();
        assert_eq!(workout.all_exercises().count(), 0);

        // With the full catalog the same equipment still yields no gym-only entry
        let catalog = build_default_catalog();
        for seed in 0..10 {
            let workout = generate_workout(catalog.exercises(), &opts, &mut rng(seed)).unwrap();
            assert!(workout
                .all_exercises()
                .all(|(_, item)| item.exercise.location != ExerciseLocation::Gym));
        }
    }

    #[test]
    fn test_advanced_does_not_pull_in_easier_exercises() {
        let catalog = build_default_catalog();
        let mut opts = options();
        opts.difficulty = Some(Difficulty::Advanced);
        opts.available_equipment = vec![
            Equipment::BodyweightOnly,
            Equipment::PullUpBar,
            Equipment::Parallettes,
            Equipment::Wall,
        ];
        let workout = generate_workout(catalog.exercises(), &opts, &mut rng(3)).unwrap();
        assert!(!workout.main_work.is_empty());
        assert!(workout
            .all_exercises()
            .all(|(_, item)| item.exercise.difficulty == Difficulty::Advanced));
    }

    #[test]
    fn test_core_only_beginner_scenario() {
        let catalog = build_default_catalog();
        let opts = WorkoutGenerationOptions {
            duration_minutes: 15,
            difficulty: Some(Difficulty::Beginner),
            categories: vec![ExerciseCategory::Core],
            location: WorkoutLocation::Home,
            available_equipment: vec![Equipment::BodyweightOnly],
            include_warmup: false,
            include_cooldown: false,
        };

        let workout = generate_workout(catalog.exercises(), &opts, &mut rng(7)).unwrap();
        assert!(workout.warmup.is_empty());
        assert!(workout.cooldown.is_empty());
        assert!(!workout.main_work.is_empty());
        assert!(workout
            .main_work
            .iter()
            .all(|e| e.exercise.category == ExerciseCategory::Core));
        assert_eq!(workout.total_duration_minutes, 15);
    }

    #[test]
    fn test_unique_order_index_per_phase() {
        let catalog = build_default_catalog();
        for seed in 0..10 {
            let workout =
                generate_workout(catalog.exercises(), &options(), &mut rng(seed)).unwrap();
            for phase in crate::Phase::ALL {
                let indices: HashSet<_> =
                    workout.phase(phase).iter().map(|e| e.order_index).collect();
                assert_eq!(indices.len(), workout.phase(phase).len());
            }
        }
    }

    #[test]
    fn test_main_work_fits_budget() {
        let catalog = build_default_catalog();
        for seed in 0..10 {
            let opts = options();
            let workout = generate_workout(catalog.exercises(), &opts, &mut rng(seed)).unwrap();
            assert!(
                crate::total_duration_seconds(&workout.main_work) <= opts.main_work_minutes() * 60
            );
        }
    }

    #[test]
    fn test_main_work_keeps_category_order() {
        let catalog = build_default_catalog();
        let mut opts = options();
        opts.duration_minutes = 60;
        let workout = generate_workout(catalog.exercises(), &opts, &mut rng(11)).unwrap();

        let rank = |c: ExerciseCategory| opts.categories.iter().position(|x| *x == c).unwrap();
        let ranks: Vec<_> = workout.main_work.iter().map(|e| rank(e.exercise.category)).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);

        let order: Vec<_> = workout.main_work.iter().map(|e| e.order_index).collect();
        assert_eq!(order, (0..order.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_warmup_and_cooldown_shape() {
        let catalog = build_default_catalog();
        let workout = generate_workout(catalog.exercises(), &options(), &mut rng(5)).unwrap();

        // 300s / 60s per drill = 5 warmup; 300s / 70s per hold = 4 cooldown
        assert_eq!(workout.warmup.len(), 5);
        assert_eq!(workout.cooldown.len(), 4);

        for item in &workout.warmup {
            assert!(matches!(
                item.exercise.category,
                ExerciseCategory::Mobility | ExerciseCategory::Cardio
            ));
            assert_eq!(item.sets, 1);
            assert_eq!(item.rest_seconds, 15);
            assert!(item.target_duration_seconds.is_some());
        }
        for item in &workout.cooldown {
            assert_eq!(item.exercise.category, ExerciseCategory::Mobility);
            assert_eq!(item.rest_seconds, 10);
        }
    }

    #[test]
    fn test_warmup_falls_back_to_45_seconds_for_rep_drills() {
        let catalog = build_default_catalog();
        let pool = vec![
            catalog.get("burpee").unwrap().clone(),
            catalog.get("jumping_jacks").unwrap().clone(),
        ];

        let mut opts = options();
        opts.include_cooldown = false;
        let workout = generate_workout(&pool, &opts, &mut rng(2)).unwrap();
        let entry = workout.warmup.iter().find(|e| e.exercise.id == "burpee").unwrap();
        assert_eq!(entry.target_duration_seconds, Some(45));
    }

    #[test]
    fn test_small_pool_limits_phase_count() {
        let catalog = build_default_catalog();
        let pool: Vec<_> = catalog
            .exercises()
            .iter()
            .filter(|e| e.id == "cat_cow" || e.category == ExerciseCategory::Core)
            .cloned()
            .collect();

        let workout = generate_workout(&pool, &options(), &mut rng(9)).unwrap();
        assert_eq!(workout.warmup.len(), 1);
        assert_eq!(workout.cooldown.len(), 1);
    }

    #[test]
    fn test_empty_category_pool_skipped() {
        let catalog = build_default_catalog();
        let mut opts = options();
        opts.available_equipment = vec![Equipment::BodyweightOnly];
        opts.categories = vec![ExerciseCategory::UpperPull, ExerciseCategory::Core];

        // Every intermediate/beginner pull exercise needs equipment
        let workout = generate_workout(catalog.exercises(), &opts, &mut rng(4)).unwrap();
        assert!(workout
            .main_work
            .iter()
            .all(|e| e.exercise.category == ExerciseCategory::Core));
        assert!(!workout.main_work.is_empty());
    }

    #[test]
    fn test_same_seed_same_workout() {
        let catalog = build_default_catalog();
        let a = generate_workout(catalog.exercises(), &options(), &mut rng(42)).unwrap();
        let b = generate_workout(catalog.exercises(), &options(), &mut rng(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_duplicate_categories_collapsed() {
        let mut opts = options();
        opts.categories = vec![
            ExerciseCategory::Core,
            ExerciseCategory::UpperPush,
            ExerciseCategory::Core,
        ];
        assert_eq!(
            opts.unique_categories(),
            vec![ExerciseCategory::Core, ExerciseCategory::UpperPush]
        );
    }

    #[test]
    fn test_workout_name() {
        assert_eq!(
            workout_name(
                &[ExerciseCategory::UpperPush, ExerciseCategory::Core],
                Difficulty::Intermediate
            ),
            "Intermediate upper push, core Workout"
        );
        assert_eq!(
            workout_name(&[ExerciseCategory::LowerBody], Difficulty::Beginner),
            "Beginner lower body Workout"
        );
    }
}
