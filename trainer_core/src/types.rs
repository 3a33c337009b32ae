//! Core domain types for the Trainer workout system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercise catalog records and their vocabularies
//! - Workout generation options and generated workouts
//! - Completed workout history
//! - Derived muscle recovery status

use crate::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Exercise Vocabulary
// ============================================================================

/// Grouping used to select exercises for a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    UpperPush,
    UpperPull,
    LowerBody,
    Core,
    Cardio,
    Skills,
    Mobility,
}

impl ExerciseCategory {
    pub const ALL: [ExerciseCategory; 7] = [
        ExerciseCategory::UpperPush,
        ExerciseCategory::UpperPull,
        ExerciseCategory::LowerBody,
        ExerciseCategory::Core,
        ExerciseCategory::Cardio,
        ExerciseCategory::Skills,
        ExerciseCategory::Mobility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::UpperPush => "upper_push",
            ExerciseCategory::UpperPull => "upper_pull",
            ExerciseCategory::LowerBody => "lower_body",
            ExerciseCategory::Core => "core",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Skills => "skills",
            ExerciseCategory::Mobility => "mobility",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseCategory::UpperPush => "Upper Push",
            ExerciseCategory::UpperPull => "Upper Pull",
            ExerciseCategory::LowerBody => "Lower Body",
            ExerciseCategory::Core => "Core",
            ExerciseCategory::Cardio => "Cardio",
            ExerciseCategory::Skills => "Skills",
            ExerciseCategory::Mobility => "Mobility",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "upper_push" | "push" => Ok(ExerciseCategory::UpperPush),
            "upper_pull" | "pull" => Ok(ExerciseCategory::UpperPull),
            "lower_body" | "legs" => Ok(ExerciseCategory::LowerBody),
            "core" => Ok(ExerciseCategory::Core),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "skills" => Ok(ExerciseCategory::Skills),
            "mobility" => Ok(ExerciseCategory::Mobility),
            other => Err(Error::Validation(format!("unknown category '{}'", other))),
        }
    }
}

/// Where an exercise can be performed
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLocation {
    Home,
    Gym,
    Both,
}

impl ExerciseLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseLocation::Home => "home",
            ExerciseLocation::Gym => "gym",
            ExerciseLocation::Both => "both",
        }
    }
}

impl fmt::Display for ExerciseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty level of an exercise or a generation request
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }

    /// Whether an exercise of difficulty `exercise` may be used for a
    /// request at this level.
    ///
    /// Intermediate requests also accept beginner exercises. The leniency is
    /// one-directional: beginner and advanced requests only match exactly.
    pub fn accepts(&self, exercise: Difficulty) -> bool {
        *self == exercise
            || (*self == Difficulty::Intermediate && exercise == Difficulty::Beginner)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(Error::Validation(format!("unknown difficulty '{}'", other))),
        }
    }
}

/// Equipment tags used by exercise requirements and user availability
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    BodyweightOnly,
    PullUpBar,
    Parallettes,
    DipBars,
    Rings,
    ResistanceBands,
    YogaMat,
    Wall,
    Bench,
    Barbell,
    Dumbbells,
    Kettlebell,
    AbRoller,
    JumpRope,
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::BodyweightOnly => "bodyweight_only",
            Equipment::PullUpBar => "pull_up_bar",
            Equipment::Parallettes => "parallettes",
            Equipment::DipBars => "dip_bars",
            Equipment::Rings => "rings",
            Equipment::ResistanceBands => "resistance_bands",
            Equipment::YogaMat => "yoga_mat",
            Equipment::Wall => "wall",
            Equipment::Bench => "bench",
            Equipment::Barbell => "barbell",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Kettlebell => "kettlebell",
            Equipment::AbRoller => "ab_roller",
            Equipment::JumpRope => "jump_rope",
        }
    }
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Equipment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "bodyweight_only" | "bodyweight" => Ok(Equipment::BodyweightOnly),
            "pull_up_bar" | "pullup_bar" => Ok(Equipment::PullUpBar),
            "parallettes" => Ok(Equipment::Parallettes),
            "dip_bars" => Ok(Equipment::DipBars),
            "rings" => Ok(Equipment::Rings),
            "resistance_bands" | "bands" => Ok(Equipment::ResistanceBands),
            "yoga_mat" => Ok(Equipment::YogaMat),
            "wall" => Ok(Equipment::Wall),
            "bench" => Ok(Equipment::Bench),
            "barbell" => Ok(Equipment::Barbell),
            "dumbbells" => Ok(Equipment::Dumbbells),
            "kettlebell" => Ok(Equipment::Kettlebell),
            "ab_roller" => Ok(Equipment::AbRoller),
            "jump_rope" => Ok(Equipment::JumpRope),
            other => Err(Error::Validation(format!("unknown equipment '{}'", other))),
        }
    }
}

/// Anatomical grouping tracked by the recovery estimator
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Lats,
    Quads,
    Hamstrings,
    Glutes,
    Legs,
    Shoulders,
    UpperBack,
    LowerBack,
    Core,
    Abs,
    Obliques,
    Biceps,
    Triceps,
    Forearms,
    Calves,
    HipFlexors,
    Ankles,
    Wrists,
    Spine,
    Hips,
    FullBody,
    Cardiovascular,
    Coordination,
    Balance,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 25] = [
        MuscleGroup::Chest,
        MuscleGroup::Lats,
        MuscleGroup::Quads,
        MuscleGroup::Hamstrings,
        MuscleGroup::Glutes,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::UpperBack,
        MuscleGroup::LowerBack,
        MuscleGroup::Core,
        MuscleGroup::Abs,
        MuscleGroup::Obliques,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Forearms,
        MuscleGroup::Calves,
        MuscleGroup::HipFlexors,
        MuscleGroup::Ankles,
        MuscleGroup::Wrists,
        MuscleGroup::Spine,
        MuscleGroup::Hips,
        MuscleGroup::FullBody,
        MuscleGroup::Cardiovascular,
        MuscleGroup::Coordination,
        MuscleGroup::Balance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Lats => "lats",
            MuscleGroup::Quads => "quads",
            MuscleGroup::Hamstrings => "hamstrings",
            MuscleGroup::Glutes => "glutes",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::UpperBack => "upper_back",
            MuscleGroup::LowerBack => "lower_back",
            MuscleGroup::Core => "core",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Obliques => "obliques",
            MuscleGroup::Biceps => "biceps",
            MuscleGroup::Triceps => "triceps",
            MuscleGroup::Forearms => "forearms",
            MuscleGroup::Calves => "calves",
            MuscleGroup::HipFlexors => "hip_flexors",
            MuscleGroup::Ankles => "ankles",
            MuscleGroup::Wrists => "wrists",
            MuscleGroup::Spine => "spine",
            MuscleGroup::Hips => "hips",
            MuscleGroup::FullBody => "full_body",
            MuscleGroup::Cardiovascular => "cardiovascular",
            MuscleGroup::Coordination => "coordination",
            MuscleGroup::Balance => "balance",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Exercise Record
// ============================================================================

/// An immutable exercise catalog record
///
/// Exactly one of `default_reps` / `default_duration_seconds` is populated:
/// holds and cardio intervals carry a duration, everything else carries reps.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub category: ExerciseCategory,
    pub location: ExerciseLocation,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub form_cues: Vec<String>,
    pub default_sets: u32,
    #[serde(default)]
    pub default_reps: Option<u32>,
    #[serde(default)]
    pub default_duration_seconds: Option<u32>,
    #[serde(default)]
    pub muscles_primary: Vec<MuscleGroup>,
    #[serde(default)]
    pub muscles_secondary: Vec<MuscleGroup>,
    #[serde(default)]
    pub progression_exercise_id: Option<String>,
    #[serde(default)]
    pub regression_exercise_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_default: bool,
}

fn default_true() -> bool {
    true
}

impl Exercise {
    /// True when every piece of required equipment is in `available`
    pub fn equipment_satisfied_by(&self, available: &[Equipment]) -> bool {
        self.equipment.iter().all(|e| available.contains(e))
    }

    /// True when at least one piece of required equipment is in `available`
    pub fn equipment_overlaps(&self, available: &[Equipment]) -> bool {
        self.equipment.iter().any(|e| available.contains(e))
    }

    /// True when the exercise can be done at the given workout location
    pub fn suits_location(&self, location: WorkoutLocation) -> bool {
        match location {
            WorkoutLocation::Home => {
                matches!(self.location, ExerciseLocation::Home | ExerciseLocation::Both)
            }
            WorkoutLocation::Gym => true,
        }
    }
}

// ============================================================================
// Generation Options
// ============================================================================

/// Where a generated workout takes place
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutLocation {
    Home,
    Gym,
}

impl WorkoutLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutLocation::Home => "home",
            WorkoutLocation::Gym => "gym",
        }
    }
}

impl fmt::Display for WorkoutLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(WorkoutLocation::Home),
            "gym" => Ok(WorkoutLocation::Gym),
            other => Err(Error::Validation(format!("unknown location '{}'", other))),
        }
    }
}

/// Constraints for a single generation call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutGenerationOptions {
    pub duration_minutes: u32,
    pub difficulty: Option<Difficulty>,
    pub categories: Vec<ExerciseCategory>,
    pub location: WorkoutLocation,
    pub available_equipment: Vec<Equipment>,
    pub include_warmup: bool,
    pub include_cooldown: bool,
}

// ============================================================================
// Generated Workout
// ============================================================================

/// One of the three ordered sections of a generated workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Warmup,
    MainWork,
    Cooldown,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Warmup, Phase::MainWork, Phase::Cooldown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Warmup => "warmup",
            Phase::MainWork => "main_work",
            Phase::Cooldown => "cooldown",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "warmup" | "warm_up" => Ok(Phase::Warmup),
            "main" | "main_work" => Ok(Phase::MainWork),
            "cooldown" | "cool_down" => Ok(Phase::Cooldown),
            other => Err(Error::Validation(format!("unknown phase '{}'", other))),
        }
    }
}

/// A single prescribed exercise within a phase
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedWorkoutExercise {
    pub exercise: Exercise,
    pub sets: u32,
    pub target_reps: Option<u32>,
    pub target_duration_seconds: Option<u32>,
    pub rest_seconds: u32,
    pub order_index: u32,
}

/// The result of a generation call, editable until committed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratedWorkout {
    pub name: String,
    pub location: WorkoutLocation,
    pub warmup: Vec<GeneratedWorkoutExercise>,
    pub main_work: Vec<GeneratedWorkoutExercise>,
    pub cooldown: Vec<GeneratedWorkoutExercise>,
    pub total_duration_minutes: u32,
}

impl GeneratedWorkout {
    pub fn phase(&self, phase: Phase) -> &[GeneratedWorkoutExercise] {
        match phase {
            Phase::Warmup => &self.warmup,
            Phase::MainWork => &self.main_work,
            Phase::Cooldown => &self.cooldown,
        }
    }

    pub fn phase_mut(&mut self, phase: Phase) -> &mut Vec<GeneratedWorkoutExercise> {
        match phase {
            Phase::Warmup => &mut self.warmup,
            Phase::MainWork => &mut self.main_work,
            Phase::Cooldown => &mut self.cooldown,
        }
    }

    /// Every entry tagged with its phase, in warmup → main → cooldown order
    pub fn all_exercises(&self) -> impl Iterator<Item = (Phase, &GeneratedWorkoutExercise)> + '_ {
        Phase::ALL
            .into_iter()
            .flat_map(move |phase| self.phase(phase).iter().map(move |e| (phase, e)))
    }

    pub fn contains_exercise(&self, exercise_id: &str) -> bool {
        self.all_exercises()
            .any(|(_, e)| e.exercise.id == exercise_id)
    }

    /// Estimated length of the whole workout in seconds
    pub fn estimated_seconds(&self) -> u32 {
        Phase::ALL
            .iter()
            .map(|p| crate::optimizer::total_duration_seconds(self.phase(*p)))
            .sum()
    }
}

// ============================================================================
// History and Recovery Types
// ============================================================================

/// Location recorded on a completed workout
///
/// Records come from an external store, so unknown values are preserved
/// rather than rejected.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum SessionLocation {
    Home,
    Gym,
    Other(String),
}

impl From<String> for SessionLocation {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "home" => SessionLocation::Home,
            "gym" => SessionLocation::Gym,
            _ => SessionLocation::Other(s),
        }
    }
}

impl From<SessionLocation> for String {
    fn from(location: SessionLocation) -> Self {
        match location {
            SessionLocation::Home => "home".into(),
            SessionLocation::Gym => "gym".into(),
            SessionLocation::Other(s) => s,
        }
    }
}

impl From<WorkoutLocation> for SessionLocation {
    fn from(location: WorkoutLocation) -> Self {
        match location {
            WorkoutLocation::Home => SessionLocation::Home,
            WorkoutLocation::Gym => SessionLocation::Gym,
        }
    }
}

/// A previously performed workout as returned by the record store
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletedWorkout {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    pub location: SessionLocation,
    pub duration_minutes: u32,
    pub date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Derived per-muscle recovery estimate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MuscleRecoveryStatus {
    pub muscle: MuscleGroup,
    pub is_recovered: bool,
    pub percent_recovered: f64,
    pub hours_until_recovered: u32,
    pub last_trained: Option<DateTime<Utc>>,
}

// ============================================================================
// Catalog Type
// ============================================================================

/// The exercise catalog, in a stable order
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub exercises: Vec<Exercise>,
}
