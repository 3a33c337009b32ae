#![forbid(unsafe_code)]

//! Core domain model and business logic for the Trainer workout system.
//!
//! This crate provides:
//! - Domain types (exercises, generation options, generated workouts, history)
//! - Catalog management
//! - Muscle recovery estimation and category recommendation
//! - Workout generation, duration trimming and exercise substitution
//! - Persistence hand-off (plan records, review session, history log)

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod format;
pub mod recovery;
pub mod recommend;
pub mod optimizer;
pub mod generator;
pub mod substitution;
pub mod records;
pub mod review;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use format::{format_clock, format_duration};
pub use recovery::{estimate_recovery, recovery_message};
pub use recommend::{filter_selected_categories, recommend_categories, recommend_from_status};
pub use optimizer::{exercise_duration_seconds, total_duration_seconds, trim_to_duration};
pub use generator::generate_workout;
pub use substitution::{substitute_exercise, SubstitutionOutcome};
pub use records::{read_plans, JsonlPlanSink, PlanSink, PlannedExerciseRecord, WorkoutPlanRecord};
pub use review::ReviewSession;
pub use history::{load_history, read_history, HistorySink, JsonlHistorySink};
