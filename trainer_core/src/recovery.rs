//! Muscle recovery estimation from completed-workout history.
//!
//! Exercise-level logs are not consulted. Each completed workout is mapped
//! to a set of muscle groups from its location and duration alone, and each
//! muscle recovers linearly over a fixed number of hours.

use crate::{CompletedWorkout, MuscleGroup, MuscleRecoveryStatus, SessionLocation};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashMap;

/// Hours for a muscle group to fully recover after being trained
pub fn recovery_hours(muscle: MuscleGroup) -> u32 {
    use MuscleGroup::*;
    match muscle {
        // Large groups
        Chest | Lats | Quads | Hamstrings | Glutes | Legs => 48,
        LowerBack | Spine | FullBody => 48,
        // Medium groups
        Shoulders | UpperBack | Hips => 36,
        // Small groups, joints and conditioning
        Core | Abs | Obliques | Biceps | Triceps | Forearms | Calves => 24,
        HipFlexors | Ankles | Wrists => 24,
        Cardiovascular | Coordination | Balance => 24,
    }
}

/// Duration bucket used by the muscle inference table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionLength {
    /// Under 30 minutes
    Short,
    /// 30 to 44 minutes
    Medium,
    /// 45 minutes or more
    Long,
}

impl SessionLength {
    fn of(duration_minutes: u32) -> Self {
        match duration_minutes {
            0..=29 => SessionLength::Short,
            30..=44 => SessionLength::Medium,
            _ => SessionLength::Long,
        }
    }
}

/// Infer which muscle groups a completed workout trained
///
/// Gym sessions are assumed to follow a split rather than hitting everything:
/// medium sessions alternate upper/lower on even/odd days of the month, long
/// sessions rotate push/pull/legs by day of month modulo 3.
pub fn infer_muscles(workout: &CompletedWorkout) -> Vec<MuscleGroup> {
    use MuscleGroup::*;

    let length = SessionLength::of(workout.duration_minutes);
    let day_of_month = workout.completed_at.unwrap_or(workout.date).day();

    match (&workout.location, length) {
        (SessionLocation::Home, SessionLength::Short) => vec![Core, Abs, Cardiovascular],
        (SessionLocation::Home, SessionLength::Medium) => {
            vec![Chest, Shoulders, Triceps, Core, Abs]
        }
        (SessionLocation::Home, SessionLength::Long) => {
            vec![Chest, Shoulders, Triceps, Core, Abs, Quads, Glutes]
        }
        (SessionLocation::Gym, SessionLength::Short) => vec![Chest, Shoulders, Triceps],
        (SessionLocation::Gym, SessionLength::Medium) => {
            if day_of_month % 2 == 0 {
                vec![Chest, Shoulders, Triceps, Lats, Biceps, UpperBack]
            } else {
                vec![Quads, Hamstrings, Glutes, Calves]
            }
        }
        (SessionLocation::Gym, SessionLength::Long) => match day_of_month % 3 {
            0 => vec![Chest, Shoulders, Triceps],
            1 => vec![Lats, UpperBack, Biceps, Core],
            _ => vec![Quads, Hamstrings, Glutes, Calves],
        },
        (SessionLocation::Other(_), _) => vec![Cardiovascular, Legs],
    }
}

/// Estimate recovery for every muscle group as of `now`
///
/// Returns one entry per muscle group, in `MuscleGroup::ALL` order. Muscles
/// never matched by the history are reported fully recovered.
pub fn estimate_recovery(
    history: &[CompletedWorkout],
    now: DateTime<Utc>,
) -> Vec<MuscleRecoveryStatus> {
    let mut completed: Vec<_> = history
        .iter()
        .filter_map(|w| w.completed_at.map(|at| (at, w)))
        .collect();
    completed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut last_trained: HashMap<MuscleGroup, DateTime<Utc>> = HashMap::new();
    for (completed_at, workout) in &completed {
        for muscle in infer_muscles(workout) {
            last_trained.entry(muscle).or_insert(*completed_at);
        }
    }

    tracing::debug!(
        "Estimating recovery from {} completed workouts ({} muscles trained)",
        completed.len(),
        last_trained.len()
    );

    MuscleGroup::ALL
        .iter()
        .map(|&muscle| status_for(muscle, last_trained.get(&muscle).copied(), now))
        .collect()
}

fn status_for(
    muscle: MuscleGroup,
    last_trained: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> MuscleRecoveryStatus {
    let Some(trained_at) = last_trained else {
        return MuscleRecoveryStatus {
            muscle,
            is_recovered: true,
            percent_recovered: 100.0,
            hours_until_recovered: 0,
            last_trained: None,
        };
    };

    let recovery = f64::from(recovery_hours(muscle));
    // Timestamps ahead of `now` count as just trained
    let elapsed_hours = ((now - trained_at).num_milliseconds() as f64 / 3_600_000.0).max(0.0);

    let percent_recovered = (elapsed_hours / recovery * 100.0).min(100.0);
    let hours_until_recovered = (recovery - elapsed_hours).max(0.0).round() as u32;

    MuscleRecoveryStatus {
        muscle,
        is_recovered: percent_recovered >= 100.0,
        percent_recovered,
        hours_until_recovered,
        last_trained: Some(trained_at),
    }
}

/// Muscles ready to train
pub fn recovered_muscles(statuses: &[MuscleRecoveryStatus]) -> Vec<MuscleGroup> {
    statuses
        .iter()
        .filter(|s| s.is_recovered)
        .map(|s| s.muscle)
        .collect()
}

/// Muscles still recovering
pub fn fatigued_muscles(statuses: &[MuscleRecoveryStatus]) -> Vec<&MuscleRecoveryStatus> {
    statuses.iter().filter(|s| !s.is_recovered).collect()
}

/// Short human-readable summary of a recovery status
pub fn recovery_message(status: &MuscleRecoveryStatus) -> String {
    if status.is_recovered {
        return "Ready to train".into();
    }
    if status.hours_until_recovered < 6 {
        return "Almost recovered".into();
    }
    if status.hours_until_recovered < 24 {
        return format!("{}h rest needed", status.hours_until_recovered);
    }

    let days = status.hours_until_recovered.div_ceil(24);
    format!("{} day{} rest needed", days, if days > 1 { "s" } else { "" })
}
