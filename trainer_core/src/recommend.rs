//! Category recommendation from muscle recovery status.

use crate::recovery::estimate_recovery;
use crate::{CompletedWorkout, ExerciseCategory, MuscleGroup, MuscleRecoveryStatus};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Primary muscles trained by each category
pub fn category_muscles(category: ExerciseCategory) -> &'static [MuscleGroup] {
    use MuscleGroup::*;
    match category {
        ExerciseCategory::UpperPush => &[Chest, Shoulders, Triceps],
        ExerciseCategory::UpperPull => &[Lats, UpperBack, Biceps],
        ExerciseCategory::LowerBody => &[Quads, Hamstrings, Glutes],
        ExerciseCategory::Core => &[Abs, Core],
        ExerciseCategory::Cardio => &[Cardiovascular],
        ExerciseCategory::Skills => &[Coordination],
        ExerciseCategory::Mobility => &[Hips, Spine],
    }
}

/// Whether enough of a category's primary muscles are recovered
///
/// One recovered muscle suffices for categories with up to two primary
/// muscles; larger categories need a third of them (rounded up). A category
/// without a muscle mapping is always trainable.
pub fn can_train_category(category: ExerciseCategory, statuses: &[MuscleRecoveryStatus]) -> bool {
    let muscles = category_muscles(category);
    if muscles.is_empty() {
        return true;
    }

    let recovered = muscles
        .iter()
        .filter(|m| statuses.iter().any(|s| s.muscle == **m && s.is_recovered))
        .count();

    let threshold = if muscles.len() <= 2 {
        1
    } else {
        muscles.len().div_ceil(3)
    };

    recovered >= threshold
}

/// Categories that can be trained given the supplied recovery status
pub fn recommend_from_status(statuses: &[MuscleRecoveryStatus]) -> BTreeSet<ExerciseCategory> {
    ExerciseCategory::ALL
        .into_iter()
        .filter(|c| can_train_category(*c, statuses))
        .collect()
}

/// Categories that can be trained given the workout history as of `now`
pub fn recommend_categories(
    history: &[CompletedWorkout],
    now: DateTime<Utc>,
) -> BTreeSet<ExerciseCategory> {
    let statuses = estimate_recovery(history, now);
    let recommended = recommend_from_status(&statuses);
    tracing::debug!("Recommended categories: {:?}", recommended);
    recommended
}

/// Narrow the caller's selection to recommended categories, keeping order
///
/// Returns `None` when every selected category is still recovering, leaving
/// the caller to decide whether to proceed with the original selection.
pub fn filter_selected_categories(
    selected: &[ExerciseCategory],
    recommended: &BTreeSet<ExerciseCategory>,
) -> Option<Vec<ExerciseCategory>> {
    let kept: Vec<_> = selected
        .iter()
        .copied()
        .filter(|c| recommended.contains(c))
        .collect();

    if kept.is_empty() && !selected.is_empty() {
        None
    } else {
        Some(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionLocation;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn statuses_with_fatigued(fatigued: &[MuscleGroup]) -> Vec<MuscleRecoveryStatus> {
        MuscleGroup::ALL
            .iter()
            .map(|&muscle| {
                let tired = fatigued.contains(&muscle);
                MuscleRecoveryStatus {
                    muscle,
                    is_recovered: !tired,
                    percent_recovered: if tired { 10.0 } else { 100.0 },
                    hours_until_recovered: if tired { 30 } else { 0 },
                    last_trained: None,
                }
            })
            .collect()
    }

    #[test]
    fn test_all_recovered_recommends_everything() {
        let recommended = recommend_from_status(&statuses_with_fatigued(&[]));
        assert_eq!(recommended.len(), ExerciseCategory::ALL.len());
    }

    #[test]
    fn test_three_muscle_category_needs_one_recovered() {
        use MuscleGroup::*;
        let two_tired = statuses_with_fatigued(&[Chest, Shoulders]);
        assert!(can_train_category(ExerciseCategory::UpperPush, &two_tired));

        let all_tired = statuses_with_fatigued(&[Chest, Shoulders, Triceps]);
        assert!(!can_train_category(ExerciseCategory::UpperPush, &all_tired));
    }

    #[test]
    fn test_two_muscle_category_needs_one_recovered() {
        use MuscleGroup::*;
        assert!(can_train_category(
            ExerciseCategory::Core,
            &statuses_with_fatigued(&[Abs])
        ));
        assert!(!can_train_category(
            ExerciseCategory::Core,
            &statuses_with_fatigued(&[Abs, Core])
        ));
    }

    #[test]
    fn test_recommend_from_history() {
        let done = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let history = vec![CompletedWorkout {
            id: Uuid::new_v4(),
            name: "Quick core".into(),
            location: SessionLocation::Home,
            duration_minutes: 20,
            date: done,
            completed_at: Some(done),
        }];

        let soon = recommend_categories(&history, done + Duration::hours(2));
        assert!(!soon.contains(&ExerciseCategory::Core));
        assert!(!soon.contains(&ExerciseCategory::Cardio));
        assert!(soon.contains(&ExerciseCategory::UpperPush));

        let later = recommend_categories(&history, done + Duration::hours(25));
        assert!(later.contains(&ExerciseCategory::Core));
    }

    #[test]
    fn test_filter_keeps_caller_order() {
        let recommended: BTreeSet<_> = ExerciseCategory::ALL.into_iter().collect();
        let selected = vec![ExerciseCategory::Core, ExerciseCategory::UpperPush];
        assert_eq!(
            filter_selected_categories(&selected, &recommended),
            Some(selected.clone())
        );
    }

    #[test]
    fn test_filter_reports_all_fatigued() {
        let recommended: BTreeSet<_> = [ExerciseCategory::Mobility].into_iter().collect();
        let selected = vec![ExerciseCategory::Core, ExerciseCategory::UpperPush];
        assert_eq!(filter_selected_categories(&selected, &recommended), None);

        let partial = vec![ExerciseCategory::Core, ExerciseCategory::Mobility];
        assert_eq!(
            filter_selected_categories(&partial, &recommended),
            Some(vec![ExerciseCategory::Mobility])
        );
    }
}
