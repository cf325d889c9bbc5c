use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::{PlanStructure, Recipe, Slot},
};

/// Spreads `candidates` over `days` days and the given `slots`
///
/// The candidates are shuffled once, then consumed in order; when the list
/// runs out it is reshuffled in place and consumption restarts from the
/// front. Every slot of every day receives a title.
pub fn assemble_plan<R: Rng + ?Sized>(
    mut candidates: Vec<Recipe>,
    days: u32,
    slots: &[Slot],
    rng: &mut R,
) -> AppResult<PlanStructure> {
    if candidates.is_empty() {
        return Err(AppError::InvalidInput(
            "Cannot assemble a plan without candidate recipes".to_string(),
        ));
    }
    if days == 0 {
        return Err(AppError::InvalidInput(
            "Plan must cover at least one day".to_string(),
        ));
    }
    if slots.is_empty() {
        return Err(AppError::InvalidInput(
            "Plan must have at least one meal slot per day".to_string(),
        ));
    }

    candidates.shuffle(rng);

    let mut structure = PlanStructure::new();
    let mut cursor = 0;

    for day in 1..=days {
        for &slot in slots {
            if cursor >= candidates.len() {
                cursor = 0;
                candidates.shuffle(rng);
            }
            structure.assign(day, slot, candidates[cursor].title.clone());
            cursor += 1;
        }
    }

    tracing::debug!(
        days,
        candidates = candidates.len(),
        slots = structure.slot_count(),
        "Plan assembled"
    );

    Ok(structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn recipes(titles: &[&str]) -> Vec<Recipe> {
        titles.iter().map(|t| Recipe::new(*t, Some(""))).collect()
    }

    #[test]
    fn test_every_slot_is_filled() {
        let mut rng = StdRng::seed_from_u64(7);
        for days in 1..=10 {
            let plan = assemble_plan(recipes(&["A", "B", "C", "D"]), days, &Slot::ALL, &mut rng)
                .unwrap();
            assert_eq!(plan.day_count(), days as usize);
            assert_eq!(plan.slot_count(), days as usize * 3);
            for day in 1..=days {
                for slot in Slot::ALL {
                    assert!(plan.get(day, slot).is_some());
                }
            }
        }
    }

    #[test]
    fn test_two_days_two_candidates_cycles() {
        let mut rng = StdRng::seed_from_u64(42);
        let plan = assemble_plan(recipes(&["Salad", "Soup"]), 2, &Slot::ALL, &mut rng).unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        let days = json.as_object().unwrap();
        assert_eq!(days.len(), 2);
        for key in ["day_1", "day_2"] {
            let day = days[key].as_object().unwrap();
            for slot in ["morning", "midday", "evening"] {
                let title = day[slot].as_str().unwrap();
                assert!(title == "Salad" || title == "Soup");
            }
        }

        // Each pass over the list uses both recipes exactly once
        let assigned: Vec<&str> = plan.entries().map(|(_, _, t)| t).collect();
        for pass in assigned.chunks(2) {
            let distinct: HashSet<&str> = pass.iter().copied().collect();
            assert_eq!(distinct.len(), 2);
        }
    }

    #[test]
    fn test_single_candidate_fills_every_slot() {
        let mut rng = StdRng::seed_from_u64(1);
        let plan = assemble_plan(recipes(&["Omelette"]), 3, &Slot::ALL, &mut rng).unwrap();
        assert_eq!(plan.slot_count(), 9);
        assert!(plan.entries().all(|(_, _, title)| title == "Omelette"));
    }

    #[test]
    fn test_first_pass_has_no_repeats() {
        let mut rng = StdRng::seed_from_u64(3);
        let titles = ["A", "B", "C", "D", "E", "F"];
        let plan = assemble_plan(recipes(&titles), 2, &Slot::ALL, &mut rng).unwrap();
        let assigned: HashSet<&str> = plan.entries().map(|(_, _, t)| t).collect();
        assert_eq!(assigned.len(), titles.len());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let titles = ["A", "B", "C", "D", "E"];
        let first = assemble_plan(recipes(&titles), 4, &Slot::ALL, &mut StdRng::seed_from_u64(9));
        let second = assemble_plan(recipes(&titles), 4, &Slot::ALL, &mut StdRng::seed_from_u64(9));
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn test_custom_slot_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let plan =
            assemble_plan(recipes(&["A"]), 2, &[Slot::Evening, Slot::Morning], &mut rng).unwrap();
        assert_eq!(plan.slot_count(), 4);
        assert_eq!(plan.get(1, Slot::Midday), None);
    }

    #[test]
    fn test_rejects_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = assemble_plan(Vec::new(), 3, &Slot::ALL, &mut rng);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_zero_days() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = assemble_plan(recipes(&["A"]), 0, &Slot::ALL, &mut rng);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
