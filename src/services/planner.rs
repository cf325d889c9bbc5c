use std::sync::Arc;

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

use crate::{
    config::PlannerConfig,
    db::{ProfileStore, RecipeCatalog},
    error::{AppError, AppResult},
    models::{PlanStructure, Recipe},
    services::{assembler::assemble_plan, filter},
};

/// Produces a day-by-slot plan for a user
///
/// The local filter-and-assemble planner is the default implementation;
/// other generators (e.g. model-backed ones) plug in behind this trait.
#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Fails with `NotFound` when the user or profile is missing,
    /// `NoCompatibleRecipes` when nothing suits the profile and
    /// `InvalidInput` for a day count of zero or above the configured cap.
    async fn generate_plan(&self, user_id: Uuid, days: u32) -> AppResult<PlanStructure>;

    /// Generator name for logging
    fn name(&self) -> &'static str;
}

/// Plans from the recipe catalog filtered by the user's dietary profile
pub struct LocalPlanner<P: ?Sized, C: ?Sized> {
    profiles: Arc<P>,
    catalog: Arc<C>,
    config: PlannerConfig,
}

impl<P, C> LocalPlanner<P, C>
where
    P: ProfileStore + ?Sized,
    C: RecipeCatalog + ?Sized,
{
    pub fn new(profiles: Arc<P>, catalog: Arc<C>, config: PlannerConfig) -> Self {
        Self {
            profiles,
            catalog,
            config,
        }
    }

    /// Catalog recipes compatible with the user's profile, in catalog order
    pub async fn compatible_recipes(&self, user_id: Uuid) -> AppResult<Vec<Recipe>> {
        let profile = self.profiles.get_profile(user_id).await?;
        let required = filter::required_tags(&profile, &self.config.none_marker);
        let catalog = self.catalog.all_recipes().await?;

        let compatible = filter::compatible_recipes(&required, &catalog);

        tracing::info!(
            user_id = %user_id,
            required = %required,
            catalog = catalog.len(),
            compatible = compatible.len(),
            "Filtered recipe catalog"
        );

        if compatible.is_empty() {
            return Err(AppError::NoCompatibleRecipes(user_id));
        }
        Ok(compatible)
    }
}

#[async_trait]
impl<P, C> PlanGenerator for LocalPlanner<P, C>
where
    P: ProfileStore + ?Sized,
    C: RecipeCatalog + ?Sized,
{
    async fn generate_plan(&self, user_id: Uuid, days: u32) -> AppResult<PlanStructure> {
        if days == 0 {
            return Err(AppError::InvalidInput(
                "Number of days must be positive".to_string(),
            ));
        }
        if days > self.config.max_days {
            return Err(AppError::InvalidInput(format!(
                "A plan covers at most {} days, {} requested",
                self.config.max_days, days
            )));
        }

        let candidates = self.compatible_recipes(user_id).await?;
        let mut rng = StdRng::from_entropy();
        assemble_plan(candidates, days, &self.config.slots, &mut rng)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockProfileStore, MockRecipeCatalog};
    use crate::models::{DietaryProfile, Slot};

    fn profile(user_id: Uuid, regime: Option<&str>) -> DietaryProfile {
        DietaryProfile {
            user_id,
            regime: regime.map(str::to_string),
            objective: None,
            allergies: vec![],
        }
    }

    fn planner(
        profiles: MockProfileStore,
        catalog: MockRecipeCatalog,
    ) -> LocalPlanner<MockProfileStore, MockRecipeCatalog> {
        LocalPlanner::new(
            Arc::new(profiles),
            Arc::new(catalog),
            PlannerConfig::default(),
        )
    }

    #[test]
    fn test_generate_plan_uses_only_compatible_recipes() {
        let user_id = Uuid::new_v4();
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get_profile()
            .returning(move |id| Ok(profile(id, Some("vegetarian"))));
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().times(1).returning(|| {
            Ok(vec![
                Recipe::new("Salad", Some("vegetarian, gluten-free")),
                Recipe::new("Steak", Some("carnivore")),
            ])
        });

        let plan = tokio_test::block_on(planner(profiles, catalog).generate_plan(user_id, 2))
            .unwrap();

        assert_eq!(plan.slot_count(), 6);
        assert!(plan.entries().all(|(_, _, title)| title == "Salad"));
        assert_eq!(plan.get(2, Slot::Evening), Some("Salad"));
    }

    #[test]
    fn test_missing_profile_is_not_found() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get_profile()
            .returning(|id| Err(AppError::NotFound(format!("Profile for user {} not found", id))));
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().never();

        let result =
            tokio_test::block_on(planner(profiles, catalog).generate_plan(Uuid::new_v4(), 3));
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_no_compatible_recipes() {
        let user_id = Uuid::new_v4();
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get_profile()
            .returning(move |id| Ok(profile(id, Some("vegan"))));
        let mut catalog = MockRecipeCatalog::new();
        catalog
            .expect_all_recipes()
            .returning(|| Ok(vec![Recipe::new("Steak", Some("carnivore")), Recipe::new("Bread", None)]));

        let result = tokio_test::block_on(planner(profiles, catalog).generate_plan(user_id, 3));
        assert!(matches!(result, Err(AppError::NoCompatibleRecipes(id)) if id == user_id));
    }

    #[test]
    fn test_zero_days_rejected_before_lookup() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_get_profile().never();
        let catalog = MockRecipeCatalog::new();

        let result =
            tokio_test::block_on(planner(profiles, catalog).generate_plan(Uuid::new_v4(), 0));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_day_count_above_cap_rejected_before_lookup() {
        let mut profiles = MockProfileStore::new();
        profiles.expect_get_profile().never();
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().never();
        let planner = planner(profiles, catalog);

        let result = tokio_test::block_on(planner.generate_plan(Uuid::new_v4(), 32));
        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg.contains("31")));

        let result = tokio_test::block_on(planner.generate_plan(Uuid::new_v4(), u32::MAX));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_none_marker_profile_accepts_every_tagged_recipe() {
        let mut profiles = MockProfileStore::new();
        profiles
            .expect_get_profile()
            .returning(|id| Ok(profile(id, Some("Aucun"))));
        let mut catalog = MockRecipeCatalog::new();
        catalog.expect_all_recipes().returning(|| {
            Ok(vec![
                Recipe::new("Salad", Some("vegetarian")),
                Recipe::new("Steak", Some("carnivore")),
                Recipe::new("Mystery", None),
            ])
        });

        let recipes =
            tokio_test::block_on(planner(profiles, catalog).compatible_recipes(Uuid::new_v4()))
                .unwrap();
        let titles: Vec<&str> = recipes.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Salad", "Steak"]);
    }
}
