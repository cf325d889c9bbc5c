use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        DietaryProfile, Ingredient, Meal, NewPlan, Plan, Recipe, ShoppingListItem, Slot, User,
    },
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::{create_pool, PgStore};

/// User accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `InvalidInput` when the email is already registered
    async fn create_user(&self, user: User) -> AppResult<User>;

    async fn get_user(&self, id: Uuid) -> AppResult<User>;
}

/// Dietary profiles, one per user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fails with `NotFound` when either the user or their profile is missing
    async fn get_profile(&self, user_id: Uuid) -> AppResult<DietaryProfile>;

    /// Creates or replaces the profile of an existing user
    async fn upsert_profile(&self, profile: DietaryProfile) -> AppResult<DietaryProfile>;
}

/// Recipe catalog and ingredients
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// All recipes in catalog order
    async fn all_recipes(&self) -> AppResult<Vec<Recipe>>;

    /// The recipe carrying exactly `title` (titles are unique)
    async fn find_by_title(&self, title: &str) -> AppResult<Recipe>;

    async fn get_recipe(&self, id: Uuid) -> AppResult<Recipe>;

    /// Fails with `InvalidInput` when the title is already taken
    async fn create_recipe(&self, recipe: Recipe) -> AppResult<Recipe>;

    /// Fails with `InvalidInput` while a plan still uses the recipe
    async fn delete_recipe(&self, id: Uuid) -> AppResult<()>;

    async fn all_ingredients(&self) -> AppResult<Vec<Ingredient>>;

    async fn create_ingredient(&self, ingredient: Ingredient) -> AppResult<Ingredient>;

    async fn add_recipe_ingredient(
        &self,
        recipe_id: Uuid,
        ingredient_id: Uuid,
        quantity: Option<f64>,
    ) -> AppResult<Recipe>;
}

/// Plans, meals, shopping lists and share links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Persists a plan with its meals and shopping list; nothing is kept if
    /// any part fails
    async fn save_plan(&self, new_plan: NewPlan) -> AppResult<Plan>;

    async fn get_plan(&self, id: Uuid) -> AppResult<Plan>;

    /// Most recent plan by start date, then creation time
    async fn latest_plan_for_user(&self, user_id: Uuid) -> AppResult<Option<Plan>>;

    async fn shopping_list(&self, plan_id: Uuid) -> AppResult<Vec<ShoppingListItem>>;

    /// Points the meal at (`day`, `slot`) to another recipe and flags it as
    /// customized
    async fn replace_meal(
        &self,
        plan_id: Uuid,
        day: u32,
        slot: Slot,
        recipe_id: Uuid,
    ) -> AppResult<Meal>;

    async fn create_share_token(&self, plan_id: Uuid) -> AppResult<Uuid>;

    /// Plan id behind a share token
    async fn resolve_share_token(&self, token: Uuid) -> AppResult<Uuid>;
}

/// Everything the HTTP layer needs from persistence
pub trait Store: UserStore + ProfileStore + RecipeCatalog + PlanStore {}

impl<T> Store for T where T: UserStore + ProfileStore + RecipeCatalog + PlanStore {}
