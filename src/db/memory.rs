use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        DietaryProfile, Ingredient, IngredientLine, Meal, NewPlan, Plan, Recipe,
        ShoppingListItem, Slot, User,
    },
};

use super::{PlanStore, ProfileStore, RecipeCatalog, UserStore};

/// Recipe as stored, with unresolved ingredient links
struct StoredRecipe {
    recipe: Recipe,
    links: Vec<(Uuid, Option<f64>)>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    profiles: HashMap<Uuid, DietaryProfile>,
    recipes: Vec<StoredRecipe>,
    ingredients: Vec<Ingredient>,
    plans: Vec<Plan>,
    shopping_lists: HashMap<Uuid, Vec<ShoppingListItem>>,
    share_tokens: HashMap<Uuid, Uuid>,
}

impl Inner {
    fn resolve(&self, stored: &StoredRecipe) -> Recipe {
        let mut recipe = stored.recipe.clone();
        recipe.ingredients = stored
            .links
            .iter()
            .filter_map(|(ingredient_id, quantity)| {
                self.ingredients
                    .iter()
                    .find(|i| i.id == *ingredient_id)
                    .map(|i| IngredientLine {
                        ingredient_id: i.id,
                        name: i.name.clone(),
                        quantity: *quantity,
                        unit: i.unit.clone(),
                    })
            })
            .collect();
        recipe
    }

    fn recipe(&self, id: Uuid) -> AppResult<&StoredRecipe> {
        self.recipes
            .iter()
            .find(|r| r.recipe.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    fn plan(&self, id: Uuid) -> AppResult<&Plan> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Plan {} not found", id)))
    }
}

/// Process-local store backed by a single `RwLock`
///
/// Used when no database is configured and by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: User) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::InvalidInput(format!(
                "Email {} is already registered",
                user.email
            )));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        let inner = self.inner.read().await;
        inner
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<DietaryProfile> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }
        inner
            .profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Profile for user {} not found", user_id)))
    }

    async fn upsert_profile(&self, profile: DietaryProfile) -> AppResult<DietaryProfile> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&profile.user_id) {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                profile.user_id
            )));
        }
        inner.profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl RecipeCatalog for MemoryStore {
    async fn all_recipes(&self) -> AppResult<Vec<Recipe>> {
        let inner = self.inner.read().await;
        Ok(inner.recipes.iter().map(|r| inner.resolve(r)).collect())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Recipe> {
        let inner = self.inner.read().await;
        inner
            .recipes
            .iter()
            .find(|r| r.recipe.title == title)
            .map(|r| inner.resolve(r))
            .ok_or_else(|| AppError::NotFound(format!("Recipe '{}' not found", title)))
    }

    async fn get_recipe(&self, id: Uuid) -> AppResult<Recipe> {
        let inner = self.inner.read().await;
        let stored = inner.recipe(id)?;
        Ok(inner.resolve(stored))
    }

    async fn create_recipe(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        let mut inner = self.inner.write().await;
        if inner.recipes.iter().any(|r| r.recipe.title == recipe.title) {
            return Err(AppError::InvalidInput(format!(
                "Recipe '{}' already exists",
                recipe.title
            )));
        }
        recipe.ingredients.clear();
        inner.recipes.push(StoredRecipe {
            recipe: recipe.clone(),
            links: Vec::new(),
        });
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.recipe(id)?;
        let in_use = inner
            .plans
            .iter()
            .flat_map(|p| p.meals.iter())
            .any(|m| m.recipe_id == id);
        if in_use {
            return Err(AppError::InvalidInput(format!(
                "Recipe {} is used by a meal plan",
                id
            )));
        }
        inner.recipes.retain(|r| r.recipe.id != id);
        Ok(())
    }

    async fn all_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        Ok(self.inner.read().await.ingredients.clone())
    }

    async fn create_ingredient(&self, ingredient: Ingredient) -> AppResult<Ingredient> {
        self.inner.write().await.ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn add_recipe_ingredient(
        &self,
        recipe_id: Uuid,
        ingredient_id: Uuid,
        quantity: Option<f64>,
    ) -> AppResult<Recipe> {
        let mut inner = self.inner.write().await;
        if !inner.ingredients.iter().any(|i| i.id == ingredient_id) {
            return Err(AppError::NotFound(format!(
                "Ingredient {} not found",
                ingredient_id
            )));
        }
        let position = inner
            .recipes
            .iter()
            .position(|r| r.recipe.id == recipe_id)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", recipe_id)))?;

        inner.recipes[position].links.push((ingredient_id, quantity));
        Ok(inner.resolve(&inner.recipes[position]))
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn save_plan(&self, new_plan: NewPlan) -> AppResult<Plan> {
        let mut inner = self.inner.write().await;
        let NewPlan {
            plan,
            shopping_list,
        } = new_plan;

        if !inner.users.contains_key(&plan.user_id) {
            return Err(AppError::NotFound(format!("User {} not found", plan.user_id)));
        }
        for meal in &plan.meals {
            inner.recipe(meal.recipe_id)?;
        }

        inner.shopping_lists.insert(plan.id, shopping_list);
        inner.plans.push(plan.clone());
        Ok(plan)
    }

    async fn get_plan(&self, id: Uuid) -> AppResult<Plan> {
        let inner = self.inner.read().await;
        inner.plan(id).cloned()
    }

    async fn latest_plan_for_user(&self, user_id: Uuid) -> AppResult<Option<Plan>> {
        let inner = self.inner.read().await;
        // plans are kept in creation order, so the last maximum wins ties
        Ok(inner
            .plans
            .iter()
            .filter(|p| p.user_id == user_id)
            .max_by_key(|p| (p.start_date, p.created_at))
            .cloned())
    }

    async fn shopping_list(&self, plan_id: Uuid) -> AppResult<Vec<ShoppingListItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .shopping_lists
            .get(&plan_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn replace_meal(
        &self,
        plan_id: Uuid,
        day: u32,
        slot: Slot,
        recipe_id: Uuid,
    ) -> AppResult<Meal> {
        let mut inner = self.inner.write().await;
        inner.plan(plan_id)?;
        inner.recipe(recipe_id)?;

        let meal = inner
            .plans
            .iter_mut()
            .filter(|p| p.id == plan_id)
            .flat_map(|p| p.meals.iter_mut())
            .find(|m| m.day == day && m.slot == slot)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No {} meal on day {} of plan {}",
                    slot, day, plan_id
                ))
            })?;

        meal.recipe_id = recipe_id;
        meal.customized = true;
        Ok(meal.clone())
    }

    async fn create_share_token(&self, plan_id: Uuid) -> AppResult<Uuid> {
        let mut inner = self.inner.write().await;
        inner.plan(plan_id)?;
        let token = Uuid::new_v4();
        inner.share_tokens.insert(token, plan_id);
        Ok(token)
    }

    async fn resolve_share_token(&self, token: Uuid) -> AppResult<Uuid> {
        let inner = self.inner.read().await;
        inner
            .share_tokens
            .get(&token)
            .copied()
            .ok_or_else(|| AppError::NotFound("Unknown share link".to_string()))
    }
}
