use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CreateUserRequest, DietaryProfile, ProfileInput, Recipe, ShoppingListItem, TagSet, User},
    routes::{
        extract::{ApiJson, ApiPath},
        AppState,
    },
};

/// Catalog entry returned by the compatible-recipes listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub calories: i32,
    pub tags: Option<TagSet>,
}

impl From<Recipe> for RecipeSummary {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            calories: recipe.calories,
            tags: recipe.tags,
        }
    }
}

/// Registers a user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.store.create_user(request.into_user()?).await?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AppResult<Json<User>> {
    Ok(Json(state.store.get_user(user_id).await?))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AppResult<Json<DietaryProfile>> {
    Ok(Json(state.store.get_profile(user_id).await?))
}

/// Creates the profile or replaces the existing one
pub async fn upsert_profile(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<ProfileInput>,
) -> AppResult<Json<DietaryProfile>> {
    let profile = state
        .store
        .upsert_profile(input.into_profile(user_id))
        .await?;
    tracing::info!(
        user_id = %user_id,
        regime = ?profile.regime,
        objective = ?profile.objective,
        allergies = profile.allergies.len(),
        "Profile saved"
    );
    Ok(Json(profile))
}

/// Recipes matching the user's dietary profile
pub async fn compatible_recipes(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AppResult<Json<Vec<RecipeSummary>>> {
    let recipes = state.planner.compatible_recipes(user_id).await?;
    Ok(Json(recipes.into_iter().map(RecipeSummary::from).collect()))
}

/// Shopping list of the user's most recent plan, empty when there is none
pub async fn latest_shopping_list(
    State(state): State<Arc<AppState>>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> AppResult<Json<Vec<ShoppingListItem>>> {
    let items = match state.store.latest_plan_for_user(user_id).await? {
        Some(plan) => state.store.shopping_list(plan.id).await?,
        None => Vec::new(),
    };
    Ok(Json(items))
}
