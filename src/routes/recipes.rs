use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        AddRecipeIngredientRequest, CreateIngredientRequest, CreateRecipeRequest, Ingredient,
        Recipe,
    },
    routes::{
        extract::{ApiJson, ApiPath},
        AppState,
    },
};

pub async fn list_recipes(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Recipe>>> {
    Ok(Json(state.store.all_recipes().await?))
}

pub async fn create_recipe(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateRecipeRequest>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Recipe title must not be empty".to_string(),
        ));
    }
    let recipe = state.store.create_recipe(request.into_recipe()).await?;
    tracing::info!(recipe_id = %recipe.id, title = %recipe.title, "Recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn get_recipe(
    State(state): State<Arc<AppState>>,
    ApiPath(recipe_id): ApiPath<Uuid>,
) -> AppResult<Json<Recipe>> {
    Ok(Json(state.store.get_recipe(recipe_id).await?))
}

pub async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    ApiPath(recipe_id): ApiPath<Uuid>,
) -> AppResult<Json<Value>> {
    state.store.delete_recipe(recipe_id).await?;
    Ok(Json(json!({ "message": "Recipe deleted" })))
}

pub async fn add_ingredient(
    State(state): State<Arc<AppState>>,
    ApiPath(recipe_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<AddRecipeIngredientRequest>,
) -> AppResult<Json<Recipe>> {
    if request.quantity.is_some_and(|q| !q.is_finite() || q < 0.0) {
        return Err(AppError::InvalidInput(
            "Quantity must be a non-negative number".to_string(),
        ));
    }
    let recipe = state
        .store
        .add_recipe_ingredient(recipe_id, request.ingredient_id, request.quantity)
        .await?;
    Ok(Json(recipe))
}

pub async fn list_ingredients(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Ingredient>>> {
    Ok(Json(state.store.all_ingredients().await?))
}

pub async fn create_ingredient(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateIngredientRequest>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(
            "Ingredient name must not be empty".to_string(),
        ));
    }
    let ingredient = Ingredient {
        id: Uuid::new_v4(),
        name: name.to_string(),
        unit: request.unit,
    };
    Ok((
        StatusCode::CREATED,
        Json(state.store.create_ingredient(ingredient).await?),
    ))
}
