use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Meal, Plan, PlanStructure, ShoppingListItem, Slot},
    routes::{
        extract::{ApiPath, ApiQuery},
        AppState,
    },
    services,
};

#[derive(Debug, Deserialize)]
pub struct CreatePlanQuery {
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlanResponse {
    pub message: String,
    pub plan_id: Uuid,
    pub preview: PlanStructure,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceMealQuery {
    pub day: u32,
    pub slot: String,
    pub recipe_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReplaceMealResponse {
    pub message: String,
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub url: String,
}

/// Generates a plan for the user and stores it with its shopping list
pub async fn create_plan(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    ApiPath(user_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<CreatePlanQuery>,
) -> AppResult<(StatusCode, Json<CreatePlanResponse>)> {
    let days = query.days.unwrap_or(state.default_days);

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        days,
        "Processing plan request"
    );

    let created = services::create_plan(
        state.store.as_ref(),
        state.generator.as_ref(),
        state.unit_policy.as_ref(),
        user_id,
        days,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePlanResponse {
            message: format!("Meal plan for {} day(s) generated", days),
            plan_id: created.plan.id,
            preview: created.structure,
        }),
    ))
}

pub async fn get_plan(
    State(state): State<Arc<AppState>>,
    ApiPath(plan_id): ApiPath<Uuid>,
) -> AppResult<Json<Plan>> {
    Ok(Json(state.store.get_plan(plan_id).await?))
}

/// Shopping list of a plan; a plan without items is reported as missing
pub async fn shopping_list(
    State(state): State<Arc<AppState>>,
    ApiPath(plan_id): ApiPath<Uuid>,
) -> AppResult<Json<Vec<ShoppingListItem>>> {
    let items = state.store.shopping_list(plan_id).await?;
    if items.is_empty() {
        return Err(AppError::NotFound(format!(
            "No shopping list for plan {}",
            plan_id
        )));
    }
    Ok(Json(items))
}

/// Swaps the recipe of one meal
pub async fn replace_meal(
    State(state): State<Arc<AppState>>,
    ApiPath(plan_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ReplaceMealQuery>,
) -> AppResult<Json<ReplaceMealResponse>> {
    if query.day == 0 {
        return Err(AppError::InvalidInput(
            "Day numbers start at 1".to_string(),
        ));
    }
    let slot: Slot = query.slot.parse()?;

    let meal = state
        .store
        .replace_meal(plan_id, query.day, slot, query.recipe_id)
        .await?;

    tracing::info!(
        plan_id = %plan_id,
        meal_id = %meal.id,
        day = query.day,
        slot = %slot,
        recipe_id = %query.recipe_id,
        "Meal customized"
    );

    Ok(Json(ReplaceMealResponse {
        message: "Meal updated".to_string(),
        meal,
    }))
}

/// Creates a public link to the plan's shopping list
pub async fn share_plan(
    State(state): State<Arc<AppState>>,
    ApiPath(plan_id): ApiPath<Uuid>,
) -> AppResult<Json<ShareResponse>> {
    let token = state.store.create_share_token(plan_id).await?;
    Ok(Json(ShareResponse {
        url: format!("{}/share/shopping-list/{}", state.share_base_url, token),
    }))
}

pub async fn shared_shopping_list(
    State(state): State<Arc<AppState>>,
    ApiPath(token): ApiPath<Uuid>,
) -> AppResult<Json<Vec<ShoppingListItem>>> {
    let plan_id = state.store.resolve_share_token(token).await?;
    Ok(Json(state.store.shopping_list(plan_id).await?))
}
