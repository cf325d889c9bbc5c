use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::PlannerConfig,
    db::Store,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{AggregationPolicy, LocalPlanner, PlanGenerator},
};

pub mod extract;
pub mod plans;
pub mod recipes;
pub mod users;

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Local planner, also used to list compatible recipes
    pub planner: Arc<LocalPlanner<dyn Store, dyn Store>>,
    /// Generator used for plan creation
    pub generator: Arc<dyn PlanGenerator>,
    pub unit_policy: Arc<dyn AggregationPolicy>,
    pub default_days: u32,
    pub share_base_url: String,
}

impl AppState {
    /// Wires the local planner on top of `store`
    pub fn new(store: Arc<dyn Store>, config: PlannerConfig, share_base_url: String) -> Self {
        let unit_policy: Arc<dyn AggregationPolicy> = Arc::from(config.unit_policy.policy());
        let default_days = config.default_days;
        let planner = Arc::new(LocalPlanner::new(store.clone(), store.clone(), config));

        Self {
            store,
            generator: planner.clone(),
            planner,
            unit_policy,
            default_days,
            share_base_url: share_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Replaces the plan generator, keeping the local planner for recipe listing
    pub fn with_generator(mut self, generator: Arc<dyn PlanGenerator>) -> Self {
        self.generator = generator;
        self
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Users and profiles
        .route("/users", post(users::create_user))
        .route("/users/:user_id", get(users::get_user))
        .route(
            "/users/:user_id/profile",
            get(users::get_profile).put(users::upsert_profile),
        )
        .route(
            "/users/:user_id/compatible-recipes",
            get(users::compatible_recipes),
        )
        .route("/users/:user_id/shopping-list", get(users::latest_shopping_list))
        .route("/users/:user_id/plans", post(plans::create_plan))
        // Plans
        .route("/plans/:plan_id", get(plans::get_plan))
        .route("/plans/:plan_id/shopping-list", get(plans::shopping_list))
        .route("/plans/:plan_id/meals", put(plans::replace_meal))
        .route("/plans/:plan_id/share", post(plans::share_plan))
        .route("/shared/:token/shopping-list", get(plans::shared_shopping_list))
        // Catalog
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/:recipe_id",
            get(recipes::get_recipe).delete(recipes::delete_recipe),
        )
        .route(
            "/recipes/:recipe_id/ingredients",
            post(recipes::add_ingredient),
        )
        .route(
            "/ingredients",
            get(recipes::list_ingredients).post(recipes::create_ingredient),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
