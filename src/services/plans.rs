use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{PlanStore, RecipeCatalog},
    error::AppResult,
    models::{Meal, NewPlan, Plan, PlanStructure},
    services::{planner::PlanGenerator, shopping::AggregationPolicy, ShoppingListBuilder},
};

/// Result of plan creation
#[derive(Debug, Clone, Serialize)]
pub struct CreatedPlan {
    pub plan: Plan,
    pub structure: PlanStructure,
}

/// Turns a plan structure into a plan, its meals and its shopping list
///
/// Recipes are looked up by title; a missing title aborts the whole plan.
pub async fn materialize_plan<C>(
    catalog: &C,
    user_id: Uuid,
    start_date: NaiveDate,
    structure: &PlanStructure,
    policy: &dyn AggregationPolicy,
) -> AppResult<NewPlan>
where
    C: RecipeCatalog + ?Sized,
{
    let plan_id = Uuid::new_v4();
    let mut meals = Vec::with_capacity(structure.slot_count());
    let mut shopping = ShoppingListBuilder::new(policy);

    for (day, slot, title) in structure.entries() {
        let recipe = catalog.find_by_title(title).await?;

        meals.push(Meal {
            id: Uuid::new_v4(),
            plan_id,
            day,
            slot,
            recipe_id: recipe.id,
            customized: false,
        });

        shopping.add_all(&recipe.ingredients)?;
    }

    Ok(NewPlan {
        plan: Plan {
            id: plan_id,
            user_id,
            start_date,
            created_at: Utc::now(),
            meals,
        },
        shopping_list: shopping.build(plan_id),
    })
}

/// Generates a plan for the user and persists it with its shopping list
pub async fn create_plan<S>(
    store: &S,
    generator: &dyn PlanGenerator,
    policy: &dyn AggregationPolicy,
    user_id: Uuid,
    days: u32,
) -> AppResult<CreatedPlan>
where
    S: RecipeCatalog + PlanStore + ?Sized,
{
    let structure = generator.generate_plan(user_id, days).await?;

    let new_plan = materialize_plan(
        store,
        user_id,
        Utc::now().date_naive(),
        &structure,
        policy,
    )
    .await?;
    let items = new_plan.shopping_list.len();
    let plan = store.save_plan(new_plan).await?;

    tracing::info!(
        user_id = %user_id,
        plan_id = %plan.id,
        generator = generator.name(),
        days,
        meals = plan.meals.len(),
        shopping_items = items,
        "Meal plan created"
    );

    Ok(CreatedPlan { plan, structure })
}
