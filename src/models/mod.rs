mod plan;
mod profile;
mod recipe;
mod tags;
mod user;

pub use plan::{DayPlan, Meal, NewPlan, Plan, PlanStructure, ShoppingListItem, Slot};
pub use profile::{split_allergies, DietaryProfile, ProfileInput};
pub use recipe::{
    AddRecipeIngredientRequest, CreateIngredientRequest, CreateRecipeRequest, Ingredient,
    IngredientLine, Recipe,
};
pub use tags::TagSet;
pub use user::{CreateUserRequest, User};
