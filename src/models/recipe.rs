use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TagSet;

/// A recipe from the catalog, with its ingredient lines resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub calories: i32,
    /// Constraint tags; `None` means the recipe declares nothing and never
    /// satisfies a profile
    pub tags: Option<TagSet>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
}

impl Recipe {
    /// Creates a recipe without ingredients
    pub fn new(title: impl Into<String>, tags: Option<&str>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            instructions: String::new(),
            calories: 0,
            tags: tags.map(TagSet::parse),
            ingredients: Vec::new(),
        }
    }
}

/// Ingredient as it appears in a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientLine {
    pub ingredient_id: Uuid,
    pub name: String,
    /// Missing quantities count as one unit on the shopping list
    pub quantity: Option<f64>,
    pub unit: Option<String>,
}

/// Catalog ingredient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub unit: Option<String>,
}

/// Body of a recipe creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub calories: i32,
    #[serde(default)]
    pub tags: Option<TagSet>,
}

impl CreateRecipeRequest {
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            calories: self.calories,
            tags: self.tags,
            ingredients: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Links an existing ingredient to a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct AddRecipeIngredientRequest {
    pub ingredient_id: Uuid,
    #[serde(default)]
    pub quantity: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recipe_parses_tags() {
        let recipe = Recipe::new("Salad", Some("Vegetarian, gluten-free"));
        assert_eq!(recipe.title, "Salad");
        let tags = recipe.tags.unwrap();
        assert!(tags.contains("vegetarian"));
        assert!(tags.contains("gluten-free"));
    }

    #[test]
    fn test_create_request_keeps_absent_tags_absent() {
        let request: CreateRecipeRequest =
            serde_json::from_str(r#"{"title": "Bread", "calories": 250}"#).unwrap();
        let recipe = request.into_recipe();
        assert_eq!(recipe.tags, None);
        assert_eq!(recipe.calories, 250);

        let request: CreateRecipeRequest =
            serde_json::from_str(r#"{"title": "Water", "tags": ""}"#).unwrap();
        assert_eq!(request.into_recipe().tags, Some(TagSet::new()));
    }
}
