use crate::models::{DietaryProfile, Recipe, TagSet};

/// Builds the set of tags a recipe must carry to suit `profile`
///
/// Regime and objective count only when present and different from
/// `none_marker`. Allergies are unioned in as required tags, not used to
/// exclude recipes.
pub fn required_tags(profile: &DietaryProfile, none_marker: &str) -> TagSet {
    let none_marker = none_marker.trim().to_lowercase();
    let mut required = TagSet::new();

    for value in [&profile.regime, &profile.objective].into_iter().flatten() {
        if value.trim().to_lowercase() != none_marker {
            required.insert(value);
        }
    }

    for allergy in &profile.allergies {
        required.insert(allergy);
    }

    required
}

/// Returns the catalog recipes whose tags are a superset of `required`,
/// in catalog order
///
/// Recipes without a tag string are always skipped, even when nothing is
/// required.
pub fn compatible_recipes<'a, I>(required: &TagSet, catalog: I) -> Vec<Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    catalog
        .into_iter()
        .filter(|recipe| match &recipe.tags {
            Some(tags) => required.is_subset(tags),
            None => false,
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn profile(regime: Option<&str>, objective: Option<&str>, allergies: &[&str]) -> DietaryProfile {
        DietaryProfile {
            user_id: Uuid::new_v4(),
            regime: regime.map(str::to_string),
            objective: objective.map(str::to_string),
            allergies: allergies.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn titles(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_required_tags_union() {
        let p = profile(Some(" Vegetarian"), Some("Weight-Loss"), &["Peanuts ", "milk"]);
        let required = required_tags(&p, "aucun");
        assert_eq!(required.to_string(), "milk, peanuts, vegetarian, weight-loss");
    }

    #[test]
    fn test_none_marker_is_not_a_tag() {
        let p = profile(Some("AUCUN"), Some("aucun"), &[]);
        assert!(required_tags(&p, "aucun").is_empty());

        // a different marker makes "aucun" a literal tag again
        let required = required_tags(&p, "none");
        assert!(required.contains("aucun"));
    }

    #[test]
    fn test_vegetarian_keeps_only_salad() {
        let catalog = vec![
            Recipe::new("Salad", Some("vegetarian, gluten-free")),
            Recipe::new("Steak", Some("carnivore")),
        ];
        let required = required_tags(&profile(Some("vegetarian"), None, &[]), "aucun");

        let result = compatible_recipes(&required, &catalog);
        assert_eq!(titles(&result), vec!["Salad"]);
    }

    #[test]
    fn test_result_is_superset_of_required() {
        let catalog = vec![
            Recipe::new("A", Some("vegan, peanuts, high-protein")),
            Recipe::new("B", Some("vegan")),
            Recipe::new("C", Some("Peanuts,VEGAN")),
            Recipe::new("D", None),
        ];
        let required = required_tags(&profile(Some("vegan"), None, &["peanuts"]), "aucun");

        let result = compatible_recipes(&required, &catalog);
        assert_eq!(titles(&result), vec!["A", "C"]);
        for recipe in &result {
            assert!(required.is_subset(recipe.tags.as_ref().unwrap()));
        }
    }

    #[test]
    fn test_empty_requirements_keep_present_tags_only() {
        let catalog = vec![
            Recipe::new("Tagged", Some("vegan")),
            Recipe::new("Blank", Some("")),
            Recipe::new("Untagged", None),
        ];
        let required = required_tags(&profile(None, None, &[]), "aucun");
        assert!(required.is_empty());

        let result = compatible_recipes(&required, &catalog);
        assert_eq!(titles(&result), vec!["Tagged", "Blank"]);
    }

    #[test]
    fn test_untagged_never_matches_requirements() {
        let catalog = vec![Recipe::new("Untagged", None), Recipe::new("Blank", Some(""))];
        let required = required_tags(&profile(Some("vegan"), None, &[]), "aucun");
        assert!(compatible_recipes(&required, &catalog).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_and_stable() {
        let catalog: Vec<Recipe> = (0..10)
            .map(|i| {
                let tags = if i % 2 == 0 { "vegan, quick" } else { "quick" };
                Recipe::new(format!("R{i}"), Some(tags))
            })
            .collect();
        let required = required_tags(&profile(None, Some("quick"), &[]), "aucun");

        let first = compatible_recipes(&required, &catalog);
        let second = compatible_recipes(&required, &catalog);
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        assert_eq!(titles(&first)[..3], ["R0", "R1", "R2"]);
    }
}
