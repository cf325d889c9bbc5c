use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Dietary profile attached to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietaryProfile {
    pub user_id: Uuid,
    /// Dietary category, e.g. "vegetarian"
    pub regime: Option<String>,
    /// Goal, e.g. "weight-loss"
    pub objective: Option<String>,
    /// Allergy/exclusion tags as entered by the user
    pub allergies: Vec<String>,
}

/// Body of a profile create-or-update request
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ProfileInput {
    #[serde(default)]
    pub regime: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    /// Accepts either `["peanuts", "milk"]` or `"peanuts, milk"`; list entries
    /// are split on commas too so they survive the comma-separated column
    #[serde(default, deserialize_with = "allergies_from_list_or_csv")]
    pub allergies: Vec<String>,
}

impl ProfileInput {
    pub fn into_profile(self, user_id: Uuid) -> DietaryProfile {
        DietaryProfile {
            user_id,
            regime: self.regime,
            objective: self.objective,
            allergies: self.allergies,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AllergySource {
    List(Vec<String>),
    Csv(String),
}

/// Splits a comma-separated allergy column into individual entries
pub fn split_allergies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn allergies_from_list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let source = Option::<AllergySource>::deserialize(deserializer)?;
    Ok(match source {
        Some(AllergySource::List(list)) => list.iter().flat_map(|a| split_allergies(a)).collect(),
        Some(AllergySource::Csv(raw)) => split_allergies(&raw),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allergies_as_list() {
        let input: ProfileInput =
            serde_json::from_str(r#"{"regime": "vegan", "allergies": ["Peanuts", "milk"]}"#)
                .unwrap();
        assert_eq!(input.regime.as_deref(), Some("vegan"));
        assert_eq!(input.allergies, vec!["Peanuts", "milk"]);
    }

    #[test]
    fn test_list_entries_split_like_stored_column() {
        let input: ProfileInput =
            serde_json::from_str(r#"{"allergies": ["peanuts,milk", " ", "soy"]}"#).unwrap();
        assert_eq!(input.allergies, vec!["peanuts", "milk", "soy"]);
        assert_eq!(
            split_allergies(&input.allergies.join(", ")),
            input.allergies
        );
    }

    #[test]
    fn test_allergies_as_csv() {
        let input: ProfileInput =
            serde_json::from_str(r#"{"allergies": "Peanuts , milk,"}"#).unwrap();
        assert_eq!(input.allergies, vec!["Peanuts", "milk"]);
    }

    #[test]
    fn test_missing_or_null_fields() {
        let input: ProfileInput = serde_json::from_str(r#"{"allergies": null}"#).unwrap();
        assert_eq!(input, ProfileInput::default());
    }
}
