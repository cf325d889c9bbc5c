use chrono::{DateTime, NaiveDate, Utc};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use std::{collections::BTreeMap, fmt::Display, str::FromStr};
use uuid::Uuid;

use crate::error::AppError;

/// Meal position within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Midday,
    Evening,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Morning, Slot::Midday, Slot::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Midday => "midday",
            Slot::Evening => "evening",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(Slot::Morning),
            "midday" => Ok(Slot::Midday),
            "evening" => Ok(Slot::Evening),
            other => Err(AppError::InvalidInput(format!(
                "Unknown meal slot '{}', expected morning, midday or evening",
                other
            ))),
        }
    }
}

/// Recipe titles assigned to each slot of one day
pub type DayPlan = BTreeMap<Slot, String>;

/// Day-by-slot assignment produced by a plan generator
///
/// Serializes as `{"day_1": {"morning": "...", ...}, "day_2": ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanStructure {
    days: BTreeMap<u32, DayPlan>,
}

impl PlanStructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `title` for (`day`, `slot`), replacing any previous assignment
    pub fn assign(&mut self, day: u32, slot: Slot, title: impl Into<String>) {
        self.days.entry(day).or_default().insert(slot, title.into());
    }

    pub fn get(&self, day: u32, slot: Slot) -> Option<&str> {
        self.days.get(&day)?.get(&slot).map(String::as_str)
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of assigned slots across all days
    pub fn slot_count(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    /// Iterates (day, slot, title) in day then slot order
    pub fn entries(&self) -> impl Iterator<Item = (u32, Slot, &str)> {
        self.days.iter().flat_map(|(day, slots)| {
            slots
                .iter()
                .map(move |(slot, title)| (*day, *slot, title.as_str()))
        })
    }
}

impl Serialize for PlanStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, slots) in &self.days {
            map.serialize_entry(&format!("day_{}", day), slots)?;
        }
        map.end()
    }
}

/// A persisted meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub meals: Vec<Meal>,
}

/// One slot of a persisted plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub day: u32,
    pub slot: Slot,
    pub recipe_id: Uuid,
    /// Set once the user swapped the generated recipe
    pub customized: bool,
}

/// Aggregated shopping-list entry of a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListItem {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
}

/// Everything written when a plan is created; stores persist it atomically
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    pub plan: Plan,
    pub shopping_list: Vec<ShoppingListItem>,
}
