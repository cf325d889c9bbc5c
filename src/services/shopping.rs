use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    config::UnitPolicyKind,
    error::{AppError, AppResult},
    models::{IngredientLine, ShoppingListItem},
};

/// Decides which unit an aggregated ingredient ends up with
pub trait AggregationPolicy: Send + Sync {
    /// `current` is the unit recorded so far (`None` on first occurrence),
    /// `incoming` the unit of the line being added.
    fn merge_unit(
        &self,
        ingredient: &str,
        current: Option<&str>,
        incoming: &str,
    ) -> AppResult<String>;
}

/// Later occurrences overwrite the unit without any consistency check
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteWins;

impl AggregationPolicy for LastWriteWins {
    fn merge_unit(
        &self,
        _ingredient: &str,
        _current: Option<&str>,
        incoming: &str,
    ) -> AppResult<String> {
        Ok(incoming.to_string())
    }
}

/// Rejects an ingredient that shows up with two different units
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictUnits;

impl AggregationPolicy for StrictUnits {
    fn merge_unit(
        &self,
        ingredient: &str,
        current: Option<&str>,
        incoming: &str,
    ) -> AppResult<String> {
        match current {
            Some(unit) if !unit.eq_ignore_ascii_case(incoming) => {
                Err(AppError::InvalidInput(format!(
                    "Ingredient '{}' is measured in both '{}' and '{}'",
                    ingredient, unit, incoming
                )))
            }
            _ => Ok(incoming.to_string()),
        }
    }
}

impl UnitPolicyKind {
    pub fn policy(self) -> Box<dyn AggregationPolicy> {
        match self {
            UnitPolicyKind::LastWriteWins => Box::new(LastWriteWins),
            UnitPolicyKind::Strict => Box::new(StrictUnits),
        }
    }
}

#[derive(Debug)]
struct Entry {
    name: String,
    quantity: f64,
    unit: String,
}

/// Sums ingredient quantities across the meals of a plan
///
/// Entries are keyed by ingredient name and keep first-seen order.
pub struct ShoppingListBuilder<'a> {
    policy: &'a dyn AggregationPolicy,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl<'a> ShoppingListBuilder<'a> {
    pub fn new(policy: &'a dyn AggregationPolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn add(&mut self, line: &IngredientLine) -> AppResult<()> {
        let quantity = line.quantity.unwrap_or(1.0);
        let incoming = line.unit.as_deref().unwrap_or("");

        match self.index.get(&line.name).copied() {
            Some(i) => {
                let entry = &mut self.entries[i];
                entry.unit = self
                    .policy
                    .merge_unit(&entry.name, Some(&entry.unit), incoming)?;
                entry.quantity += quantity;
            }
            None => {
                let unit = self.policy.merge_unit(&line.name, None, incoming)?;
                self.index.insert(line.name.clone(), self.entries.len());
                self.entries.push(Entry {
                    name: line.name.clone(),
                    quantity,
                    unit,
                });
            }
        }
        Ok(())
    }

    pub fn add_all<'l>(
        &mut self,
        lines: impl IntoIterator<Item = &'l IngredientLine>,
    ) -> AppResult<()> {
        for line in lines {
            self.add(line)?;
        }
        Ok(())
    }

    pub fn build(self, plan_id: Uuid) -> Vec<ShoppingListItem> {
        self.entries
            .into_iter()
            .map(|entry| ShoppingListItem {
                id: Uuid::new_v4(),
                plan_id,
                ingredient: entry.name,
                quantity: entry.quantity,
                unit: entry.unit,
            })
            .collect()
    }
}
