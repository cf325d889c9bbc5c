pub mod assembler;
pub mod filter;
pub mod planner;
pub mod plans;
pub mod shopping;

pub use planner::{LocalPlanner, PlanGenerator};
pub use plans::{create_plan, materialize_plan, CreatedPlan};
pub use shopping::{AggregationPolicy, LastWriteWins, ShoppingListBuilder, StrictUnits};
