use serde::Deserialize;

use crate::models::Slot;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// PostgreSQL database connection URL. When unset the service runs on
    /// the in-memory store.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL used when building shopping-list share links
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,

    /// Origin allowed by the CORS layer (the web frontend)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Number of days planned when the request does not say
    #[serde(default = "default_plan_days")]
    pub default_plan_days: u32,

    /// Largest day count a single plan request may ask for
    #[serde(default = "default_max_plan_days")]
    pub max_plan_days: u32,

    /// Regime/objective value meaning "no constraint"
    #[serde(default = "default_none_marker")]
    pub none_marker: String,

    /// How units are merged when aggregating the shopping list
    #[serde(default)]
    pub unit_policy: UnitPolicyKind,
}

/// Selects the shopping-list unit aggregation policy
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnitPolicyKind {
    /// Each later occurrence overwrites the unit
    #[default]
    LastWriteWins,
    /// Mismatching units for the same ingredient are rejected
    Strict,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_share_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_plan_days() -> u32 {
    3
}

fn default_max_plan_days() -> u32 {
    31
}

fn default_none_marker() -> String {
    "aucun".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Planner settings derived from this configuration
    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig {
            slots: Slot::ALL.to_vec(),
            default_days: self.default_plan_days,
            max_days: self.max_plan_days,
            none_marker: self.none_marker.clone(),
            unit_policy: self.unit_policy,
        }
    }
}

/// Settings handed to the planner instead of module-level constants
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Slots filled for each day, in assignment order
    pub slots: Vec<Slot>,
    pub default_days: u32,
    /// Upper bound on the day count of one plan
    pub max_days: u32,
    pub none_marker: String,
    pub unit_policy: UnitPolicyKind,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            slots: Slot::ALL.to_vec(),
            default_days: default_plan_days(),
            max_days: default_max_plan_days(),
            none_marker: default_none_marker(),
            unit_policy: UnitPolicyKind::default(),
        }
    }
}
