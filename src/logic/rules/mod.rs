pub mod crop_fit;
pub mod engine;
pub mod rainfall;
pub mod risk;
pub mod soil_moisture;
pub mod water_balance;

pub use engine::AdvisoryEngine;

use crate::models::{Advisory, AdvisoryCategory, FarmInput, WaterBudgetResult};

/// Trait for water budget advisory rules
pub trait AdvisoryRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Category of the advisories this rule emits
    fn category(&self) -> AdvisoryCategory;

    /// Evaluate the rule and return an advisory if conditions are met
    fn evaluate(&self, result: &WaterBudgetResult, input: &FarmInput) -> Option<Advisory>;
}
