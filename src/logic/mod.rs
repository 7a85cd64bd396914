pub mod assistant;
pub mod budget;
pub mod calculations;
pub mod messages;
pub mod rules;
pub mod thresholds;

pub use assistant::{respond, AssistantQuery, AssistantReply};
pub use budget::{compute_water_budget, BudgetPolicy, ClassificationPolicy, WaterBudgetEngine};
pub use rules::AdvisoryEngine;
