pub mod assistant;
pub mod budget;
pub mod farm;
pub mod season;

pub use assistant::AssistantScreen;
pub use budget::BudgetScreen;
pub use farm::FarmScreen;
pub use season::SeasonScreen;
