pub mod gauge;
pub mod input;
pub mod nav;

pub use gauge::{coverage_gauge, moisture_gauge, volume_gauge};
pub use input::InputWidget;
pub use nav::NavBar;
