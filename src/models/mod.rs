pub mod advisory;
pub mod budget;
pub mod farm;
pub mod reference;
pub mod season;
pub mod sensor;

pub use advisory::*;
pub use budget::*;
pub use farm::*;
pub use reference::*;
pub use season::*;
pub use sensor::*;
