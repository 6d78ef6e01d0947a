pub mod channel;
pub mod config;
pub mod constants;
pub mod curve;
pub mod effects;
pub mod error;
pub mod lightning;
pub mod mix;
pub mod rain;
pub mod telemetry;
pub mod transition;
pub mod weather;

pub use channel::*;
pub use config::*;
pub use effects::*;
pub use error::*;
pub use lightning::*;
pub use mix::*;
pub use rain::*;
pub use telemetry::*;
pub use transition::*;
pub use weather::*;
