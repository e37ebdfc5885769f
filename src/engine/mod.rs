pub mod core;
pub mod messages;

pub use self::core::ForecastEngine;
pub use messages::{ForecastRequest, ScenarioResult};
