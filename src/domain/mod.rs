// Domain types and value objects
pub mod historical;
pub mod keyword;
pub mod run_parameters;

// Re-export commonly used types
pub use historical::{HistoricalPoint, latest_sessions};
pub use keyword::KeywordRecord;
pub use run_parameters::{EffortLevel, RunParameters};
