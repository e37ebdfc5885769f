// Terminal presentation of forecast results
pub mod text_report;
pub mod utils;

pub use text_report::{render_report, render_scenarios, render_summary, render_table};
