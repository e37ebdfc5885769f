pub mod maths_utils;
pub mod time_utils;

pub use maths_utils::{clamp_f64, percentage_of, round_to_u64};
pub use time_utils::TimeUtils;
