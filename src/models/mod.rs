pub mod break_period;
pub mod period;
pub mod range;

pub use break_period::{ActiveBreakPeriod, BreakPeriod};
pub use period::{ActiveWorkPeriod, Completion, UserData, WorkPeriod};
pub use range::TimeRange;
