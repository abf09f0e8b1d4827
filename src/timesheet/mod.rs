pub mod controller;
pub mod error;
pub mod range;

pub use controller::TimesheetController;
pub use error::TimesheetError;
pub use range::{parse_date_range, parse_minute_range, RangeError};
