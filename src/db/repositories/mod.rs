pub mod break_periods;
pub mod work_periods;
