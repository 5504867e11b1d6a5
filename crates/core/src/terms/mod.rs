//! Academic term and payroll date rules.

pub mod pay_period;
pub mod semester;
pub mod shift;

pub use pay_period::{PAY_PERIOD_DAYS, end_date_for, local_day_end, local_day_start};
pub use semester::{SemesterDatesError, semester_name, validate_semester_dates};
pub use shift::{ShiftError, validate_shift, worked_hms};
