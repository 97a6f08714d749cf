pub mod nager;

pub use nager::{HolidayApiConfig, NagerHolidayCalendar};
