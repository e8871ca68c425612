pub mod duration;
pub mod error;
pub mod model;

pub use duration::parse_every;
pub use error::ScheduleError;
pub use model::{RawSchedule, ScheduleSpec, build_schedule};
