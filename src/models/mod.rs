pub mod directory;
pub mod event;
pub mod week;

pub use directory::{Class, Room, Teacher};
pub use event::{Event, EventTitle, PeriodFlag};
pub use week::{HourOffset, WeekContext};
