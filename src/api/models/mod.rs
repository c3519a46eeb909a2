pub mod common;
pub mod calendar;
pub mod main_page;

pub use calendar::{CalendarData, CalendarDay, CalendarEvent};
pub use main_page::{BoardPost, MainPageData, Project, TimelineEntry};
