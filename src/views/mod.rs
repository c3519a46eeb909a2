//! Terminal views
//!
//! Each view holds the data it shows plus its local UI state and renders to
//! plain text lines. Views that load data catch errors, keep their last data
//! and show a message instead.

pub mod calendar;
pub mod login;
pub mod main_page;
pub mod news_list;
pub mod project_list;
pub mod router;
pub mod side_menu;
pub mod timeline;

pub use calendar::{format_date, CalendarView};
pub use login::LoginForm;
pub use main_page::MainPage;
pub use news_list::NewsList;
pub use project_list::ProjectList;
pub use router::{route, Route};
pub use side_menu::{MenuAction, SideMenu};
pub use timeline::Timeline;

/// Something that renders to text lines
pub trait View {
    fn render(&self) -> Vec<String>;
}

/// Title line followed by an underline of the same width
pub(crate) fn heading(title: &str) -> Vec<String> {
    vec![title.to_string(), "-".repeat(title.chars().count())]
}
