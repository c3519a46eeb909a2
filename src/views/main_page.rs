//! Main dashboard page
//!
//! Owns the page state: the last main-page data, the calendar, the side menu,
//! the search keyword and any error message. Failed loads keep the previous
//! data on screen.

use crate::api::models::MainPageData;
use crate::core::services::DashboardService;
use crate::views::{CalendarView, NewsList, ProjectList, SideMenu, Timeline, View};

pub const LOAD_ERROR: &str = "An error occurred while loading data.";
pub const SEARCH_ERROR: &str = "An error occurred while searching.";

#[derive(Debug, Clone, Default)]
pub struct MainPage {
    username: Option<String>,
    data: Option<MainPageData>,
    calendar: CalendarView,
    menu: SideMenu,
    menu_open: bool,
    search_keyword: String,
    loading: bool,
    error: Option<String>,
}

impl MainPage {
    pub fn new(username: Option<String>) -> Self {
        Self {
            username,
            menu_open: true,
            ..Self::default()
        }
    }

    pub fn data(&self) -> Option<&MainPageData> {
        self.data.as_ref()
    }

    pub fn calendar(&self) -> &CalendarView {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut CalendarView {
        &mut self.calendar
    }

    pub fn menu(&self) -> &SideMenu {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut SideMenu {
        &mut self.menu
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_keyword(&self) -> &str {
        &self.search_keyword
    }

    pub fn set_search_keyword(&mut self, keyword: impl Into<String>) {
        self.search_keyword = keyword.into();
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Load main page and calendar data together, and the menu alongside
    pub async fn load(&mut self, service: &DashboardService) {
        self.loading = true;
        self.error = None;

        let (result, ()) = tokio::join!(
            async {
                tokio::try_join!(
                    service.fetch_main_page_data(None),
                    service.fetch_calendar_data(None)
                )
            },
            self.menu.load(service)
        );

        match result {
            Ok((data, calendar)) => {
                self.data = Some(data);
                self.calendar.set_data(calendar);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading main page data");
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
        self.loading = false;
    }

    /// Refetch main page data with the current keyword; the calendar is untouched
    pub async fn search(&mut self, service: &DashboardService) {
        self.loading = true;
        self.error = None;

        match service.fetch_main_page_data(Some(self.search_keyword.as_str())).await {
            Ok(data) => self.data = Some(data),
            Err(e) => {
                tracing::error!(keyword = %self.search_keyword, error = %e, "Error searching");
                self.error = Some(SEARCH_ERROR.to_string());
            }
        }
        self.loading = false;
    }
}

impl View for MainPage {
    fn render(&self) -> Vec<String> {
        if self.loading && self.data.is_none() {
            return vec!["Loading...".to_string()];
        }

        let mut lines = vec![match &self.username {
            Some(name) => format!("MTSSBJ  |  Welcome, {}", name),
            None => "MTSSBJ".to_string(),
        }];

        if let Some(error) = &self.error {
            lines.push(format!("! {}", error));
        }
        lines.push(format!("Search: {}", self.search_keyword));

        if self.menu_open {
            lines.push(String::new());
            lines.extend(self.menu.render());
        }

        let empty = MainPageData::default();
        let data = self.data.as_ref().unwrap_or(&empty);

        let sections = [
            ProjectList::new(&data.projects).render(),
            NewsList::new("News", &data.news).render(),
            NewsList::new("Notices", &data.notices).render(),
            Timeline::new(&data.timeline).render(),
            self.calendar.render(),
        ];
        for section in sections {
            lines.push(String::new());
            lines.extend(section);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::HttpClient;
    use crate::api::interceptor::ApiClient;
    use crate::auth::SessionStore;
    use crate::core::services::{CALENDAR_PATH, MAIN_PATH, MENU_PATH};
    use crate::core::storage::MemoryStorage;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Answers by path, so concurrent requests need no fixed order
    struct RoutedTransport {
        routes: std::sync::Mutex<Vec<(String, u16, Value)>>,
        seen: std::sync::Mutex<Vec<crate::api::HttpRequest>>,
    }

    #[async_trait::async_trait]
    impl crate::api::HttpTransport for RoutedTransport {
        async fn send(&self, request: &crate::api::HttpRequest) -> crate::core::error::Result<crate::api::HttpResponse> {
            self.seen.lock().unwrap().push(request.clone());
            let mut routes = self.routes.lock().unwrap();
            match routes.iter().position(|(path, _, _)| *path == request.path) {
                Some(i) => {
                    let (_, status, body) = routes.remove(i);
                    Ok(crate::api::HttpResponse::new(status, body))
                }
                None => Err(crate::core::error::ClientError::NetworkError("unrouted".to_string())),
            }
        }
    }

    fn service(routes: Vec<(&str, u16, Value)>) -> (DashboardService, Arc<RoutedTransport>) {
        let transport = Arc::new(RoutedTransport {
            routes: std::sync::Mutex::new(routes.into_iter().map(|(p, s, b)| (p.to_string(), s, b)).collect()),
            seen: std::sync::Mutex::new(Vec::new()),
        });
        let store = SessionStore::new(HttpClient::new(transport.clone()), Arc::new(MemoryStorage::new())).unwrap();
        (DashboardService::new(ApiClient::new(Arc::new(store))), transport)
    }

    fn main_body(title: &str) -> Value {
        json!({"success": true, "data": {"projectlistview": [{"prno": 1, "prtitle": title}]}})
    }

    fn calendar_body() -> Value {
        json!({"success": true, "data": {"month": 6, "week": 4, "calenList": [{"date": "2025-06-23", "istoday": true, "list": []}]}})
    }

    #[tokio::test]
    async fn test_load_fills_all_widgets() {
        let (service, _) = service(vec![
            (MAIN_PATH, 200, main_body("ERP rollout")),
            (CALENDAR_PATH, 200, calendar_body()),
            (MENU_PATH, 200, json!([{"key": "1", "title": "Boards"}])),
        ]);

        let mut page = MainPage::new(Some("alice".to_string()));
        page.load(&service).await;

        assert_eq!(page.error(), None);
        assert!(!page.is_loading());
        assert_eq!(page.data().unwrap().projects[0].title, "ERP rollout");
        assert_eq!(page.calendar().data().week, 4);
        assert_eq!(page.menu().tree().len(), 1);

        let lines = page.render();
        assert_eq!(lines[0], "MTSSBJ  |  Welcome, alice");
        assert!(lines.contains(&"* ERP rollout".to_string()));
        assert!(lines.contains(&"No news".to_string()));
        assert!(lines.contains(&"Jun 23 (Mon)  (today)".to_string()));
        assert!(lines.contains(&" = Boards".to_string()));
    }

    #[tokio::test]
    async fn test_load_failure_sets_message() {
        let (service, _) = service(vec![(MAIN_PATH, 200, main_body("ERP rollout"))]);

        let mut page = MainPage::new(None);
        page.load(&service).await;

        assert_eq!(page.error(), Some(LOAD_ERROR));
        assert!(page.data().is_none());
        assert!(page.render().contains(&format!("! {}", LOAD_ERROR)));
    }

    #[tokio::test]
    async fn test_search_keeps_last_data_on_error() {
        let (service, transport) = service(vec![
            (MAIN_PATH, 200, main_body("ERP rollout")),
            (CALENDAR_PATH, 200, calendar_body()),
            (MENU_PATH, 200, json!([])),
            (MAIN_PATH, 200, main_body("Payroll")),
        ]);

        let mut page = MainPage::new(None);
        page.load(&service).await;

        page.set_search_keyword("pay");
        page.search(&service).await;
        assert_eq!(page.data().unwrap().projects[0].title, "Payroll");

        let last = transport.seen.lock().unwrap().last().cloned().unwrap();
        assert_eq!(last.query, vec![("searchKeyword".to_string(), "pay".to_string())]);

        page.search(&service).await;
        assert_eq!(page.error(), Some(SEARCH_ERROR));
        assert_eq!(page.data().unwrap().projects[0].title, "Payroll");
        assert_eq!(page.calendar().data().week, 4);
    }

    #[test]
    fn test_render_while_loading_first_time() {
        let mut page = MainPage::new(None);
        page.loading = true;
        assert_eq!(page.render(), vec!["Loading..."]);

        page.loading = false;
        page.toggle_menu();
        let lines = page.render();
        assert_eq!(lines[0], "MTSSBJ");
        assert_eq!(lines[1], "Search: ");
        assert!(lines.contains(&"No projects".to_string()));
    }
}
