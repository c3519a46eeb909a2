//! Dashboard data services
//!
//! Thin wrappers over the authenticated API client that fetch one endpoint
//! each and unwrap its envelope into a typed model.

use crate::api::envelope::{self, unwrap_envelope};
use crate::api::interceptor::ApiClient;
use crate::api::models::{CalendarData, MainPageData};
use crate::api::transport::HttpRequest;
use crate::core::error::{ClientError, Result};
use crate::menu::{build_menu_tree, convert_tree_records, MenuNode, TreeRecord};
use serde_json::Value;

pub const MAIN_PATH: &str = "/main";
pub const CALENDAR_PATH: &str = "/main/calendar";
pub const MENU_PATH: &str = "/menu/list";

/// Service for the main page, calendar and menu endpoints
#[derive(Clone)]
pub struct DashboardService {
    api: ApiClient,
}

impl DashboardService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Get the main page aggregate, optionally filtered by a search keyword
    pub async fn fetch_main_page_data(&self, keyword: Option<&str>) -> Result<MainPageData> {
        let request = HttpRequest::get(MAIN_PATH).query_opt("searchKeyword", keyword);

        self.fetch(request, "Failed to fetch main page data")
            .await
            .map_err(|e| {
                tracing::error!(error_type = e.error_type(), "Failed to fetch main page data: {}", e);
                e
            })
    }

    /// Get one week of calendar data; without a date the backend picks the current week
    pub async fn fetch_calendar_data(&self, date: Option<&str>) -> Result<CalendarData> {
        let request = HttpRequest::get(CALENDAR_PATH).query_opt("date", date);

        self.fetch(request, "Failed to fetch calendar data")
            .await
            .map_err(|e| {
                tracing::error!(error_type = e.error_type(), date = ?date, "Failed to fetch calendar data: {}", e);
                e
            })
    }

    /// Get the menu list and build it into an ordered tree
    pub async fn fetch_menu_data(&self) -> Result<Vec<MenuNode>> {
        let result: Result<Vec<MenuNode>> = async {
            let response = self.api.execute(HttpRequest::get(MENU_PATH)).await?;
            let records = menu_records(response.body)?;
            Ok(build_menu_tree(convert_tree_records(records)))
        }
        .await;

        if let Err(e) = &result {
            tracing::error!(error_type = e.error_type(), "Failed to fetch menu data: {}", e);
        }
        result
    }

    async fn fetch<T: envelope::DirectPayload>(&self, request: HttpRequest, default_message: &str) -> Result<T> {
        let response = self.api.execute(request).await?;
        unwrap_envelope(response.body, default_message)
    }
}

/// The menu endpoint answers with either a bare array or an envelope of one
fn menu_records(body: Value) -> Result<Vec<TreeRecord>> {
    match body {
        Value::Array(_) => {
            serde_json::from_value(body).map_err(|e| ClientError::InvalidResponseFormat(e.to_string()))
        }
        body if envelope::is_envelope(&body) => {
            let data: Value = envelope::unwrap_data(body, "Failed to fetch menu data")?;
            if !data.is_array() {
                return Err(ClientError::InvalidResponseFormat(
                    "menu data is not an array".to_string(),
                ));
            }
            serde_json::from_value(data).map_err(|e| ClientError::InvalidResponseFormat(e.to_string()))
        }
        _ => Err(ClientError::InvalidResponseFormat(
            "menu response is neither an array nor an envelope".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::HttpClient;
    use crate::api::testing::MockTransport;
    use crate::auth::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use crate::auth::SessionStore;
    use crate::core::storage::MemoryStorage;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (DashboardService, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        let storage = Arc::new(MemoryStorage::with_entries([
            (ACCESS_TOKEN_KEY, "A1"),
            (REFRESH_TOKEN_KEY, "R1"),
        ]));
        let store = SessionStore::new(HttpClient::new(transport.clone()), storage).unwrap();
        (DashboardService::new(ApiClient::new(Arc::new(store))), transport)
    }

    #[tokio::test]
    async fn test_fetch_main_page_with_keyword() {
        let (service, transport) = service();
        transport.push_response(
            200,
            json!({"success": true, "data": {"projectlistview": [{"prno": 1, "prtitle": "Alpha"}]}}),
        );

        let data = service.fetch_main_page_data(Some("alpha")).await.unwrap();
        assert_eq!(data.projects[0].title, "Alpha");

        let sent = transport.requests();
        assert_eq!(sent[0].path, MAIN_PATH);
        assert_eq!(sent[0].query, vec![("searchKeyword".to_string(), "alpha".to_string())]);
    }

    #[tokio::test]
    async fn test_fetch_main_page_empty_keyword_is_omitted() {
        let (service, transport) = service();
        transport.push_response(200, json!({"success": true, "data": {}}));
        transport.push_response(200, json!({"success": true, "data": {}}));

        service.fetch_main_page_data(Some("")).await.unwrap();
        service.fetch_main_page_data(None).await.unwrap();

        assert!(transport.requests().iter().all(|r| r.query.is_empty()));
    }

    #[tokio::test]
    async fn test_fetch_main_page_accepts_bare_payload() {
        let (service, transport) = service();
        transport.push_response(200, json!({"listview": [{"brdno": 2, "brdtitle": "Hello"}]}));

        let data = service.fetch_main_page_data(None).await.unwrap();
        assert_eq!(data.news[0].title, "Hello");
    }

    #[tokio::test]
    async fn test_fetch_main_page_backend_failure() {
        let (service, transport) = service();
        transport.push_response(200, json!({"success": false}));
        transport.push_response(200, json!({"success": false, "error": {"message": "db down"}}));
        transport.push_response(200, json!([1, 2]));

        let err = service.fetch_main_page_data(None).await.unwrap_err();
        assert!(matches!(err, ClientError::ApiError(m) if m == "Failed to fetch main page data"));

        let err = service.fetch_main_page_data(None).await.unwrap_err();
        assert!(matches!(err, ClientError::ApiError(m) if m == "db down"));

        let err = service.fetch_main_page_data(None).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponseFormat(_)));
    }

    #[tokio::test]
    async fn test_fetch_calendar_with_date() {
        let (service, transport) = service();
        transport.push_response(
            200,
            json!({"success": true, "data": {"month": 6, "week": 4, "calenList": [], "preWeek": "2025-06-16", "nextWeek": "2025-06-30"}}),
        );

        let data = service.fetch_calendar_data(Some("2025-06-23")).await.unwrap();
        assert_eq!(data.week, 4);
        assert_eq!(data.next_week, "2025-06-30");

        let sent = transport.requests();
        assert_eq!(sent[0].path, CALENDAR_PATH);
        assert_eq!(sent[0].query, vec![("date".to_string(), "2025-06-23".to_string())]);
    }

    #[tokio::test]
    async fn test_fetch_calendar_network_error() {
        let (service, transport) = service();
        transport.push_network_error("connection refused");

        let err = service.fetch_calendar_data(None).await.unwrap_err();
        assert!(matches!(err, ClientError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_fetch_menu_from_bare_array() {
        let (service, transport) = service();
        transport.push_response(
            200,
            json!([
                {"key": "1", "parent": null, "title": "Boards"},
                {"key": "2", "parent": "1", "title": "Notices"},
                {"key": "3", "parent": null, "title": "Schedule"}
            ]),
        );

        let tree = service.fetch_menu_data().await.unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].item.mnu_nm, "Boards");
        assert_eq!(tree[0].children[0].item.mnu_nm, "Notices");
        assert_eq!(transport.paths(), vec![MENU_PATH]);
    }

    #[tokio::test]
    async fn test_fetch_menu_from_envelope() {
        let (service, transport) = service();
        transport.push_response(
            200,
            json!({"success": true, "data": [{"key": 7, "title": "Settings"}]}),
        );

        let tree = service.fetch_menu_data().await.unwrap();
        assert_eq!(tree[0].id(), "7");
    }

    #[tokio::test]
    async fn test_fetch_menu_rejects_other_shapes() {
        let (service, transport) = service();
        transport.push_response(200, json!({"items": []}));
        transport.push_response(200, json!({"success": true, "data": {"key": "1"}}));

        assert!(matches!(
            service.fetch_menu_data().await,
            Err(ClientError::InvalidResponseFormat(_))
        ));
        assert!(matches!(
            service.fetch_menu_data().await,
            Err(ClientError::InvalidResponseFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_retries_after_refresh() {
        let (service, transport) = service();
        transport.push_response(401, json!({"success": false}));
        transport.push_response(200, json!({"success": true, "data": {"accessToken": "A2"}}));
        transport.push_response(200, json!([]));

        let tree = service.fetch_menu_data().await.unwrap();
        assert!(tree.is_empty());
        assert_eq!(transport.requests()[2].authorization(), Some("Bearer A2"));
    }
}
