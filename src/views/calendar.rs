//! Weekly calendar view with previous/next week paging

use crate::api::models::{CalendarData, CalendarDay};
use crate::core::services::DashboardService;
use crate::views::{heading, View};
use chrono::NaiveDate;

/// `2025-06-23` becomes `Jun 23 (Mon)`; anything unparsable is shown as given
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%b %-d (%a)").to_string(),
        Err(_) => date.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CalendarView {
    data: CalendarData,
    loading: bool,
}

impl CalendarView {
    pub fn new(data: CalendarData) -> Self {
        Self { data, loading: false }
    }

    pub fn data(&self) -> &CalendarData {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_data(&mut self, data: CalendarData) {
        self.data = data;
    }

    /// Load the week containing `date`. On failure the current week stays.
    pub async fn change_week(&mut self, service: &DashboardService, date: &str) {
        self.loading = true;
        match service.fetch_calendar_data(Some(date)).await {
            Ok(data) => self.data = data,
            Err(e) => tracing::warn!(date = %date, error = %e, "Keeping current week"),
        }
        self.loading = false;
    }

    pub async fn previous_week(&mut self, service: &DashboardService) {
        let date = self.data.pre_week.clone();
        self.change_week(service, &date).await;
    }

    pub async fn next_week(&mut self, service: &DashboardService) {
        let date = self.data.next_week.clone();
        self.change_week(service, &date).await;
    }

    fn render_day(day: &CalendarDay, lines: &mut Vec<String>) {
        let marker = if day.istoday { "  (today)" } else { "" };
        lines.push(format!("{}{}", format_date(&day.date), marker));

        if day.list.is_empty() {
            lines.push("  No events".to_string());
            return;
        }
        for event in &day.list {
            match event.time() {
                Some(time) => lines.push(format!("  {}  {}", event.display_title(), time)),
                None => lines.push(format!("  {}", event.display_title())),
            }
        }
    }
}

impl View for CalendarView {
    fn render(&self) -> Vec<String> {
        let mut lines = heading(&format!(
            "Calendar: month {}, week {}",
            self.data.month, self.data.week
        ));
        if self.loading {
            lines.push("Loading...".to_string());
        }
        for day in &self.data.calen_list {
            Self::render_day(day, &mut lines);
        }
        lines
    }
}
