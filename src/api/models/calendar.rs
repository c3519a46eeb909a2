use crate::api::envelope::DirectPayload;
use crate::api::models::common::{
    deserialize_flexible_bool, deserialize_flexible_id, deserialize_flexible_string, deserialize_flexible_u32,
    null_as_default,
};
use serde::Deserialize;

/// One week of schedule entries
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarData {
    #[serde(default, deserialize_with = "deserialize_flexible_u32")]
    pub month: u32,
    #[serde(default, deserialize_with = "deserialize_flexible_u32")]
    pub week: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub calen_list: Vec<CalendarDay>,
    /// Any date in the previous week, used to page backwards
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_week: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_week: String,
}

impl DirectPayload for CalendarData {
    const FIELDS: &'static [&'static str] = &["calenList", "month", "week", "preWeek", "nextWeek"];
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalendarDay {
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_flexible_bool")]
    pub istoday: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub list: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub sstitle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub sdhour: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub sdminute: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    pub fontcolor: Option<String>,
}

impl CalendarEvent {
    pub fn display_title(&self) -> &str {
        [&self.sstitle, &self.title]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .find(|t| !t.is_empty())
            .unwrap_or_default()
    }

    /// `HH:MM` when both hour and minute are set
    pub fn time(&self) -> Option<String> {
        match (self.sdhour.as_deref(), self.sdminute.as_deref()) {
            (Some(hour), Some(minute)) if !hour.is_empty() && !minute.is_empty() => {
                Some(format!("{}:{}", hour, minute))
            }
            _ => None,
        }
    }
}
