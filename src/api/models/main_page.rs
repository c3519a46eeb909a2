//! Main page aggregate: projects, news, notices, timeline and the current week

use crate::api::envelope::DirectPayload;
use crate::api::models::calendar::CalendarDay;
use crate::api::models::common::{
    deserialize_flexible_id, deserialize_flexible_string, first_id, first_text,
    null_as_default,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawMainPageData")]
pub struct MainPageData {
    /// Keyword the backend applied, echoed back
    pub search_keyword: Option<String>,
    pub projects: Vec<Project>,
    pub news: Vec<BoardPost>,
    pub notices: Vec<BoardPost>,
    pub timeline: Vec<TimelineEntry>,
    pub calendar_days: Vec<CalendarDay>,
    pub month: Option<u32>,
    pub week: Option<u32>,
    pub pre_week: Option<String>,
    pub next_week: Option<String>,
}

impl DirectPayload for MainPageData {
    const FIELDS: &'static [&'static str] = &[
        "projectlistview",
        "listview",
        "noticeList",
        "listtime",
        "calenList",
        "searchVO",
    ];
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Project {
    pub id: i64,
    pub title: String,
    /// `owner (status) start ~ end`
    pub description: String,
    pub owner: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A news or notice board entry
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoardPost {
    pub id: i64,
    pub title: String,
    pub writer: String,
    pub regdate: String,
    pub group_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineEntry {
    pub id: i64,
    pub content: String,
    pub writer: String,
    pub date: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawMainPageData {
    #[serde(default, rename = "searchVO")]
    search: Option<RawSearch>,
    #[serde(default, deserialize_with = "null_as_default")]
    projectlistview: Vec<RawProject>,
    #[serde(default, deserialize_with = "null_as_default")]
    listview: Vec<RawBoardPost>,
    #[serde(default, rename = "noticeList", deserialize_with = "null_as_default")]
    notice_list: Vec<RawBoardPost>,
    #[serde(default, deserialize_with = "null_as_default")]
    listtime: Vec<RawTimelineEntry>,
    #[serde(default, rename = "calenList", deserialize_with = "null_as_default")]
    calen_list: Vec<CalendarDay>,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    month: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    week: Option<i64>,
    #[serde(default, rename = "preWeek")]
    pre_week: Option<String>,
    #[serde(default, rename = "nextWeek")]
    next_week: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearch {
    #[serde(default)]
    search_keyword: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProject {
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    prno: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    prtitle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    usernm: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    prstatus: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    prstartdate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    prenddate: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBoardPost {
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    brdno: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    brdtitle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    brdwriter: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    usernm: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    regdate: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    bgname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTimelineEntry {
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    reno: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_id")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    rememo: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    content: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    rewriter: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_string")]
    regdate: Option<String>,
}

impl From<RawProject> for Project {
    fn from(raw: RawProject) -> Self {
        let part = |s: &Option<String>| s.clone().unwrap_or_default();
        let description = format!(
            "{} ({}) {} ~ {}",
            part(&raw.usernm),
            part(&raw.prstatus),
            part(&raw.prstartdate),
            part(&raw.prenddate)
        );

        Self {
            id: first_id(&[raw.prno, raw.id]).unwrap_or(0),
            title: first_text(&[&raw.prtitle, &raw.title]),
            description,
            owner: raw.usernm,
            status: raw.prstatus,
            start_date: raw.prstartdate,
            end_date: raw.prenddate,
        }
    }
}

impl From<RawBoardPost> for BoardPost {
    fn from(raw: RawBoardPost) -> Self {
        Self {
            id: first_id(&[raw.brdno, raw.id]).unwrap_or(0),
            title: first_text(&[&raw.brdtitle, &raw.title]),
            writer: first_text(&[&raw.brdwriter, &raw.usernm]),
            regdate: raw.regdate.unwrap_or_default(),
            group_name: raw.bgname.unwrap_or_default(),
        }
    }
}

impl TimelineEntry {
    /// Entries without an id of their own fall back to their position
    fn from_raw(raw: RawTimelineEntry, index: usize) -> Self {
        Self {
            id: first_id(&[raw.reno, raw.id]).unwrap_or(index as i64),
            content: first_text(&[&raw.rememo, &raw.content]),
            writer: raw.rewriter.unwrap_or_default(),
            date: raw.regdate.unwrap_or_default(),
        }
    }
}

impl From<RawMainPageData> for MainPageData {
    fn from(raw: RawMainPageData) -> Self {
        Self {
            search_keyword: raw.search.and_then(|s| s.search_keyword),
            projects: raw.projectlistview.into_iter().map(Project::from).collect(),
            news: raw.listview.into_iter().map(BoardPost::from).collect(),
            notices: raw.notice_list.into_iter().map(BoardPost::from).collect(),
            timeline: raw
                .listtime
                .into_iter()
                .enumerate()
                .map(|(i, entry)| TimelineEntry::from_raw(entry, i))
                .collect(),
            calendar_days: raw.calen_list,
            month: raw.month.and_then(|m| u32::try_from(m).ok()),
            week: raw.week.and_then(|w| u32::try_from(w).ok()),
            pre_week: raw.pre_week,
            next_week: raw.next_week,
        }
    }
}
