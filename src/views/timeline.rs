use crate::api::models::TimelineEntry;
use crate::views::{heading, View};

pub const TIMELINE_TITLE: &str = "Timeline";

pub struct Timeline<'a> {
    entries: &'a [TimelineEntry],
}

impl<'a> Timeline<'a> {
    pub fn new(entries: &'a [TimelineEntry]) -> Self {
        Self { entries }
    }
}

impl View for Timeline<'_> {
    fn render(&self) -> Vec<String> {
        let mut lines = heading(TIMELINE_TITLE);
        if self.entries.is_empty() {
            lines.push("No timeline entries".to_string());
            return lines;
        }

        for entry in self.entries {
            lines.push(format!("* {}", entry.content));
            match (entry.writer.is_empty(), entry.date.is_empty()) {
                (true, true) => {}
                (false, true) => lines.push(format!("    {}", entry.writer)),
                (true, false) => lines.push(format!("    {}", entry.date)),
                (false, false) => lines.push(format!("    {}  {}", entry.date, entry.writer)),
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entries() {
        let entries = vec![
            TimelineEntry {
                id: 9,
                content: "commented on ERP rollout".to_string(),
                writer: "park".to_string(),
                date: "2025-06-21".to_string(),
            },
            TimelineEntry {
                id: 1,
                content: "uploaded a file".to_string(),
                ..Default::default()
            },
        ];

        let lines = Timeline::new(&entries).render();
        assert_eq!(lines[2], "* commented on ERP rollout");
        assert_eq!(lines[3], "    2025-06-21  park");
        assert_eq!(lines[4], "* uploaded a file");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(Timeline::new(&[]).render()[2], "No timeline entries");
    }
}
