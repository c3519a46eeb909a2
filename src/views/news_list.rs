use crate::api::models::BoardPost;
use crate::views::{heading, View};

/// Board posts under a title; used for both news and notices
pub struct NewsList<'a> {
    title: &'a str,
    posts: &'a [BoardPost],
}

impl<'a> NewsList<'a> {
    pub fn new(title: &'a str, posts: &'a [BoardPost]) -> Self {
        Self { title, posts }
    }
}

impl View for NewsList<'_> {
    fn render(&self) -> Vec<String> {
        let mut lines = heading(self.title);
        if self.posts.is_empty() {
            lines.push(format!("No {}", self.title.to_lowercase()));
            return lines;
        }

        for post in self.posts {
            let title = if post.group_name.is_empty() {
                post.title.clone()
            } else {
                format!("[{}] {}", post.group_name, post.title)
            };
            lines.push(format!("* {}", title));

            let secondary = [post.writer.as_str(), post.regdate.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("  ");
            if !secondary.is_empty() {
                lines.push(format!("    {}", secondary));
            }
        }
        lines
    }
}
