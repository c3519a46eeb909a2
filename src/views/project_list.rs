use crate::api::models::Project;
use crate::views::{heading, View};

pub const PROJECTS_TITLE: &str = "Projects";

pub struct ProjectList<'a> {
    projects: &'a [Project],
}

impl<'a> ProjectList<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self { projects }
    }
}

impl View for ProjectList<'_> {
    fn render(&self) -> Vec<String> {
        let mut lines = heading(PROJECTS_TITLE);
        if self.projects.is_empty() {
            lines.push("No projects".to_string());
            return lines;
        }

        for project in self.projects {
            lines.push(format!("* {}", project.title));
            if !project.description.is_empty() {
                lines.push(format!("    {}", project.description));
            }
        }
        lines
    }
}
