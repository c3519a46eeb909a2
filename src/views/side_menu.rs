//! Collapsible navigation menu

use crate::core::services::DashboardService;
use crate::menu::{find_node, menu_icon, MenuNode};
use crate::views::View;
use std::collections::HashSet;

pub const MENU_TITLE: &str = "MTS";
pub const MENU_LOAD_ERROR: &str = "Failed to load the menu.";

/// Outcome of clicking a menu entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// The entry has children and was expanded or collapsed
    Toggle { id: String, expanded: bool },
    /// The entry is a leaf with a target route
    Navigate(String),
}

#[derive(Debug, Clone, Default)]
pub struct SideMenu {
    tree: Vec<MenuNode>,
    expanded: HashSet<String>,
    active_path: String,
    error: Option<String>,
}

impl SideMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tree(tree: Vec<MenuNode>) -> Self {
        Self {
            tree,
            ..Self::default()
        }
    }

    pub fn tree(&self) -> &[MenuNode] {
        &self.tree
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn set_active_path(&mut self, path: impl Into<String>) {
        self.active_path = path.into();
    }

    /// Fetch the menu tree. On failure the menu is left empty with a message.
    pub async fn load(&mut self, service: &DashboardService) {
        match service.fetch_menu_data().await {
            Ok(tree) => {
                tracing::debug!(roots = tree.len(), "Menu loaded");
                self.tree = tree;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load menu data");
                self.tree = Vec::new();
                self.error = Some(MENU_LOAD_ERROR.to_string());
            }
        }
    }

    /// Handle a click on the entry with the given id
    pub fn click(&mut self, id: &str) -> Option<MenuAction> {
        let node = find_node(&self.tree, id)?;

        if node.has_children() {
            let expanded = !self.expanded.remove(id);
            if expanded {
                self.expanded.insert(id.to_string());
            }
            return Some(MenuAction::Toggle {
                id: id.to_string(),
                expanded,
            });
        }

        if node.item.mnu_target.is_empty() {
            return None;
        }
        let path = format!("/{}", node.item.mnu_target);
        self.active_path = path.clone();
        Some(MenuAction::Navigate(path))
    }

    pub fn expand_all(&mut self) {
        fn collect(nodes: &[MenuNode], expanded: &mut HashSet<String>) {
            for node in nodes.iter().filter(|n| n.has_children()) {
                expanded.insert(node.id().to_string());
                collect(&node.children, expanded);
            }
        }
        collect(&self.tree, &mut self.expanded);
    }

    fn render_node(&self, node: &MenuNode, depth: usize, lines: &mut Vec<String>) {
        let active = !node.item.mnu_target.is_empty() && self.active_path == format!("/{}", node.item.mnu_target);
        let expanded = self.is_expanded(node.id());
        let toggle = match (node.has_children(), expanded) {
            (false, _) => "",
            (true, true) => " [-]",
            (true, false) => " [+]",
        };

        lines.push(format!(
            "{}{}{} {}{}",
            if active { ">" } else { " " },
            "  ".repeat(depth),
            menu_icon(&node.item.mnu_imgpath),
            node.item.mnu_nm,
            toggle
        ));

        if expanded {
            for child in &node.children {
                self.render_node(child, depth + 1, lines);
            }
        }
    }
}

impl View for SideMenu {
    fn render(&self) -> Vec<String> {
        let mut lines = vec![MENU_TITLE.to_string()];
        if let Some(error) = &self.error {
            lines.push(error.clone());
            return lines;
        }
        for node in &self.tree {
            self.render_node(node, 0, &mut lines);
        }
        lines
    }
}
