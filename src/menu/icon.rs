use std::fmt;

/// Icon shown next to a menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuIcon {
    Dashboard,
    Document,
    Search,
    Assignment,
    Note,
    Calendar,
    Email,
    Music,
    Settings,
    Code,
}

impl MenuIcon {
    /// Single-width marker used by the terminal renderer
    pub fn glyph(&self) -> &'static str {
        match self {
            MenuIcon::Dashboard => "#",
            MenuIcon::Document => "=",
            MenuIcon::Search => "?",
            MenuIcon::Assignment => "+",
            MenuIcon::Note => "~",
            MenuIcon::Calendar => "@",
            MenuIcon::Email => "&",
            MenuIcon::Music => "*",
            MenuIcon::Settings => "%",
            MenuIcon::Code => "$",
        }
    }
}

impl fmt::Display for MenuIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Map a Font Awesome style key from `mnuImgpath` to an icon
pub fn menu_icon(imgpath: &str) -> MenuIcon {
    if imgpath.is_empty() {
        return MenuIcon::Document;
    }

    match imgpath.to_ascii_lowercase().as_str() {
        "fa-files-o" => MenuIcon::Document,
        "fa-search" => MenuIcon::Search,
        "fa-tasks" => MenuIcon::Assignment,
        "fa-edit" => MenuIcon::Note,
        "fa-calendar" | "fa-calendar-o" => MenuIcon::Calendar,
        "fa-envelope-o" => MenuIcon::Email,
        "fa-music" => MenuIcon::Music,
        "fa-gear" => MenuIcon::Settings,
        "fa-sitemap" => MenuIcon::Code,
        _ => MenuIcon::Dashboard,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_icon_mapping() {
        assert_eq!(menu_icon(""), MenuIcon::Document);
        assert_eq!(menu_icon("fa-files-o"), MenuIcon::Document);
        assert_eq!(menu_icon("FA-Calendar-O"), MenuIcon::Calendar);
        assert_eq!(menu_icon("fa-calendar"), MenuIcon::Calendar);
        assert_eq!(menu_icon("fa-gear"), MenuIcon::Settings);
        assert_eq!(menu_icon("fa-sitemap"), MenuIcon::Code);
        assert_eq!(menu_icon("fa-rocket"), MenuIcon::Dashboard);
    }

    #[test]
    fn test_glyph_display() {
        assert_eq!(MenuIcon::Calendar.to_string(), "@");
    }
}
