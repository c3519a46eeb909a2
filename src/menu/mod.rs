//! Navigation menu: flat records, the ordered tree built from them, and icons

pub mod icon;
pub mod models;
pub mod tree;

pub use icon::{menu_icon, MenuIcon};
pub use models::{convert_tree_records, MenuItem, TreeRecord};
pub use tree::{build_menu_tree, find_node, MenuNode};
