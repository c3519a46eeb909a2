//! Menu tree building
//!
//! Items whose parent id does not resolve become roots. Every level is
//! ordered by the numeric value of `mnuOrder`; equal orders keep their input
//! order. The order is read from its leading integer, so "3a" sorts as 3 and
//! "1.5" as 1. An order with no leading integer sorts as 0.

use crate::menu::models::MenuItem;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref LEADING_INTEGER: Regex = Regex::new(r"^\s*([+-]?[0-9]+)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub item: MenuItem,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn id(&self) -> &str {
        &self.item.mnu_no
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Depth-first search of this node and its descendants
    pub fn find(&self, id: &str) -> Option<&MenuNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, including this one
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MenuNode::count).sum::<usize>()
    }
}

/// Find a node anywhere in a forest
pub fn find_node<'a>(roots: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
    roots.iter().find_map(|root| root.find(id))
}

/// Parse the sort key from its leading integer; without one it sorts as 0
pub fn parse_order(order: &str) -> i64 {
    let digits = match LEADING_INTEGER.captures(order).and_then(|c| c.get(1)) {
        Some(m) => m.as_str(),
        None => return 0,
    };
    digits.parse().unwrap_or_else(|_| {
        if digits.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Build the ordered menu forest from flat records
pub fn build_menu_tree(items: Vec<MenuItem>) -> Vec<MenuNode> {
    // When ids repeat, the last record is the one children attach to
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.mnu_no.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let parent = item
            .mnu_parent
            .as_deref()
            .filter(|p| !p.is_empty())
            .and_then(|p| index.get(p).copied())
            .filter(|&p| p != i);

        match parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    // Parent cycles leave items unreachable from any root; the first such
    // item in input order is promoted until every item is placed
    let mut placed = vec![false; items.len()];
    for &root in &roots {
        mark_reachable(root, &children, &mut placed);
    }
    for i in 0..items.len() {
        if !placed[i] {
            roots.push(i);
            mark_reachable(i, &children, &mut placed);
        }
    }
    // Promoted roots take their input position among the others for ties
    roots.sort_unstable();

    let orders: Vec<i64> = items.iter().map(|item| parse_order(&item.mnu_order)).collect();
    let mut slots: Vec<Option<MenuItem>> = items.into_iter().map(Some).collect();
    let mut emitted = vec![false; slots.len()];

    sorted(&roots, &orders)
        .into_iter()
        .filter_map(|i| assemble(i, &children, &orders, &mut slots, &mut emitted))
        .collect()
}

fn mark_reachable(start: usize, children: &[Vec<usize>], placed: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(i) = stack.pop() {
        if placed[i] {
            continue;
        }
        placed[i] = true;
        stack.extend(children[i].iter().copied().filter(|&c| !placed[c]));
    }
}

fn sorted(indices: &[usize], orders: &[i64]) -> Vec<usize> {
    let mut indices = indices.to_vec();
    indices.sort_by_key(|&i| orders[i]);
    indices
}

fn assemble(
    i: usize,
    children: &[Vec<usize>],
    orders: &[i64],
    slots: &mut [Option<MenuItem>],
    emitted: &mut [bool],
) -> Option<MenuNode> {
    if emitted[i] {
        return None;
    }
    emitted[i] = true;
    let item = slots[i].take()?;

    let children = sorted(&children[i], orders)
        .into_iter()
        .filter_map(|c| assemble(c, children, orders, slots, emitted))
        .collect();

    Some(MenuNode { item, children })
}
