//! Help listings.
//!
//! A listing maps section name to entries in tree order (labels sorted at
//! each level, parents before children). Every entry has passed the
//! principal's permission check, and so has every node on the way to it.

use std::collections::BTreeMap;
use std::fmt;

use super::usage::render_usage;
use crate::command::{CommandNode, CommandTree, NodeId};
use crate::principal::Principal;

/// One line of help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// Displayed name followed by the command's path, e.g. `/cmd economy pay`.
    pub command: String,
    pub usage: String,
    pub description: String,
    pub section: String,
}

impl HelpEntry {
    /// `"<command> <usage> - <description>"`, leaving out empty parts.
    pub fn render(&self) -> String {
        let mut line = self.command.clone();
        if !self.usage.is_empty() {
            line.push(' ');
            line.push_str(&self.usage);
        }
        if !self.description.is_empty() {
            line.push_str(" - ");
            line.push_str(&self.description);
        }
        line
    }
}

impl fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Help entries grouped by section. Sections iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpListing {
    sections: BTreeMap<String, Vec<HelpEntry>>,
}

impl HelpListing {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of entries across sections.
    pub fn len(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &[HelpEntry])> + '_ {
        self.sections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Entries of one section; empty when the section does not exist.
    pub fn section(&self, name: &str) -> &[HelpEntry] {
        self.sections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entries(&self) -> impl Iterator<Item = &HelpEntry> + '_ {
        self.sections.values().flatten()
    }

    /// Command strings of every entry, section by section.
    pub fn commands(&self) -> Vec<&str> {
        self.entries().map(|e| e.command.as_str()).collect()
    }

    /// Section name to rendered lines.
    pub fn rendered(&self) -> BTreeMap<String, Vec<String>> {
        self.sections
            .iter()
            .map(|(name, entries)| {
                (
                    name.clone(),
                    entries.iter().map(HelpEntry::render).collect(),
                )
            })
            .collect()
    }

    pub(crate) fn push(&mut self, entry: HelpEntry) {
        self.sections
            .entry(entry.section.clone())
            .or_default()
            .push(entry);
    }
}

fn entry_for(tree: &CommandTree, display_name: &str, node: &CommandNode, usage: String) -> HelpEntry {
    HelpEntry {
        command: render_usage(display_name, &tree.path_of(node.id()), None),
        usage,
        description: node.description().to_string(),
        section: node.section().to_string(),
    }
}

fn is_runnable(node: &CommandNode) -> bool {
    !node.is_group() && node.has_handler()
}

/// Whether `node` would show up anywhere in a listing for `principal`: it is
/// permitted and either not a pure group or has a visible descendant.
fn is_visible(tree: &CommandTree, node: &CommandNode, principal: &dyn Principal) -> bool {
    if !node.permission().is_satisfied_by(principal) {
        return false;
    }
    if !node.is_group() {
        return true;
    }
    node.children()
        .entries()
        .filter_map(|(_, id)| tree.node(id))
        .any(|child| is_visible(tree, child, principal))
}

/// Usage shown for a direct child in a shallow listing. Child labels are
/// limited to what `principal` can see.
fn shallow_usage(tree: &CommandTree, node: &CommandNode, principal: &dyn Principal) -> String {
    let hint = node.usage().trim();
    if !hint.is_empty() || node.is_leaf() {
        return hint.to_string();
    }
    let labels: Vec<&str> = node
        .children()
        .entries()
        .filter(|(_, id)| {
            tree.node(*id)
                .is_some_and(|child| is_visible(tree, child, principal))
        })
        .map(|(label, _)| label)
        .collect();
    if labels.is_empty() {
        return String::new();
    }
    format!("<{}>", labels.join("|"))
}

/// Build the listing below `start` (the root for `None`).
///
/// The caller is responsible for the permission check of `start` and its
/// ancestors.
pub(crate) fn collect(
    tree: &CommandTree,
    display_name: &str,
    start: Option<NodeId>,
    principal: &dyn Principal,
    deep: bool,
) -> HelpListing {
    let mut listing = HelpListing::default();

    if let Some(node) = start.and_then(|id| tree.node(id))
        && is_runnable(node)
        && node.permission().is_satisfied_by(principal)
    {
        listing.push(entry_for(tree, display_name, node, node.usage().trim().to_string()));
    }

    for (_, id) in tree.children(start).entries() {
        let Some(child) = tree.node(id) else {
            continue;
        };
        if !is_visible(tree, child, principal) {
            continue;
        }
        if deep {
            collect_deep(tree, display_name, child, principal, &mut listing);
        } else {
            listing.push(entry_for(
                tree,
                display_name,
                child,
                shallow_usage(tree, child, principal),
            ));
        }
    }
    listing
}

fn collect_deep(
    tree: &CommandTree,
    display_name: &str,
    node: &CommandNode,
    principal: &dyn Principal,
    listing: &mut HelpListing,
) {
    if is_runnable(node) {
        listing.push(entry_for(tree, display_name, node, node.usage().trim().to_string()));
    }
    for (_, id) in node.children().entries() {
        if let Some(child) = tree.node(id)
            && child.permission().is_satisfied_by(principal)
        {
            collect_deep(tree, display_name, child, principal, listing);
        }
    }
}
