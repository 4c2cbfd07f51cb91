//! CommandTree - arena of registered nodes plus the registrar.
//!
//! Nodes live in a flat `Vec` and refer to each other through [`NodeId`].
//! The tree is built once, then only read. Registration failures never abort
//! the whole build: the offending node (and its subtree) is skipped, logged,
//! and reported, while siblings keep registering.

use tracing::{debug, warn};

use super::descriptor::CommandDescriptor;
use super::node::{ChildIndex, CommandNode, NodeId};
use crate::error::RegistrationError;

/// Outcome of a batch registration.
#[derive(Debug, Default)]
pub struct RegistrationReport {
    /// Nodes added, in registration order (parents before children).
    pub registered: Vec<NodeId>,
    /// `(label path, error)` for every skipped descriptor.
    pub skipped: Vec<(String, RegistrationError)>,
}

impl RegistrationReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Forest of command nodes. Root-level commands have no parent.
#[derive(Debug, Default)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
    roots: ChildIndex,
}

impl CommandTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&CommandNode> {
        self.nodes.get(id.0)
    }

    /// Children of `parent`, or the root-level commands for `None`.
    ///
    /// An id from another tree yields an empty index.
    pub fn children(&self, parent: Option<NodeId>) -> &ChildIndex {
        static EMPTY: std::sync::OnceLock<ChildIndex> = std::sync::OnceLock::new();
        match parent {
            None => &self.roots,
            Some(id) => match self.nodes.get(id.0) {
                Some(node) => &node.children,
                None => EMPTY.get_or_init(ChildIndex::default),
            },
        }
    }

    /// Case-insensitive label/alias lookup among the children of `parent`.
    pub fn lookup(&self, parent: Option<NodeId>, token: &str) -> Option<NodeId> {
        self.children(parent).lookup(token)
    }

    /// Follow `path` from the root as far as it resolves.
    ///
    /// Returns the deepest node reached and how many tokens were consumed.
    pub fn walk<S: AsRef<str>>(&self, path: &[S]) -> (Option<NodeId>, usize) {
        let mut current = None;
        let mut consumed = 0;
        for token in path {
            match self.lookup(current, token.as_ref()) {
                Some(id) => {
                    current = Some(id);
                    consumed += 1;
                }
                None => break,
            }
        }
        (current, consumed)
    }

    /// Primary labels from the root down to `id`.
    pub fn path_of(&self, id: NodeId) -> Vec<&str> {
        let mut labels = Vec::new();
        let mut cursor = self.node(id);
        while let Some(node) = cursor {
            labels.push(node.label.as_str());
            cursor = node.parent.and_then(|p| self.node(p));
        }
        labels.reverse();
        labels
    }

    fn describe_parent(&self, parent: Option<NodeId>) -> String {
        match parent {
            None => "<root>".to_string(),
            Some(id) => self.path_of(id).join(" "),
        }
    }

    /// Register one descriptor (and its nested children) under `parent`.
    ///
    /// Fails if the descriptor itself is rejected. Rejected children are
    /// logged and skipped; use [`register_all`](Self::register_all) to collect them.
    pub fn register(
        &mut self,
        parent: Option<NodeId>,
        descriptor: CommandDescriptor,
    ) -> Result<NodeId, RegistrationError> {
        let mut report = RegistrationReport::default();
        self.insert_subtree(parent, descriptor, &mut report)
    }

    /// Register every descriptor under `parent`, continuing past failures.
    pub fn register_all<I>(&mut self, parent: Option<NodeId>, descriptors: I) -> RegistrationReport
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        let mut report = RegistrationReport::default();
        for descriptor in descriptors {
            let _ = self.insert_subtree(parent, descriptor, &mut report);
        }
        report
    }

    fn insert_subtree(
        &mut self,
        parent: Option<NodeId>,
        mut descriptor: CommandDescriptor,
        report: &mut RegistrationReport,
    ) -> Result<NodeId, RegistrationError> {
        let children = std::mem::take(&mut descriptor.children);
        let label = descriptor.label.clone();

        let id = match self.insert(parent, descriptor) {
            Ok(id) => id,
            Err(err) => {
                let path = match parent {
                    None => label.clone(),
                    Some(_) => format!("{} {}", self.describe_parent(parent), label),
                };
                warn!(command = %path, error = %err, "skipping command registration");
                report.skipped.push((path, err.clone()));
                return Err(err);
            }
        };
        report.registered.push(id);

        for child in children {
            let _ = self.insert_subtree(Some(id), child, report);
        }
        Ok(id)
    }

    fn insert(
        &mut self,
        parent: Option<NodeId>,
        descriptor: CommandDescriptor,
    ) -> Result<NodeId, RegistrationError> {
        if let Some(pid) = parent
            && self.node(pid).is_none()
        {
            return Err(RegistrationError::UnknownParent(pid));
        }

        let label = descriptor.label.trim().to_lowercase();
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(RegistrationError::InvalidLabel {
                label: descriptor.label.clone(),
            });
        }
        if let Some(max) = descriptor.max
            && descriptor.min > max
        {
            return Err(RegistrationError::InvalidBounds {
                label,
                min: descriptor.min,
                max,
            });
        }
        if descriptor.force_execute && descriptor.handler.is_none() {
            return Err(RegistrationError::MissingHandler { label });
        }

        let mut aliases: Vec<String> = Vec::new();
        for alias in &descriptor.aliases {
            let alias = alias.trim().to_lowercase();
            if alias.is_empty() || alias == label || aliases.contains(&alias) {
                continue;
            }
            aliases.push(alias);
        }

        let siblings = self.children(parent);
        if let Some(taken) = std::iter::once(&label)
            .chain(aliases.iter())
            .find(|name| siblings.contains(name))
        {
            return Err(RegistrationError::Collision {
                name: taken.clone(),
                parent: self.describe_parent(parent),
            });
        }

        let id = NodeId(self.nodes.len());
        let index = match parent {
            None => &mut self.roots,
            Some(pid) => &mut self.nodes[pid.0].children,
        };
        index.insert_label(label.clone(), id);
        for alias in &aliases {
            index.insert_alias(alias.clone(), id);
        }

        debug!(command = %label, ?parent, aliases = aliases.len(), "registered command");

        self.nodes.push(CommandNode {
            id,
            parent,
            label,
            aliases,
            min: descriptor.min,
            max: descriptor.max,
            permission: descriptor.permission,
            description: descriptor.description,
            usage: descriptor.usage,
            section: descriptor.section,
            interactive_only: descriptor.interactive_only,
            force_execute: descriptor.force_execute,
            handler: descriptor.handler,
            children: ChildIndex::default(),
        });
        Ok(id)
    }
}
