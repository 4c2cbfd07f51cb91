//! Registered command nodes and their child indexes.

use std::collections::{BTreeMap, HashMap};

use super::descriptor::Handler;
use crate::principal::PermissionSpec;

/// Stable handle of a node inside one [`CommandTree`](super::CommandTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Children of one parent (or of the root): primary labels kept sorted for
/// listings, aliases in a separate unordered map.
#[derive(Debug, Clone, Default)]
pub struct ChildIndex {
    labels: BTreeMap<String, NodeId>,
    aliases: HashMap<String, NodeId>,
}

impl ChildIndex {
    /// Case-insensitive lookup, labels first, then aliases.
    pub fn lookup(&self, token: &str) -> Option<NodeId> {
        let key = token.to_lowercase();
        self.labels
            .get(&key)
            .or_else(|| self.aliases.get(&key))
            .copied()
    }

    /// Whether `name` is taken by a label or alias (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.labels.contains_key(&key) || self.aliases.contains_key(&key)
    }

    /// Primary labels in alphabetical order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.keys().map(String::as_str)
    }

    /// `(label, node)` pairs in alphabetical order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub(crate) fn insert_label(&mut self, label: String, id: NodeId) {
        self.labels.insert(label, id);
    }

    pub(crate) fn insert_alias(&mut self, alias: String, id: NodeId) {
        self.aliases.insert(alias, id);
    }
}

/// One command in the tree, leaf or internal.
pub struct CommandNode {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) label: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) min: usize,
    pub(crate) max: Option<usize>,
    pub(crate) permission: PermissionSpec,
    pub(crate) description: String,
    pub(crate) usage: String,
    pub(crate) section: String,
    pub(crate) interactive_only: bool,
    pub(crate) force_execute: bool,
    pub(crate) handler: Option<Handler>,
    pub(crate) children: ChildIndex,
}

impl CommandNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Lower-cased primary label.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn min_args(&self) -> usize {
        self.min
    }

    /// `None` when unbounded.
    pub fn max_args(&self) -> Option<usize> {
        self.max
    }

    pub fn permission(&self) -> &PermissionSpec {
        &self.permission
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn interactive_only(&self) -> bool {
        self.interactive_only
    }

    pub fn force_execute(&self) -> bool {
        self.force_execute
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn children(&self) -> &ChildIndex {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Internal node that can never run itself: only its descendants can.
    pub fn is_group(&self) -> bool {
        !self.is_leaf() && !self.force_execute
    }

    pub(crate) fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandNode")
            .field("id", &self.id)
            .field("parent", &self.parent)
            .field("label", &self.label)
            .field("aliases", &self.aliases)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("permission", &self.permission)
            .field("force_execute", &self.force_execute)
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_index_lookup_prefers_labels() {
        let mut index = ChildIndex::default();
        index.insert_label("pay".into(), NodeId(0));
        index.insert_alias("give".into(), NodeId(0));
        index.insert_label("balance".into(), NodeId(1));

        assert_eq!(index.lookup("PAY"), Some(NodeId(0)));
        assert_eq!(index.lookup("Give"), Some(NodeId(0)));
        assert_eq!(index.lookup("bal"), None);
        assert!(index.contains("GIVE"));
        assert_eq!(index.labels().collect::<Vec<_>>(), vec!["balance", "pay"]);
        assert_eq!(index.len(), 2);
    }
}
