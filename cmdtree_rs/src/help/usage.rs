//! Usage line rendering.
//!
//! ```text
//! /cmd economy <balance|pay>       internal node: child labels
//! /cmd economy pay <player> <n>    leaf: the node's usage hint
//! /cmd help                        nothing resolved
//! ```

use crate::command::CommandNode;

/// What follows the path in a usage line: `<a|b>` for a node with children,
/// otherwise its usage hint. `None` for a leaf without a hint.
pub(crate) fn node_tail(node: &CommandNode) -> Option<String> {
    if !node.is_leaf() {
        let labels: Vec<&str> = node.children().labels().collect();
        return Some(format!("<{}>", labels.join("|")));
    }
    let hint = node.usage().trim();
    (!hint.is_empty()).then(|| hint.to_string())
}

/// Join the displayed name, path tokens and tail with single spaces.
pub(crate) fn render_usage<S: AsRef<str>>(
    display_name: &str,
    path: &[S],
    tail: Option<&str>,
) -> String {
    std::iter::once(display_name)
        .chain(path.iter().map(|token| token.as_ref()))
        .chain(tail)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandDescriptor, CommandTree};

    #[test]
    fn test_tail_for_internal_and_leaf() {
        let mut tree = CommandTree::new();
        let economy = tree
            .register(
                None,
                CommandDescriptor::new("economy")
                    .usage("ignored for groups")
                    .child(CommandDescriptor::new("pay").usage(" <player> <amount> "))
                    .child(CommandDescriptor::new("balance")),
            )
            .expect("register");

        let node = tree.node(economy).expect("economy");
        assert_eq!(node_tail(node).as_deref(), Some("<balance|pay>"));

        let pay = tree.lookup(Some(economy), "pay").expect("pay");
        let pay = tree.node(pay).expect("pay node");
        assert_eq!(node_tail(pay).as_deref(), Some("<player> <amount>"));

        let balance = tree.lookup(Some(economy), "balance").expect("balance");
        assert_eq!(node_tail(tree.node(balance).expect("balance node")), None);
    }

    #[test]
    fn test_render_skips_empty_parts() {
        assert_eq!(render_usage("/cmd", &["help"], None), "/cmd help");
        assert_eq!(
            render_usage("/cmd", &["economy", "pay"], Some("<player>")),
            "/cmd economy pay <player>"
        );
        assert_eq!(render_usage("", &["tp"], Some("")), "tp");
    }
}
