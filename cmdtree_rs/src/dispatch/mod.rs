//! Dispatcher - owns the command tree and turns argument vectors into handler calls.
//!
//! - `resolve`: the tree walk and handler invocation ([`Dispatcher::dispatch`])
//! - `outcome`: rendering failures for the principal ([`Dispatcher::dispatch_safe`])
//! - `shared`: [`SharedDispatcher`], swap-on-reload handle for multi-threaded hosts

mod outcome;
mod resolve;
mod shared;

pub use outcome::DispatchOutcome;
pub use shared::SharedDispatcher;

use std::fmt;

use crate::command::{CommandDescriptor, CommandTree, NodeId, RegistrationReport};
use crate::config::{DEFAULT_HELP_COMMAND, DispatcherConfig};
use crate::error::{DispatchError, RegistrationError};
use crate::help::{self, HelpListing};
use crate::lang::{CommandLang, LangProvider, SimpleLangProvider};
use crate::principal::Principal;

/// Host callback for unexpected handler faults (`HandlerError::Internal`).
///
/// Receives the command path, the error and the principal that ran it.
pub type FaultHook = Box<dyn Fn(&str, &anyhow::Error, &dyn Principal) + Send + Sync>;

/// Command tree plus the presentation settings used for diagnostics.
///
/// Build it, register commands, then share it read-only: `dispatch` takes
/// `&self` and keeps no state between calls.
pub struct Dispatcher {
    tree: CommandTree,
    display_name: String,
    help_command: String,
    lang: Box<dyn LangProvider>,
    fault_hook: Option<FaultHook>,
}

impl Dispatcher {
    /// Empty dispatcher. `display_name` prefixes every usage line (e.g. `"/eco"`).
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            tree: CommandTree::new(),
            display_name: display_name.into(),
            help_command: DEFAULT_HELP_COMMAND.to_string(),
            lang: Box::new(SimpleLangProvider::default()),
            fault_hook: None,
        }
    }

    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new(config.display_name.clone())
            .with_help_command(config.help_command.clone())
            .with_lang_provider(config.lang_provider())
    }

    /// Command named in the usage line when nothing resolves.
    pub fn with_help_command(mut self, label: impl Into<String>) -> Self {
        self.help_command = label.into();
        self
    }

    pub fn with_lang_provider(mut self, provider: impl LangProvider + 'static) -> Self {
        self.lang = Box::new(provider);
        self
    }

    pub fn with_fault_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &anyhow::Error, &dyn Principal) + Send + Sync + 'static,
    {
        self.fault_hook = Some(Box::new(hook));
        self
    }

    /// Register one descriptor and its nested children under `parent`
    /// (`None` for a root command).
    pub fn register(
        &mut self,
        parent: Option<NodeId>,
        descriptor: CommandDescriptor,
    ) -> Result<NodeId, RegistrationError> {
        self.tree.register(parent, descriptor)
    }

    /// Register a batch, skipping and reporting the descriptors that fail.
    pub fn register_all<I>(&mut self, parent: Option<NodeId>, descriptors: I) -> RegistrationReport
    where
        I: IntoIterator<Item = CommandDescriptor>,
    {
        self.tree.register_all(parent, descriptors)
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn help_command(&self) -> &str {
        &self.help_command
    }

    /// Message catalog for `principal`.
    pub fn lang_for(&self, principal: &dyn Principal) -> &dyn CommandLang {
        self.lang.lang_for(principal)
    }

    /// Usage line for a path of labels/aliases.
    ///
    /// Tokens are followed as far as they resolve. Internal nodes end in
    /// `<child|labels>`, leaves in their usage hint; when not even the first
    /// token resolves the line points at the help command.
    pub fn usage_for<S: AsRef<str>>(&self, path: &[S]) -> String {
        let (node, consumed) = self.tree.walk(path);
        self.usage_at(path, consumed, node)
    }

    /// Help listing below `path`, filtered by what `principal` may run.
    ///
    /// Every path token must resolve (`UnknownArgument` otherwise). A node on
    /// the path the principal may not use yields an empty listing.
    pub fn help_for<S: AsRef<str>>(
        &self,
        path: &[S],
        principal: &dyn Principal,
        deep: bool,
    ) -> Result<HelpListing, DispatchError> {
        let mut current = None;
        for (index, token) in path.iter().enumerate() {
            let token = token.as_ref().trim();
            let Some(id) = self.tree.lookup(current, token) else {
                return Err(DispatchError::UnknownArgument {
                    label: token.to_lowercase(),
                    usage: self.usage_at(path, index, current),
                    suggestion: self.suggest(current, token, principal),
                });
            };
            let permitted = self
                .tree
                .node(id)
                .is_some_and(|node| node.permission().is_satisfied_by(principal));
            if !permitted {
                return Ok(HelpListing::default());
            }
            current = Some(id);
        }
        Ok(help::collect(
            &self.tree,
            &self.display_name,
            current,
            principal,
            deep,
        ))
    }

    /// Usage for `node` reached by the first `consumed` tokens of `path`.
    pub(crate) fn usage_at<S: AsRef<str>>(
        &self,
        path: &[S],
        consumed: usize,
        node: Option<NodeId>,
    ) -> String {
        let Some(node) = node.and_then(|id| self.tree.node(id)) else {
            return help::render_usage(&self.display_name, &[self.help_command.as_str()], None);
        };
        let labels: Vec<String> = path
            .iter()
            .take(consumed)
            .map(|token| token.as_ref().trim().to_lowercase())
            .collect();
        let tail = help::node_tail(node);
        help::render_usage(&self.display_name, &labels, tail.as_deref())
    }

    /// Closest label among the children of `parent` that `principal` may use.
    pub(crate) fn suggest(
        &self,
        parent: Option<NodeId>,
        token: &str,
        principal: &dyn Principal,
    ) -> Option<String> {
        let input = token.to_lowercase();
        let mut best_match: Option<(&str, usize)> = None;

        for (label, id) in self.tree.children(parent).entries() {
            let permitted = self
                .tree
                .node(id)
                .is_some_and(|node| node.permission().is_satisfied_by(principal));
            if !permitted {
                continue;
            }
            let distance = strsim::levenshtein(&input, label);
            if distance <= 2 && best_match.is_none_or(|(_, best)| distance < best) {
                best_match = Some((label, distance));
            }
        }

        best_match.map(|(label, _)| label.to_string())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("display_name", &self.display_name)
            .field("help_command", &self.help_command)
            .field("commands", &self.tree.len())
            .field("fault_hook", &self.fault_hook.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Guest;

    impl Principal for Guest {
        fn name(&self) -> &str {
            "guest"
        }
        fn has_permission(&self, permission: &str) -> bool {
            permission == "economy.balance"
        }
        fn send_message(&self, _message: &str) {}
    }

    fn economy() -> Dispatcher {
        let mut dispatcher = Dispatcher::new("/cmd");
        dispatcher
            .register(
                None,
                CommandDescriptor::new("economy")
                    .alias("eco")
                    .child(
                        CommandDescriptor::new("pay")
                            .usage("<player> <amount>")
                            .permission("economy.pay")
                            .handler(|_, _| Ok(())),
                    )
                    .child(
                        CommandDescriptor::new("balance")
                            .permission("economy.balance")
                            .handler(|_, _| Ok(())),
                    ),
            )
            .expect("register economy");
        dispatcher
    }

    #[test]
    fn test_usage_for_paths() {
        let dispatcher = economy();
        assert_eq!(dispatcher.usage_for(&["economy"]), "/cmd economy <balance|pay>");
        assert_eq!(dispatcher.usage_for(&["ECO", "pay"]), "/cmd eco pay <player> <amount>");
        assert_eq!(dispatcher.usage_for(&["economy", "balance"]), "/cmd economy balance");
        assert_eq!(dispatcher.usage_for(&["nope"]), "/cmd help");
        assert_eq!(dispatcher.usage_for::<&str>(&[]), "/cmd help");
    }

    #[test]
    fn test_help_command_is_configurable() {
        let dispatcher = Dispatcher::new("/eco").with_help_command("?");
        assert_eq!(dispatcher.usage_for(&["x"]), "/eco ?");
        assert_eq!(dispatcher.help_command(), "?");
    }

    #[test]
    fn test_suggest_only_permitted_close_labels() {
        let dispatcher = economy();
        let eco = dispatcher.tree().lookup(None, "economy");
        assert_eq!(
            dispatcher.suggest(eco, "balanc", &Guest),
            Some("balance".to_string())
        );
        // "pay" is close but Guest may not use it
        assert_eq!(dispatcher.suggest(eco, "pey", &Guest), None);
        assert_eq!(dispatcher.suggest(eco, "withdraw", &Guest), None);
    }

    #[test]
    fn test_from_config() {
        let config = DispatcherConfig::from_toml_str("display_name = \"/bank\"\nhelp_command = \"info\"")
            .expect("valid config");
        let dispatcher = Dispatcher::from_config(&config);
        assert_eq!(dispatcher.display_name(), "/bank");
        assert_eq!(dispatcher.usage_for(&["x"]), "/bank info");
    }
}
