//! CommandDescriptor - what a host hands to the registrar.
//!
//! A descriptor carries labels, argument bounds, permission and help text,
//! plus the handler itself and any nested subcommands.

use std::fmt;
use std::sync::Arc;

use crate::error::HandlerResult;
use crate::parser::CommandContext;
use crate::principal::{PermissionSpec, Principal};

/// Shared, thread-safe command handler.
pub type Handler = Arc<dyn Fn(&CommandContext<'_>, &dyn Principal) -> HandlerResult + Send + Sync>;

/// Declarative description of one command and its subcommands.
///
/// ```
/// use cmdtree::CommandDescriptor;
///
/// let pay = CommandDescriptor::new("pay")
///     .alias("give")
///     .args(2, Some(2))
///     .usage("<player> <amount>")
///     .description("Send money to another player")
///     .permission("economy.pay")
///     .handler(|ctx, _who| {
///         let _amount = ctx.int_at(1)?;
///         Ok(())
///     });
/// let economy = CommandDescriptor::new("economy").child(pay);
/// assert_eq!(economy.children().len(), 1);
/// ```
#[derive(Clone)]
pub struct CommandDescriptor {
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
    pub(crate) children: Vec<CommandDescriptor>,
}

impl CommandDescriptor {
    /// New descriptor with no handler, no bounds and no permission requirement.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            aliases: Vec::new(),
            min: 0,
            max: None,
            permission: PermissionSpec::none(),
            description: String::new(),
            usage: String::new(),
            section: String::new(),
            interactive_only: false,
            force_execute: false,
            handler: None,
            children: Vec::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Minimum and maximum argument count. `None` means unbounded.
    pub fn args(mut self, min: usize, max: Option<usize>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn min_args(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    pub fn max_args(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Permission requirement, `|`-separated alternatives.
    pub fn permission(mut self, spec: &str) -> Self {
        self.permission = PermissionSpec::parse(spec);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Argument hint shown after the command path, e.g. `"<player> [amount]"`.
    pub fn usage(mut self, hint: impl Into<String>) -> Self {
        self.usage = hint.into();
        self
    }

    /// Help section. Section names are case-sensitive; empty is valid.
    pub fn section(mut self, name: impl Into<String>) -> Self {
        self.section = name.into();
        self
    }

    /// Only interactive principals may run this command.
    pub fn interactive_only(mut self) -> Self {
        self.interactive_only = true;
        self
    }

    /// Run this node's own handler when no child matches or no argument is left.
    pub fn force_execute(mut self) -> Self {
        self.force_execute = true;
        self
    }

    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &dyn Principal) -> HandlerResult + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Nested subcommand, registered together with this node.
    pub fn child(mut self, child: CommandDescriptor) -> Self {
        self.children.push(child);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[CommandDescriptor] {
        &self.children
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("label", &self.label)
            .field("aliases", &self.aliases)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("permission", &self.permission)
            .field("force_execute", &self.force_execute)
            .field("has_handler", &self.handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}
