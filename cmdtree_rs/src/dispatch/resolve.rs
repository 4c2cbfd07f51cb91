//! Tree walk and handler invocation.
//!
//! ```text
//! (parent, level) = (root, 0)
//! loop:
//!   no token at level          -> NotEnoughArguments
//!   token matches a child      -> node = child
//!   no match, parent forced    -> node = parent, level - 1 (fallback)
//!   no match                   -> UnknownArgument
//!   permission / interactive   -> PermissionDenied / WrongPrincipalContext
//!   internal node, not fallback:
//!     tokens left              -> descend (parent = node, level + 1)
//!     none left, forced        -> invoke node
//!     none left                -> NotEnoughArguments
//!   otherwise                  -> invoke node
//! ```

use tracing::{debug, error, warn};

use super::Dispatcher;
use crate::command::{CommandNode, NodeId};
use crate::error::{ArgumentError, DispatchError, DispatchResult, HandlerError};
use crate::parser::CommandContext;
use crate::principal::Principal;

impl Dispatcher {
    /// Resolve `args` against the tree and run the matching handler.
    ///
    /// Framework errors are returned before any handler runs. Handler
    /// failures come back as [`DispatchError::HandlerFault`], except
    /// argument-accessor errors, which map onto their framework kinds.
    pub fn dispatch<S: AsRef<str>>(&self, args: &[S], principal: &dyn Principal) -> DispatchResult {
        let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();
        let mut parent: Option<NodeId> = None;
        let mut level = 0usize;

        loop {
            let Some(token) = args.get(level) else {
                return Err(DispatchError::NotEnoughArguments {
                    usage: self.usage_at(&args, level, parent),
                });
            };
            let token = token.trim();

            let (id, fallback) = match self.tree.lookup(parent, token) {
                Some(id) => (id, false),
                None => match parent {
                    Some(pid) if self.node_is_forced(pid) => {
                        level -= 1;
                        (pid, true)
                    }
                    _ => {
                        debug!(token, level, "no command matches token");
                        return Err(DispatchError::UnknownArgument {
                            label: token.to_lowercase(),
                            usage: self.usage_at(&args, level, parent),
                            suggestion: self.suggest(parent, token, principal),
                        });
                    }
                },
            };
            let Some(node) = self.tree.node(id) else {
                return Err(DispatchError::UnknownArgument {
                    label: token.to_lowercase(),
                    usage: self.usage_at(&args, level, parent),
                    suggestion: None,
                });
            };

            if !node.permission().is_satisfied_by(principal) {
                debug!(command = node.label(), principal = principal.name(), "permission denied");
                return Err(DispatchError::PermissionDenied {
                    permission: node.permission().clone(),
                });
            }
            if node.interactive_only() && !principal.is_interactive() {
                return Err(DispatchError::WrongPrincipalContext);
            }

            if !node.is_leaf() && !fallback {
                if level + 1 < args.len() {
                    parent = Some(id);
                    level += 1;
                    continue;
                }
                if !node.force_execute() {
                    return Err(DispatchError::NotEnoughArguments {
                        usage: self.usage_at(&args, level + 1, Some(id)),
                    });
                }
            }

            return self.invoke(node, &args, level, principal);
        }
    }

    fn node_is_forced(&self, id: NodeId) -> bool {
        self.tree.node(id).is_some_and(CommandNode::force_execute)
    }

    /// Run `node` with `args[..=level]` as parent path and the rest as arguments.
    fn invoke(
        &self,
        node: &CommandNode,
        args: &[&str],
        level: usize,
        principal: &dyn Principal,
    ) -> DispatchResult {
        let split = (level + 1).min(args.len());
        let parent_args: Vec<String> = args[..split].iter().map(|arg| arg.to_string()).collect();
        let context = CommandContext::new(&args[split..], parent_args, principal, self);
        let usage = self.usage_at(args, split, Some(node.id()));
        let command = self.tree.path_of(node.id()).join(" ");

        let Some(handler) = node.handler() else {
            warn!(command = %command, "resolved command has no handler");
            return Err(DispatchError::NoHandler { command });
        };
        if context.len() < node.min_args() {
            return Err(DispatchError::NotEnoughArguments { usage });
        }
        if let Some(max) = node.max_args()
            && context.len() > max
        {
            return Err(DispatchError::TooManyArguments { usage });
        }
        debug!(
            command = %command,
            principal = principal.name(),
            args = context.len(),
            "invoking command"
        );

        match handler(&context, principal) {
            Ok(()) => Ok(()),
            Err(HandlerError::Argument(ArgumentError::OutOfRange { .. })) => {
                Err(DispatchError::NotEnoughArguments { usage })
            }
            Err(HandlerError::Argument(ArgumentError::MalformedNumber { raw })) => {
                Err(DispatchError::MalformedNumericArgument { raw })
            }
            Err(HandlerError::Internal(err)) => {
                error!(
                    command = %command,
                    principal = principal.name(),
                    error = %format!("{err:#}"),
                    "command handler failed"
                );
                if let Some(hook) = &self.fault_hook {
                    hook(&command, &err, principal);
                }
                Err(DispatchError::HandlerFault {
                    command,
                    source: HandlerError::Internal(err),
                })
            }
            Err(source) => {
                debug!(command = %command, error = %source, "command rejected by handler");
                Err(DispatchError::HandlerFault { command, source })
            }
        }
    }
}
