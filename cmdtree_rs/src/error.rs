//! Error types for registration, argument access, handlers and dispatch.
//!
//! Framework-level failures (`DispatchError` minus `HandlerFault`) are plain
//! resolution decisions: nothing has run yet when they are produced, so the
//! caller may retry with corrected input. `HandlerFault` wraps whatever the
//! handler itself returned.

use thiserror::Error;

use crate::command::NodeId;
use crate::principal::PermissionSpec;

/// Result of a single `dispatch` call.
pub type DispatchResult = Result<(), DispatchError>;

/// Result type returned by command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Errors raised by the strict accessors of [`CommandContext`](crate::CommandContext).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// Requested argument index does not exist.
    #[error("argument {index} requested but only {len} given")]
    OutOfRange { index: usize, len: usize },

    /// Argument exists but is not a number.
    #[error("expected a number, found \"{raw}\"")]
    MalformedNumber { raw: String },
}

/// Errors a command handler may return.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A strict context accessor failed (propagated with `?`).
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// Domain error; the text is shown to the principal as-is.
    #[error("{0}")]
    Message(String),

    /// The handler rejected one of its arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Anything else. Logged, and reported to the principal as a generic failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    /// Domain error with a user-facing message.
    pub fn message(text: impl Into<String>) -> Self {
        HandlerError::Message(text.into())
    }

    /// Rejected argument, rendered through the invalid-argument message.
    pub fn invalid_argument(raw: impl Into<String>) -> Self {
        HandlerError::InvalidArgument(raw.into())
    }
}

/// Every way a dispatch can fail.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Fewer tokens than the resolved node (or the tree walk) needs.
    #[error("not enough arguments (usage: {usage})")]
    NotEnoughArguments { usage: String },

    /// More tokens than the node's bounded maximum.
    #[error("too many arguments (usage: {usage})")]
    TooManyArguments { usage: String },

    /// Token matched no label or alias and no force-execute fallback applied.
    #[error("unknown argument '{label}' (usage: {usage})")]
    UnknownArgument {
        label: String,
        usage: String,
        /// Closest sibling label, when one is near enough to be a typo.
        suggestion: Option<String>,
    },

    /// Principal holds none of the node's permissions.
    #[error("permission denied (requires {permission})")]
    PermissionDenied { permission: PermissionSpec },

    /// Node needs an interactive principal.
    #[error("command requires an interactive principal")]
    WrongPrincipalContext,

    /// A strict numeric accessor could not parse its token.
    #[error("expected a number, found \"{raw}\"")]
    MalformedNumericArgument { raw: String },

    /// The resolved node was registered without a handler.
    #[error("command '{command}' has no handler")]
    NoHandler {
        /// Space-separated path of the resolved node.
        command: String,
    },

    /// The handler itself failed.
    #[error("command '{command}' failed: {source}")]
    HandlerFault {
        /// Space-separated path of the command that failed.
        command: String,
        source: HandlerError,
    },
}

impl DispatchError {
    /// Usage string carried by usage-type errors.
    pub fn usage(&self) -> Option<&str> {
        match self {
            DispatchError::NotEnoughArguments { usage }
            | DispatchError::TooManyArguments { usage }
            | DispatchError::UnknownArgument { usage, .. } => Some(usage),
            _ => None,
        }
    }

    /// True for every kind except `HandlerFault`.
    pub fn is_framework(&self) -> bool {
        !matches!(self, DispatchError::HandlerFault { .. })
    }
}

/// Why a descriptor was not added to the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Primary label is empty or contains whitespace.
    #[error("invalid command label '{label}'")]
    InvalidLabel { label: String },

    /// Label or alias already taken by a sibling (case-insensitive).
    #[error("'{name}' is already registered under {parent}")]
    Collision { name: String, parent: String },

    /// Declared minimum exceeds the bounded maximum.
    #[error("command '{label}' declares min {min} > max {max}")]
    InvalidBounds { label: String, min: usize, max: usize },

    /// `force_execute` without a handler to execute.
    #[error("command '{label}' is force-executable but has no handler")]
    MissingHandler { label: String },

    /// Parent handle does not belong to this tree.
    #[error("parent node {0:?} does not exist")]
    UnknownParent(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_accessor() {
        let err = DispatchError::TooManyArguments {
            usage: "/cmd pay <player> <amount>".into(),
        };
        assert_eq!(err.usage(), Some("/cmd pay <player> <amount>"));
        assert!(err.is_framework());
        assert!(DispatchError::WrongPrincipalContext.usage().is_none());

        let err = DispatchError::NoHandler {
            command: "mail draft".into(),
        };
        assert!(err.is_framework());
        assert!(err.usage().is_none());
        assert_eq!(err.to_string(), "command 'mail draft' has no handler");
    }

    #[test]
    fn test_handler_fault_is_not_framework() {
        let err = DispatchError::HandlerFault {
            command: "economy pay".into(),
            source: HandlerError::message("insufficient funds"),
        };
        assert!(!err.is_framework());
        assert_eq!(
            err.to_string(),
            "command 'economy pay' failed: insufficient funds"
        );
    }

    #[test]
    fn test_argument_error_converts() {
        let err: HandlerError = ArgumentError::MalformedNumber { raw: "ten".into() }.into();
        assert!(matches!(err, HandlerError::Argument(_)));
        assert_eq!(err.to_string(), "expected a number, found \"ten\"");
    }
}
