//! `dispatch_safe`: dispatch and tell the principal what went wrong.

use super::Dispatcher;
use crate::error::{DispatchError, HandlerError};
use crate::principal::Principal;

/// Result of [`Dispatcher::dispatch_safe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A handler ran and returned success.
    Executed,
    /// Lines already delivered to the principal.
    Rejected(Vec<String>),
}

impl DispatchOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, DispatchOutcome::Executed)
    }

    /// Rendered lines; empty for `Executed`.
    pub fn lines(&self) -> &[String] {
        match self {
            DispatchOutcome::Executed => &[],
            DispatchOutcome::Rejected(lines) => lines,
        }
    }
}

impl Dispatcher {
    /// Like [`dispatch`](Self::dispatch), but renders any failure through the
    /// principal's message catalog and sends it with [`Principal::send_message`].
    pub fn dispatch_safe<S: AsRef<str>>(
        &self,
        args: &[S],
        principal: &dyn Principal,
    ) -> DispatchOutcome {
        match self.dispatch(args, principal) {
            Ok(()) => DispatchOutcome::Executed,
            Err(err) => {
                let lines = self.render_error(&err, principal);
                for line in &lines {
                    principal.send_message(line);
                }
                DispatchOutcome::Rejected(lines)
            }
        }
    }

    /// Message lines for `err` in the principal's language.
    ///
    /// Usage errors produce the message followed by the usage line. Handler
    /// messages are passed through verbatim; internal faults become the
    /// generic failure text.
    pub fn render_error(&self, err: &DispatchError, principal: &dyn Principal) -> Vec<String> {
        let lang = self.lang_for(principal);
        match err {
            DispatchError::NotEnoughArguments { usage } => {
                vec![lang.not_enough_arguments(), lang.usage(usage)]
            }
            DispatchError::TooManyArguments { usage } => {
                vec![lang.too_many_arguments(), lang.usage(usage)]
            }
            DispatchError::UnknownArgument {
                label,
                usage,
                suggestion,
            } => {
                let mut lines = vec![lang.unknown_argument(label)];
                if let Some(candidate) = suggestion {
                    lines.push(lang.suggestion(candidate));
                }
                lines.push(lang.usage(usage));
                lines
            }
            DispatchError::PermissionDenied { permission } => {
                vec![lang.permission_denied(permission)]
            }
            DispatchError::WrongPrincipalContext => vec![lang.wrong_principal_context()],
            DispatchError::MalformedNumericArgument { raw } => vec![lang.invalid_number(raw)],
            DispatchError::NoHandler { .. } => vec![lang.command_failed()],
            DispatchError::HandlerFault { source, .. } => match source {
                HandlerError::Message(text) => vec![text.clone()],
                HandlerError::InvalidArgument(raw) => vec![lang.invalid_argument(raw)],
                HandlerError::Argument(_) | HandlerError::Internal(_) => {
                    vec![lang.command_failed()]
                }
            },
        }
    }
}
