//! The shell user as a [`Principal`].

use std::cell::RefCell;
use std::collections::BTreeSet;

use crate::config::ShellConfig;
use crate::principal::Principal;

/// Principal whose messages are buffered until the shell prints them.
#[derive(Debug, Default)]
pub struct ShellPrincipal {
    name: String,
    permissions: BTreeSet<String>,
    interactive: bool,
    locale: Option<String>,
    outbox: RefCell<Vec<String>>,
}

impl ShellPrincipal {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        let mut principal = Self::new(config.principal.clone());
        principal.grant_all(config.permissions.iter().cloned());
        principal.interactive = config.interactive;
        principal.locale = config.locale.clone();
        principal
    }

    /// `"*"` grants every permission.
    pub fn grant_all<I: IntoIterator<Item = String>>(&mut self, permissions: I) {
        self.permissions.extend(permissions);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Drain everything sent so far.
    pub fn take_messages(&self) -> Vec<String> {
        self.outbox.take()
    }
}

impl Principal for ShellPrincipal {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains("*") || self.permissions.contains(permission)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn send_message(&self, message: &str) {
        self.outbox.borrow_mut().push(message.to_string());
    }
}
