//! The issuer of a command, as seen by the dispatcher.
//!
//! Hosts implement [`Principal`] for whatever represents a caller on their
//! side (a console, a chat user, a remote session). The dispatcher only reads
//! from it, apart from [`Principal::send_message`] which `dispatch_safe` uses
//! to deliver rendered diagnostics.

use std::fmt;

/// Who issued a command.
pub trait Principal {
    /// Display name, used in logs.
    fn name(&self) -> &str;

    /// Whether the principal holds a single permission string.
    fn has_permission(&self, permission: &str) -> bool;

    /// Whether the principal is an interactive actor (a player, a logged-in
    /// user) rather than a console or automation.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Preferred locale tag, if any. Consulted by locale-aware message providers.
    fn locale(&self) -> Option<&str> {
        None
    }

    /// Deliver one line of text to the principal.
    fn send_message(&self, message: &str);
}

/// Permission requirement of a node: any one of the listed strings suffices.
///
/// Written as a single string with `|` between alternatives, e.g.
/// `"economy.pay|economy.admin"`. An empty requirement is always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSpec {
    any_of: Vec<String>,
}

impl PermissionSpec {
    /// Requirement that every principal satisfies.
    pub fn none() -> Self {
        Self::default()
    }

    /// Parse a `|`-separated list. Blank alternatives are dropped.
    pub fn parse(spec: &str) -> Self {
        let any_of = spec
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        Self { any_of }
    }

    /// The alternatives, in declaration order.
    pub fn alternatives(&self) -> &[String] {
        &self.any_of
    }

    pub fn is_empty(&self) -> bool {
        self.any_of.is_empty()
    }

    /// True when the requirement is empty or the principal holds one alternative.
    pub fn is_satisfied_by(&self, principal: &dyn Principal) -> bool {
        self.any_of.is_empty() || self.any_of.iter().any(|p| principal.has_permission(p))
    }
}

impl From<&str> for PermissionSpec {
    fn from(spec: &str) -> Self {
        Self::parse(spec)
    }
}

impl fmt::Display for PermissionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.any_of.join("|"))
    }
}
