//! # cmdtree
//!
//! **Tree-structured command dispatcher** - resolve nested commands from a raw
//! argument vector, enforce permissions and argument counts, and produce
//! consistent usage and help text when something does not fit.
//!
//! ## Features
//!
//! - **Command Tree** - labels and aliases, matched case-insensitively, nested to any depth
//! - **Force Execute** - a group can run its own handler when no child matches
//! - **Argument Context** - quoted phrases, short-flag clusters, typed accessors
//! - **Permissions** - `a|b` alternatives checked at every step of the walk
//! - **Usage & Help** - generated from the tree, filtered per principal
//! - **Pluggable Messages** - English built in, template catalogs per locale
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree::{CommandDescriptor, Dispatcher, Principal};
//!
//! struct Console;
//!
//! impl Principal for Console {
//!     fn name(&self) -> &str {
//!         "console"
//!     }
//!     fn has_permission(&self, _permission: &str) -> bool {
//!         true
//!     }
//!     fn send_message(&self, message: &str) {
//!         println!("{message}");
//!     }
//! }
//!
//! let mut dispatcher = Dispatcher::new("/eco");
//! dispatcher
//!     .register(
//!         None,
//!         CommandDescriptor::new("economy").child(
//!             CommandDescriptor::new("pay")
//!                 .args(2, Some(2))
//!                 .usage("<player> <amount>")
//!                 .handler(|ctx, who| {
//!                     let amount = ctx.int_at(1)?;
//!                     who.send_message(&format!("paid {amount} to {}", ctx.string_at(0)?));
//!                     Ok(())
//!                 }),
//!         ),
//!     )
//!     .unwrap();
//!
//! assert!(dispatcher.dispatch(&["economy", "pay", "steve", "10"], &Console).is_ok());
//! assert_eq!(dispatcher.usage_for(&["economy"]), "/eco economy <pay>");
//! ```
//!
//! ## Demo Shell
//!
//! ```bash
//! cmdtree --grant '*' help -d
//! cmdtree --grant economy.pay --interactive economy pay alex 10
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Command descriptors, registered nodes and the registrar.
pub mod command;

/// Tree walk, handler invocation and failure rendering.
pub mod dispatch;

/// Error types for every layer.
pub mod error;

/// Usage lines and help listings.
pub mod help;

/// Tokenizer and the handler-facing argument context.
pub mod parser;

/// The issuer of a command and its permission requirements.
pub mod principal;

// ============================================================================
// Support Modules
// ============================================================================

/// TOML configuration.
pub mod config;

/// Message catalogs and per-principal language selection.
pub mod lang;

/// Demo shell used by the `cmdtree` binary.
pub mod shell;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{CommandDescriptor, CommandNode, CommandTree, NodeId, RegistrationReport};
pub use config::DispatcherConfig;
pub use dispatch::{DispatchOutcome, Dispatcher, FaultHook, SharedDispatcher};
pub use error::{
    ArgumentError, DispatchError, DispatchResult, HandlerError, HandlerResult, RegistrationError,
};
pub use help::{HelpEntry, HelpListing};
pub use lang::{CommandLang, DefaultLang, LangProvider};
pub use parser::{CommandContext, tokenize};
pub use principal::{PermissionSpec, Principal};
