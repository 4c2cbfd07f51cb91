//! Demo host for the dispatcher: a line-oriented shell over a sample tree.
//!
//! - `principal`: [`ShellPrincipal`], permissions and locale from config or flags
//! - `builtins`: the sample commands (`help`, `economy`, `tp`, `say`, `calc`)
//! - `entrypoint`: one-shot and REPL runners used by the `cmdtree` binary

mod builtins;
pub mod entrypoint;
mod principal;

pub use builtins::sample_commands;
pub use entrypoint::{build_dispatcher, run_command, run_repl};
pub use principal::ShellPrincipal;
