//! Usage lines and help listings rendered from the command tree.
//!
//! - `usage`: one-line usage for a resolution path
//! - `listing`: [`HelpListing`], permission-filtered and grouped by section

mod listing;
mod usage;

pub use listing::{HelpEntry, HelpListing};

pub(crate) use listing::collect;
pub(crate) use usage::{node_tail, render_usage};
