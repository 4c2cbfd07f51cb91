//! Argument parsing: tokenizer and the handler-facing context.
//!
//! - `tokenizer`: quote merging and short-flag extraction
//! - `context`: [`CommandContext`], typed accessors over the tokenized arguments

mod context;
mod tokenizer;

pub use context::CommandContext;
pub use tokenizer::{Tokenized, tokenize};
