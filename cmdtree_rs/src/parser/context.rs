//! CommandContext - the typed view a handler receives.
//!
//! Built by the dispatcher after resolution:
//!
//! ```text
//! input:   /cmd economy pay steve 'ten coins' -s
//! parent:  ["economy", "pay"]          (labels consumed by the tree walk)
//! args:    ["steve", "ten coins"]      (tokenized remainder)
//! flags:   {s}
//! ```

use std::collections::BTreeSet;
use std::str::FromStr;

use super::tokenizer::tokenize;
use crate::dispatch::Dispatcher;
use crate::error::ArgumentError;
use crate::principal::Principal;

/// Immutable per-call argument view.
#[derive(Clone)]
pub struct CommandContext<'a> {
    args: Vec<String>,
    parent_args: Vec<String>,
    flags: BTreeSet<char>,
    principal: &'a dyn Principal,
    dispatcher: &'a Dispatcher,
}

impl<'a> CommandContext<'a> {
    /// Tokenize `raw_args` and wrap them together with the consumed path.
    pub fn new<S: AsRef<str>>(
        raw_args: &[S],
        parent_args: Vec<String>,
        principal: &'a dyn Principal,
        dispatcher: &'a Dispatcher,
    ) -> Self {
        let tokenized = tokenize(raw_args);
        Self {
            args: tokenized.tokens,
            parent_args,
            flags: tokenized.flags,
            principal,
            dispatcher,
        }
    }

    /// Number of remaining (non-flag) arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn string_at(&self, index: usize) -> Result<&str, ArgumentError> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or(ArgumentError::OutOfRange {
                index,
                len: self.args.len(),
            })
    }

    pub fn string_or<'s>(&'s self, index: usize, default: &'s str) -> &'s str {
        self.args.get(index).map_or(default, String::as_str)
    }

    pub fn int_at(&self, index: usize) -> Result<i64, ArgumentError> {
        self.parse_at(index)
    }

    pub fn int_or(&self, index: usize, default: i64) -> i64 {
        self.parse_at(index).unwrap_or(default)
    }

    pub fn double_at(&self, index: usize) -> Result<f64, ArgumentError> {
        self.parse_at(index)
    }

    pub fn double_or(&self, index: usize, default: f64) -> f64 {
        self.parse_at(index).unwrap_or(default)
    }

    fn parse_at<T: FromStr>(&self, index: usize) -> Result<T, ArgumentError> {
        let raw = self.string_at(index)?;
        raw.parse::<T>().map_err(|_| ArgumentError::MalformedNumber {
            raw: raw.to_string(),
        })
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }

    pub fn flags(&self) -> &BTreeSet<char> {
        &self.flags
    }

    /// Remaining arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Tokens consumed while descending the tree, as typed.
    pub fn parent_args(&self) -> &[String] {
        &self.parent_args
    }

    pub fn parent_arg(&self, index: usize) -> Option<&str> {
        self.parent_args.get(index).map(String::as_str)
    }

    /// Parent path followed by the remaining arguments.
    pub fn full_path(&self) -> Vec<&str> {
        self.parent_args
            .iter()
            .chain(self.args.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn principal(&self) -> &'a dyn Principal {
        self.principal
    }

    /// Dispatcher that resolved this call, e.g. for help listings.
    pub fn dispatcher(&self) -> &'a Dispatcher {
        self.dispatcher
    }

    /// Context one or more levels deeper: the first `levels` arguments move
    /// into the parent path. `None` when fewer than `levels` arguments remain.
    pub fn sub_context(&self, levels: usize) -> Option<CommandContext<'a>> {
        if self.args.len() < levels {
            return None;
        }
        let mut parent_args = self.parent_args.clone();
        parent_args.extend(self.args[..levels].iter().cloned());
        Some(CommandContext {
            args: self.args[levels..].to_vec(),
            parent_args,
            flags: self.flags.clone(),
            principal: self.principal,
            dispatcher: self.dispatcher,
        })
    }

    /// Usage line for the command this context was built for.
    pub fn usage(&self) -> String {
        self.dispatcher.usage_for(&self.parent_args)
    }
}

impl std::fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("args", &self.args)
            .field("parent_args", &self.parent_args)
            .field("flags", &self.flags)
            .field("principal", &self.principal.name())
            .finish()
    }
}
