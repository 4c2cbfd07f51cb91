//! Argument tokenizer: quote merging and short-flag extraction.
//!
//! Input arrives already whitespace-split by the caller (a chat line, a shell
//! argv). The tokenizer re-joins quoted phrases that the split tore apart and
//! pulls `-abc` style flag clusters out of the positional list.
//!
//! ```text
//! ["say", "'hello", "world'", "-v"]  ->  tokens ["say", "hello world"], flags {v}
//! ```

use std::collections::BTreeSet;

/// Result of tokenizing one argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Resolved positional tokens, de-quoted, flags removed, in input order.
    pub tokens: Vec<String>,
    /// Single-character flags collected from every flag cluster.
    pub flags: BTreeSet<char>,
}

impl Tokenized {
    /// Whether `flag` appeared in any flag cluster.
    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(&flag)
    }
}

/// Tokenize a raw argument vector.
///
/// Quoted phrases are merged first, flags are extracted second, so a quoted
/// `'-ab'` still ends up as a flag cluster. An unclosed quote swallows every
/// remaining token instead of failing.
pub fn tokenize<S: AsRef<str>>(raw: &[S]) -> Tokenized {
    let mut slots: Vec<String> = raw.iter().map(|s| s.as_ref().trim().to_string()).collect();

    merge_quotes(&mut slots);
    let flags = extract_flags(&mut slots);

    let tokens = slots
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Tokenized { tokens, flags }
}

fn quote_char(token: &str) -> Option<char> {
    match token.chars().next() {
        Some(c @ ('\'' | '"')) => Some(c),
        _ => None,
    }
}

fn merge_quotes(slots: &mut [String]) {
    let mut i = 0;
    while i < slots.len() {
        let Some(quote) = quote_char(&slots[i]) else {
            i += 1;
            continue;
        };

        // Complete quoted token: 'word'
        if slots[i].len() > 1 && slots[i].ends_with(quote) {
            let inner = slots[i][1..slots[i].len() - 1].to_string();
            slots[i] = inner;
            i += 1;
            continue;
        }

        let mut phrase = slots[i][1..].to_string();
        let mut closed_at = None;
        for inner in (i + 1)..slots.len() {
            let part = slots[inner].trim();
            if part.is_empty() {
                continue;
            }
            phrase.push(' ');
            phrase.push_str(part);
            if part.ends_with(quote) {
                phrase.pop();
                closed_at = Some(inner);
                break;
            }
        }

        let last = closed_at.unwrap_or(slots.len() - 1);
        slots[i] = phrase;
        for slot in slots.iter_mut().take(last + 1).skip(i + 1) {
            slot.clear();
        }
        i = last + 1;
    }
}

fn is_flag_cluster(token: &str) -> bool {
    token.len() > 1
        && token.starts_with('-')
        && token[1..].chars().all(|c| c.is_ascii_alphabetic())
}

fn extract_flags(slots: &mut [String]) -> BTreeSet<char> {
    let mut flags = BTreeSet::new();
    for slot in slots.iter_mut() {
        if is_flag_cluster(slot) {
            flags.extend(slot[1..].chars());
            slot.clear();
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(raw: &[&str]) -> Vec<String> {
        tokenize(raw).tokens
    }

    #[test]
    fn test_plain_tokens_unchanged() {
        let raw = ["give", "steve", "diamond", "64"];
        let out = tokenize(&raw);
        assert_eq!(out.tokens, raw);
        assert!(out.flags.is_empty());

        // tokenizing the output again is a no-op
        let again = tokenize(&out.tokens);
        assert_eq!(again, out);
    }

    #[test]
    fn test_quote_merging() {
        let out = tokenize(&["say", "'hello", "world'"]);
        assert_eq!(out.tokens, vec!["say", "hello world"]);
        assert!(out.flags.is_empty());
    }

    #[test]
    fn test_double_quotes_and_middle_tokens() {
        assert_eq!(toks(&["\"a", "b", "c\"", "d"]), vec!["a b c", "d"]);
    }

    #[test]
    fn test_single_complete_quoted_token() {
        assert_eq!(toks(&["'word'", "x"]), vec!["word", "x"]);
        assert_eq!(toks(&["\"\""]), Vec::<String>::new());
    }

    #[test]
    fn test_mismatched_quote_does_not_close() {
        // a double quote does not close a single-quoted phrase
        assert_eq!(toks(&["'a", "b\"", "c'"]), vec!["a b\" c"]);
    }

    #[test]
    fn test_unclosed_quote_absorbs_rest() {
        assert_eq!(toks(&["'open", "ended"]), vec!["open ended"]);
        assert_eq!(
            toks(&["x", "\"never", "closed", "at", "all"]),
            vec!["x", "never closed at all"]
        );
    }

    #[test]
    fn test_lone_quote_starts_phrase() {
        assert_eq!(toks(&["'", "spaced", "out'"]), vec!["spaced out"]);
    }

    #[test]
    fn test_flag_extraction() {
        let out = tokenize(&["-ab", "target"]);
        assert_eq!(out.tokens, vec!["target"]);
        assert!(out.has_flag('a'));
        assert!(out.has_flag('b'));
        assert_eq!(out.flags.len(), 2);
    }

    #[test]
    fn test_numeric_dash_is_not_flag() {
        let out = tokenize(&["-1", "-a1", "-", "--x"]);
        assert_eq!(out.tokens, vec!["-1", "-a1", "-", "--x"]);
        assert!(out.flags.is_empty());
    }

    #[test]
    fn test_quoted_flag_is_still_flag() {
        let out = tokenize(&["'-f'", "y"]);
        assert_eq!(out.tokens, vec!["y"]);
        assert!(out.has_flag('f'));
    }

    #[test]
    fn test_whitespace_and_empty_tokens_dropped() {
        assert_eq!(toks(&["  a ", "", "   ", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_tokens_skipped_inside_phrase() {
        assert_eq!(toks(&["'a", "", "b'"]), vec!["a b"]);
    }
}
