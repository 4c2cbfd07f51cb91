//! Shell loop shared by the one-shot and interactive modes.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::{debug, warn};

use super::builtins::sample_commands;
use super::principal::ShellPrincipal;
use crate::config::DispatcherConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher};

/// Dispatcher configured from `config` with the sample commands registered.
pub fn build_dispatcher(config: &DispatcherConfig) -> Dispatcher {
    let mut dispatcher = Dispatcher::from_config(config);
    let help_label = dispatcher.help_command().to_string();
    let report = dispatcher.register_all(None, sample_commands(&help_label));
    for (command, err) in &report.skipped {
        warn!(command = %command, error = %err, "sample command not registered");
    }
    debug!(commands = dispatcher.tree().len(), "command tree ready");
    dispatcher
}

/// Run one command and print what the principal received.
///
/// Handler output goes to `out`; rejection lines go to `err` in red.
/// Returns whether a handler ran successfully.
pub fn run_command<W: Write, E: Write>(
    dispatcher: &Dispatcher,
    principal: &ShellPrincipal,
    args: &[String],
    out: &mut W,
    err: &mut E,
) -> io::Result<bool> {
    let outcome = dispatcher.dispatch_safe(args, principal);
    let mut messages = principal.take_messages();
    let rejected = messages.split_off(messages.len().saturating_sub(outcome.lines().len()));

    for line in &messages {
        writeln!(out, "{line}")?;
    }
    for line in &rejected {
        writeln!(err, "{}", line.red())?;
    }
    Ok(matches!(outcome, DispatchOutcome::Executed))
}

/// Read commands line by line until EOF or `exit`/`quit`.
///
/// Lines are split on whitespace; quoting is left to the tokenizer.
pub fn run_repl<R: BufRead, W: Write, E: Write>(
    dispatcher: &Dispatcher,
    principal: &ShellPrincipal,
    input: R,
    prompt: bool,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    if prompt {
        write!(out, "> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if matches!(line, "exit" | "quit") {
            break;
        }
        if !line.is_empty() {
            let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            run_command(dispatcher, principal, &args, out, err)?;
        }
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> (Dispatcher, ShellPrincipal) {
        let dispatcher = build_dispatcher(&DispatcherConfig::default());
        let mut principal = ShellPrincipal::new("steve");
        principal.grant_all(["economy.pay".to_string(), "economy.balance".to_string()]);
        principal.set_interactive(true);
        (dispatcher, principal)
    }

    fn run(line: &str) -> (bool, String, String) {
        colored::control::set_override(false);
        let (dispatcher, principal) = shell();
        let args: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = run_command(&dispatcher, &principal, &args, &mut out, &mut err).expect("io");
        (
            ok,
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[test]
    fn test_executed_output_goes_to_out() {
        let (ok, out, err) = run("eco pay alex 10");
        assert!(ok);
        assert_eq!(out, "Paid 10 coins to alex.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_rejection_goes_to_err() {
        let (ok, out, err) = run("economy");
        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "Not enough arguments.\nUsage: /cmd economy <balance|pay>\n"
        );
    }

    #[test]
    fn test_repl_stops_at_exit() {
        colored::control::set_override(false);
        let (dispatcher, principal) = shell();
        let input = "calc add 1 2\n\nexit\ncalc add 3 4\n".as_bytes();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        run_repl(&dispatcher, &principal, input, false, &mut out, &mut err).expect("io");
        assert_eq!(String::from_utf8(out).expect("utf8"), "3\n");
        assert!(err.is_empty());
    }
}
