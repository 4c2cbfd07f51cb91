//! Sample command tree hosted by the demo shell.
//!
//! ```text
//! help [-d] [path...]
//! economy (eco)
//!   balance [player]
//!   pay <player> <amount>          interactive only
//! tp [player]                      runs itself when no child matches
//!   here <player>                  interactive only
//! say [-l] <message...>
//! calc
//!   add <numbers...>
//!   mul <numbers...>
//! ```

use crate::command::CommandDescriptor;
use crate::error::{DispatchError, HandlerError, HandlerResult};
use crate::help::HelpListing;
use crate::parser::CommandContext;
use crate::principal::Principal;

/// Balance reported for every player; the shell keeps no state.
const STARTING_BALANCE: i64 = 100;

pub fn sample_commands(help_label: &str) -> Vec<CommandDescriptor> {
    vec![help(help_label), economy(), teleport(), say(), calc()]
}

fn help(label: &str) -> CommandDescriptor {
    CommandDescriptor::new(label)
        .usage("[-d] [path...]")
        .description("List the commands you can use")
        .handler(|ctx, who| {
            let deep = ctx.has_flag('d');
            match ctx.dispatcher().help_for(ctx.args(), who, deep) {
                Ok(listing) => {
                    send_listing(&listing, who);
                    Ok(())
                }
                Err(DispatchError::UnknownArgument { label, .. }) => {
                    Err(HandlerError::invalid_argument(label))
                }
                Err(other) => Err(HandlerError::message(other.to_string())),
            }
        })
}

fn send_listing(listing: &HelpListing, who: &dyn Principal) {
    if listing.is_empty() {
        who.send_message("No commands available.");
        return;
    }
    for (section, entries) in listing.sections() {
        if !section.is_empty() {
            who.send_message(&format!("== {section} =="));
        }
        for entry in entries {
            who.send_message(&entry.render());
        }
    }
}

fn economy() -> CommandDescriptor {
    CommandDescriptor::new("economy")
        .alias("eco")
        .section("Economy")
        .description("Money management")
        .child(
            CommandDescriptor::new("balance")
                .alias("bal")
                .args(0, Some(1))
                .usage("[player]")
                .description("Show a balance")
                .section("Economy")
                .permission("economy.balance|economy.admin")
                .handler(|ctx, who| {
                    let player = ctx.string_or(0, who.name());
                    who.send_message(&format!("{player} has {STARTING_BALANCE} coins."));
                    Ok(())
                }),
        )
        .child(
            CommandDescriptor::new("pay")
                .alias("give")
                .args(2, Some(2))
                .usage("<player> <amount>")
                .description("Send coins to another player")
                .section("Economy")
                .permission("economy.pay|economy.admin")
                .interactive_only()
                .handler(pay),
        )
}

fn pay(ctx: &CommandContext<'_>, who: &dyn Principal) -> HandlerResult {
    let player = ctx.string_at(0)?;
    let amount = ctx.int_at(1)?;
    if amount <= 0 {
        return Err(HandlerError::invalid_argument(ctx.string_at(1)?));
    }
    if amount > STARTING_BALANCE {
        return Err(HandlerError::message(format!(
            "Insufficient funds: you have {STARTING_BALANCE} coins."
        )));
    }
    if player.eq_ignore_ascii_case(who.name()) {
        return Err(HandlerError::message("You cannot pay yourself."));
    }
    who.send_message(&format!("Paid {amount} coins to {player}."));
    Ok(())
}

fn teleport() -> CommandDescriptor {
    CommandDescriptor::new("tp")
        .alias("teleport")
        .args(0, Some(1))
        .usage("[player]")
        .description("Teleport to spawn or to a player")
        .section("Travel")
        .permission("tp.use|tp.admin")
        .force_execute()
        .handler(|ctx, who| {
            match ctx.args().first() {
                Some(target) => who.send_message(&format!("Teleported to {target}.")),
                None => who.send_message("Teleported to spawn."),
            }
            Ok(())
        })
        .child(
            CommandDescriptor::new("here")
                .args(1, Some(1))
                .usage("<player>")
                .description("Bring a player to you")
                .section("Travel")
                .permission("tp.admin")
                .interactive_only()
                .handler(|ctx, who| {
                    let target = ctx.string_at(0)?;
                    who.send_message(&format!("Teleported {target} to {}.", who.name()));
                    Ok(())
                }),
        )
}

fn say() -> CommandDescriptor {
    CommandDescriptor::new("say")
        .args(1, None)
        .usage("[-l] <message...>")
        .description("Broadcast a message")
        .handler(|ctx, who| {
            let message = ctx.args().join(" ");
            let message = if ctx.has_flag('l') {
                message.to_uppercase()
            } else {
                message
            };
            who.send_message(&format!("[{}] {message}", who.name()));
            Ok(())
        })
}

fn calc() -> CommandDescriptor {
    CommandDescriptor::new("calc")
        .section("Math")
        .description("Arithmetic")
        .child(arithmetic("add", "Add numbers", 0.0, |a, b| a + b))
        .child(arithmetic("mul", "Multiply numbers", 1.0, |a, b| a * b))
}

fn arithmetic(
    label: &str,
    description: &str,
    identity: f64,
    op: fn(f64, f64) -> f64,
) -> CommandDescriptor {
    CommandDescriptor::new(label)
        .args(2, None)
        .usage("<numbers...>")
        .description(description)
        .section("Math")
        .handler(move |ctx, who| {
            let mut result = identity;
            for index in 0..ctx.len() {
                result = op(result, ctx.double_at(index)?);
            }
            who.send_message(&format_number(result));
            Ok(())
        })
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
