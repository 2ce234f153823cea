// help.rs - Help and Command Listing Module
// Builds the per-cog command listings from the framework's static registry.
// The default ^help listing filters each command through its attached checks;
// ^cmds lists everything unconditionally in alphabetical order.

use serenity::{
    client::Context,
    framework::standard::{
        macros::command, macros::group, Args, Command as RegisteredCommand, CommandGroup,
        CommandResult, Delimiter, Reason,
    },
    model::channel::Message,
};
use std::future::Future;

use crate::commands::COGS;
use crate::embed::add_mapped_fields;

/// Fallback display title for a cog whose name is empty after trimming.
const UNTITLED_COG: &str = "Misc";

/// Evaluate visibility predicates in order, stopping at the first failure.
/// Predicates after the failing one are never awaited.
pub(crate) async fn evaluate_checks<I>(checks: I) -> bool
where
    I: IntoIterator,
    I::Item: Future<Output = Result<(), Reason>>,
{
    for check in checks {
        if check.await.is_err() {
            return false;
        }
    }
    true
}

/// Whether a command should be listed for the invoking user.
///
/// A command with no attached checks is always visible. Otherwise every
/// check must pass; a failing check means "hidden", never an error.
pub async fn is_visible(ctx: &Context, msg: &Message, command: &'static RegisteredCommand) -> bool {
    if command.options.checks.is_empty() {
        return true;
    }
    let checks: Vec<_> = command
        .options
        .checks
        .iter()
        .map(|check| async move {
            let mut args = Args::new("", &[Delimiter::Single(' ')]);
            (check.function)(ctx, msg, &mut args, command.options).await
        })
        .collect();
    evaluate_checks(checks).await
}

/// Canonical (non-alias) command count across the given cogs.
pub fn canonical_count(cogs: &[&CommandGroup]) -> usize {
    cogs.iter().map(|cog| cog.options.commands.len()).sum()
}

/// Registered names that are aliases rather than canonical names.
pub fn alias_count(cogs: &[&CommandGroup]) -> usize {
    let names: usize = cogs
        .iter()
        .flat_map(|cog| cog.options.commands.iter())
        .map(|command| command.options.names.len())
        .sum();
    names - canonical_count(cogs)
}

/// Comma-joined backticked names, registry order preserved.
pub(crate) fn joined_names(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("`{}`", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Alphabetical bullet-joined names for the comprehensive listing.
pub(crate) fn sorted_bullet_names(names: &[&str]) -> String {
    let mut names: Vec<String> = names.iter().map(|name| format!("`{}`", name)).collect();
    names.sort();
    names.join("  •  ")
}

/// Display title for a cog: leading capital, trailing "Cog" stripped.
/// Cogs not following the *Cog naming convention keep their full name,
/// which can mis-render for unusual names; an empty result falls back to
/// the one shared placeholder.
pub(crate) fn display_title(name: &str) -> String {
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };
    let trimmed = match capitalized.len().checked_sub(3) {
        Some(cut)
            if capitalized.is_char_boundary(cut)
                && capitalized[cut..].eq_ignore_ascii_case("cog") =>
        {
            &capitalized[..cut]
        }
        _ => capitalized.as_str(),
    };
    if trimmed.is_empty() {
        UNTITLED_COG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn canonical_names(cog: &CommandGroup) -> Vec<&'static str> {
    cog.options
        .commands
        .iter()
        .map(|command| command.options.names[0])
        .collect()
}

#[command]
#[aliases("h")]
/// List every command visible to the invoking user, grouped by cog.
pub async fn help(ctx: &Context, msg: &Message) -> CommandResult {
    let mut listed: Vec<(String, String)> = Vec::new();
    let mut total = 0usize;

    for cog in COGS {
        let mut visible: Vec<&str> = Vec::new();
        for &command in cog.options.commands {
            if is_visible(ctx, msg, command).await {
                visible.push(command.options.names[0]);
            }
        }
        if !visible.is_empty() {
            total += visible.len();
            listed.push((display_title(cog.name), joined_names(&visible)));
        }
    }

    let bot_name = ctx.cache.current_user().name;
    let description = format!(
        "- `{}`/`{}` available commands\n`{}` aliases",
        total,
        canonical_count(COGS),
        alias_count(COGS)
    );

    msg.channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title(format!("General Help {}", bot_name));
                e.description(description);
                add_mapped_fields(
                    e,
                    listed,
                    |title: &String| title.clone(),
                    |body: &String| body.clone(),
                    false,
                )
            })
        })
        .await?;

    Ok(())
}

#[command]
#[aliases("all", "all_cmds")]
/// List every command of every cog, unfiltered, in alphabetical order.
pub async fn cmds(ctx: &Context, msg: &Message) -> CommandResult {
    let listed: Vec<(String, String)> = COGS
        .iter()
        .filter(|cog| !cog.options.commands.is_empty())
        .map(|cog| {
            (
                display_title(cog.name),
                sorted_bullet_names(&canonical_names(cog)),
            )
        })
        .collect();

    msg.channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title("All commands");
                e.description(format!("> `{}` commands available", canonical_count(COGS)));
                add_mapped_fields(
                    e,
                    listed,
                    |title: &String| title.clone(),
                    |body: &String| body.clone(),
                    false,
                )
            })
        })
        .await?;

    Ok(())
}

#[group]
#[commands(help, cmds)]
pub struct HelpCog;
