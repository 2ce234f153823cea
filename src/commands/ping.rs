// ping.rs - Ping Command Module
// This module implements the ^ping command, which reports the bot's latency.
//
// Key Features:
// - "Api latency": the gateway heartbeat round trip reported by the shard runner
// - "Client latency": wall time between sending the reply and editing it,
//   appended to the same message so the api figure is always visible first
//
// Used by: main.rs (command registration)

// ============================================================================
// IMPORTS
// ============================================================================

use serenity::{
    builder::CreateEmbed,
    client::{bridge::gateway::ShardId, Context},
    framework::standard::{macros::command, macros::group, CommandResult},
    model::channel::Message,
};
use std::time::Instant;

use crate::ShardManagerContainer;

// ============================================================================
// EMBED CONSTRUCTION
// ============================================================================

/// Build the ping embed. The edit that adds the client figure rebuilds the
/// whole embed, so the api field keeps its first position.
pub(crate) fn ping_embed<'e>(
    embed: &'e mut CreateEmbed,
    api: &str,
    client: Option<&str>,
) -> &'e mut CreateEmbed {
    embed.title("Pong !");
    embed.field("Api latency", api, true);
    if let Some(client) = client {
        embed.field("Client latency", client, true);
    }
    embed
}

pub(crate) fn format_latency_ms(ms: f64) -> String {
    format!("> `{:.3}` ms", ms)
}

// ============================================================================
// COMMAND IMPLEMENTATION
// ============================================================================

#[command]
/// Main ^ping command handler
/// Replies with the gateway latency, then edits the reply in place to append
/// the observed client round trip.
pub async fn ping(ctx: &Context, msg: &Message) -> CommandResult {
    let api_latency = {
        let data = ctx.data.read().await;
        let shard_manager = data
            .get::<ShardManagerContainer>()
            .cloned()
            .ok_or("shard manager missing from client data")?;
        let manager = shard_manager.lock().await;
        let runners = manager.runners.lock().await;
        runners
            .get(&ShardId(ctx.shard_id))
            .and_then(|runner| runner.latency)
    };

    let api_field = match api_latency {
        Some(latency) => format_latency_ms(latency.as_secs_f64() * 1000.0),
        None => "> `n/a` (no heartbeat yet)".to_string(),
    };

    let started = Instant::now();
    let mut reply = msg
        .channel_id
        .send_message(&ctx.http, |m| m.embed(|e| ping_embed(e, &api_field, None)))
        .await?;

    let client_field = format_latency_ms(started.elapsed().as_secs_f64() * 1000.0);
    reply
        .edit(&ctx.http, |m| {
            m.embed(|e| ping_embed(e, &api_field, Some(&client_field)))
        })
        .await?;

    Ok(())
}

// ============================================================================
// COMMAND GROUP
// ============================================================================

#[group]
#[commands(ping)]
pub struct PingCog;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embed::fields_of;

    #[test]
    fn test_initial_embed_has_single_api_field() {
        let mut embed = CreateEmbed::default();
        ping_embed(&mut embed, "> `42.000` ms", None);

        let fields = fields_of(&embed);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "Api latency");
    }

    #[test]
    fn test_edited_embed_appends_client_field_in_order() {
        let mut embed = CreateEmbed::default();
        ping_embed(&mut embed, "> `42.000` ms", Some("> `7.500` ms"));

        let fields = fields_of(&embed);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].0, "Api latency");
        assert_eq!(fields[1].0, "Client latency");
        assert_eq!(fields[1].1, "> `7.500` ms");
    }

    #[test]
    fn test_latency_formatting_keeps_three_decimals() {
        assert_eq!(format_latency_ms(12.3456), "> `12.346` ms");
        assert_eq!(format_latency_ms(0.0), "> `0.000` ms");
    }
}
