// main.rs - Ember Bot entry point
// Loads configuration from botconfig.txt, builds the one-time source
// snapshot, wires the command framework and runs the client until shutdown.

mod commands;
mod embed;

use serenity::{
    async_trait,
    client::{bridge::gateway::ShardManager, Client, Context, EventHandler},
    framework::standard::StandardFramework,
    model::gateway::Ready,
    prelude::{GatewayIntents, Mutex, TypeMapKey},
};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::Arc;
use thiserror::Error;
use tokio::signal;

use commands::code::{SourceSnapshot, SourceSnapshotContainer, SOURCE_DIRS};

/// Shared handle to the shard manager so commands can read gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<Mutex<ShardManager>>;
}

#[derive(Debug, Error)]
enum ConfigError {
    #[error("no botconfig.txt found in any expected location (., .., ../.., src/)")]
    NotFound,
    #[error("DISCORD_TOKEN not found in botconfig.txt")]
    MissingToken,
    #[error("DISCORD_TOKEN in botconfig.txt is still the placeholder value")]
    PlaceholderToken,
}

const CONFIG_PATHS: &[&str] = &[
    "botconfig.txt",
    "../botconfig.txt",
    "../../botconfig.txt",
    "src/botconfig.txt",
];

/// Load KEY=VALUE pairs from botconfig.txt, exporting each as an env var.
/// The file is searched across the usual run locations, first hit wins.
fn load_bot_config() -> Result<HashMap<String, String>, ConfigError> {
    env::remove_var("DISCORD_TOKEN");
    env::remove_var("PREFIX");
    env::remove_var("BOT_OWNER_ID");

    for config_path in CONFIG_PATHS {
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(_) => continue,
        };
        // Remove BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let mut config = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(equals_pos) = line.find('=') {
                let key = line[..equals_pos].trim().to_string();
                let value = line[equals_pos + 1..].trim().to_string();
                env::set_var(&key, &value);
                config.insert(key, value);
            }
        }

        println!("✅ Configuration loaded from {}", config_path);
        return Ok(config);
    }

    Err(ConfigError::NotFound)
}

fn discord_token() -> Result<String, ConfigError> {
    match env::var("DISCORD_TOKEN") {
        Ok(token) if token.is_empty() || token == "YOUR_BOT_TOKEN_HERE" => {
            Err(ConfigError::PlaceholderToken)
        }
        Ok(token) => Ok(token),
        Err(_) => Err(ConfigError::MissingToken),
    }
}

struct Handler;

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _: Context, ready: Ready) {
        println!("✅ Bot connected as {}!", ready.user.name);
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger - must be done before any logging calls
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
        .format_timestamp_secs()
        .init();

    if let Err(error) = load_bot_config() {
        log::error!("❌ Failed to load configuration: {}", error);
        eprintln!("❌ {}", error);
        eprintln!("Create a botconfig.txt with DISCORD_TOKEN=your_token_here, PREFIX=^ and BOT_OWNER_ID=your_user_id");
        return;
    }

    let token = match discord_token() {
        Ok(token) => token,
        Err(error) => {
            log::error!("❌ {}", error);
            eprintln!("❌ {}", error);
            return;
        }
    };

    let prefix = env::var("PREFIX").unwrap_or_else(|_| "^".to_string());
    println!("🤖 Starting bot with prefix: '{}'", prefix);

    if env::var("BOT_OWNER_ID").is_err() {
        println!("⚠️  BOT_OWNER_ID not set - owner-only commands will refuse everyone");
    }

    // Cache the bot's own sources for the ^code report. Unreadable sources
    // are fatal: the bot refuses to start half-initialized.
    let snapshot = match SourceSnapshot::build(SOURCE_DIRS) {
        Ok(snapshot) => Arc::new(snapshot),
        Err(error) => {
            log::error!("❌ Failed to build source snapshot: {}", error);
            eprintln!("❌ Failed to build source snapshot: {}", error);
            std::process::exit(1);
        }
    };
    println!(
        "📝 Cached {} source entries for the ^code report",
        snapshot.len()
    );

    let framework = StandardFramework::new()
        .configure(|c| {
            c.prefix(&prefix)
                .case_insensitivity(true)
                .no_dm_prefix(true)
                .with_whitespace(true)
        })
        .after(|_ctx, msg, command_name, result| {
            Box::pin(async move {
                if let Err(e) = result {
                    log::error!(
                        "❌ Command '{}' failed for user {} ({}): {:?}",
                        command_name,
                        msg.author.name,
                        msg.author.id,
                        e
                    );
                }
            })
        })
        .group(&commands::ping::PINGCOG_GROUP)
        .group(&commands::code::CODECOG_GROUP)
        .group(&commands::help::HELPCOG_GROUP)
        .group(&commands::panel::PANELCOG_GROUP)
        .group(&commands::invite::INVITECOG_GROUP);

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(token, intents)
        .event_handler(Handler)
        .framework(framework)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Error creating Discord client: {:?}", e);
            eprintln!("❌ Error creating Discord client: {:?}", e);
            eprintln!("Check your token in botconfig.txt");
            return;
        }
    };

    {
        let mut data = client.data.write().await;
        data.insert::<SourceSnapshotContainer>(snapshot);
        data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
    }

    let shard_manager = Arc::clone(&client.shard_manager);
    println!("🚀 Bot is running... press Ctrl+C to stop");
    tokio::select! {
        _ = signal::ctrl_c() => {
            println!("\n⏹️  Stopping bot gracefully...");
            shard_manager.lock().await.shutdown_all().await;
        }
        result = client.start() => {
            if let Err(why) = result {
                log::error!("❌ Client error: {:?}", why);
                eprintln!("❌ Client error: {:?}", why);
            }
        }
    }

    println!("✅ Bot stopped");
}
