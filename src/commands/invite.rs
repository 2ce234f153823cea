// invite.rs - Invite Link Module
// Replies with the OAuth2 authorization link for adding the bot to a server.
// The only dynamic piece is the bot's own client id, read from the cache.

use serenity::{
    client::Context,
    framework::standard::{macros::command, macros::group, CommandResult},
    model::channel::Message,
};

/// OAuth2 authorization URL for the given application id.
pub(crate) fn invite_url(client_id: u64) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&permissions=8&scope=bot",
        client_id
    )
}

#[command]
#[aliases("inv", "i")]
/// Post the link used to add the bot to another server.
pub async fn invite(ctx: &Context, msg: &Message) -> CommandResult {
    let client_id = ctx.cache.current_user_id().0;

    msg.channel_id
        .send_message(&ctx.http, |m| {
            m.embed(|e| {
                e.title("Invite the Bot !");
                e.description(format!(
                    "> Click this link to invite this bot on your servers!\n\
                     You need the required permissions on the target server.\n\
                     [invite me now]({})",
                    invite_url(client_id)
                ))
            })
        })
        .await?;

    Ok(())
}

#[group]
#[commands(invite)]
pub struct InviteCog;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_url_carries_client_id() {
        let url = invite_url(1385309017881968761);
        assert_eq!(
            url,
            "https://discord.com/api/oauth2/authorize?client_id=1385309017881968761&permissions=8&scope=bot"
        );
    }
}
