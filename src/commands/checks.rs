// checks.rs - Authorization checks for restricted commands
// The Owner check gates commands on BOT_OWNER_ID from botconfig.txt.
// A failed check is a normal "not permitted" outcome, never a handler error.

use serenity::{
    client::Context,
    framework::standard::{macros::check, Args, CommandOptions, Reason},
    model::channel::Message,
};
use std::env;

/// Compare the invoking user against the configured owner id.
/// Missing configuration refuses everyone and leaves a log-side reason.
pub(crate) fn authorize_owner(author_id: &str, configured: Option<&str>) -> Result<(), Reason> {
    match configured {
        None => Err(Reason::Log(
            "BOT_OWNER_ID not set in botconfig.txt".to_string(),
        )),
        Some(owner) if author_id == owner.trim() => Ok(()),
        Some(_) => Err(Reason::User(
            "This command can only be used by the bot owner.".to_string(),
        )),
    }
}

// Restrict a command to the configured bot owner.
#[check]
#[name = "Owner"]
pub async fn owner_check(
    _ctx: &Context,
    msg: &Message,
    _args: &mut Args,
    _opts: &CommandOptions,
) -> Result<(), Reason> {
    let configured = env::var("BOT_OWNER_ID").ok();
    authorize_owner(&msg.author.id.to_string(), configured.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_id_match_passes() {
        assert!(authorize_owner("424242", Some("424242")).is_ok());
    }

    #[test]
    fn test_configured_id_is_trimmed() {
        assert!(authorize_owner("424242", Some(" 424242 ")).is_ok());
    }

    #[test]
    fn test_other_user_is_refused() {
        match authorize_owner("1", Some("424242")) {
            Err(Reason::User(_)) => {}
            other => panic!("expected user-facing refusal, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_configuration_refuses_everyone() {
        match authorize_owner("424242", None) {
            Err(Reason::Log(_)) => {}
            other => panic!("expected log-side refusal, got {:?}", other),
        }
    }
}
