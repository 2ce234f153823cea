// commands/mod.rs - Command Module Registry
// This file declares all command modules and the static group list that the
// help commands walk at invocation time.

pub mod checks;         // Shared authorization predicates
pub mod ping;           // Latency report
pub mod code;           // Source structure report
pub mod help;           // Help and command listings
pub mod panel;          // Host resource report (owner only)
pub mod invite;         // Invite link

use serenity::framework::standard::CommandGroup;

use self::code::CODECOG_GROUP;
use self::help::HELPCOG_GROUP;
use self::invite::INVITECOG_GROUP;
use self::panel::PANELCOG_GROUP;
use self::ping::PINGCOG_GROUP;

/// Every cog registered with the framework, in registration order.
/// The help commands read this as a live view of the command registry.
pub static COGS: &[&CommandGroup] = &[
    &PINGCOG_GROUP,
    &CODECOG_GROUP,
    &HELPCOG_GROUP,
    &PANELCOG_GROUP,
    &INVITECOG_GROUP,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_no_duplicate_group_names() {
        let mut names: Vec<&str> = COGS.iter().map(|cog| cog.name).collect();
        let before = names.len();
        names.sort();
        names.dedup();
        assert_eq!(before, names.len());
        assert!(before > 0);
    }

    #[test]
    fn test_every_group_has_commands() {
        for cog in COGS {
            assert!(
                !cog.options.commands.is_empty(),
                "group '{}' registers no commands",
                cog.name
            );
        }
    }
}
