use serenity::all::{Permissions, UserId};
use serenity::utils::MessageBuilder;

/// What the bot needs in the display channel: see it, post the embed, and
/// find its old message again.
pub(crate) fn invite_permissions() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::EMBED_LINKS
        | Permissions::READ_MESSAGE_HISTORY
}

pub(crate) fn bot_invite_url(
    id: UserId,
    permissions: Permissions,
    with_slash_commands: bool,
) -> String {
    let perms_section = permissions.bits().to_string();
    format!(
        "https://discord.com/oauth2/authorize?client_id={id}&permissions={perms_section}&integration_type=0&scope=bot{}",
        if with_slash_commands {
            "+applications.commands"
        } else {
            ""
        }
    )
}

/// Bolds user input for a reply without letting it break out of the markdown
/// or ping anyone.
pub(crate) fn bold_safe(input: &str) -> String {
    MessageBuilder::new().push_bold_safe(input).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_url_includes_commands_scope() {
        let url = bot_invite_url(UserId::new(123), Permissions::SEND_MESSAGES, true);

        assert_eq!(
            url,
            "https://discord.com/oauth2/authorize?client_id=123&permissions=2048&integration_type=0&scope=bot+applications.commands"
        );
    }

    #[test]
    fn invite_url_without_commands_scope() {
        let url = bot_invite_url(UserId::new(123), Permissions::empty(), false);

        assert!(url.ends_with("&permissions=0&integration_type=0&scope=bot"));
    }

    #[test]
    fn bold_safe_wraps_plain_names() {
        assert_eq!(bold_safe("Acme"), "**Acme**");
    }
}
