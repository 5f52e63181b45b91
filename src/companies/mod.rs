// commands: companyadd, checkcompany, companysetchannel

pub(crate) mod add;
pub(crate) mod check;
pub(crate) mod set_channel;

use crate::Context;
use crate::roster::{AddOutcome, MAX_NAME_CHARS};
use crate::roster::discord::SerenityDisplay;
use crate::util::text::bold_safe;
use serenity::all::{ChannelId, Mentionable};

fn display_surface(ctx: Context<'_>) -> SerenityDisplay {
    SerenityDisplay::new(ctx.serenity_context().http.clone())
}

pub(crate) fn add_reply(input: &str, outcome: &AddOutcome) -> String {
    let name = bold_safe(input.trim());
    match outcome {
        AddOutcome::Added(_) => format!("✅ Added {name} to the list."),
        AddOutcome::Duplicate(_) => format!("⚠️ {name} is already in the list."),
        AddOutcome::Blank => String::from("⚠️ Company name can't be blank."),
        AddOutcome::TooLong => {
            format!("⚠️ Company names can be at most {MAX_NAME_CHARS} characters.")
        }
    }
}

pub(crate) fn check_reply(input: &str, present: bool) -> String {
    let name = bold_safe(input.trim());
    if present {
        format!("✅ {name} is already in the list.")
    } else {
        format!("❌ {name} is not in the list.")
    }
}

pub(crate) fn channel_set_reply(channel: ChannelId) -> String {
    format!("✅ Company list channel set to {}.", channel.mention())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_replies_echo_the_trimmed_input() {
        assert_eq!(
            add_reply("  Acme ", &AddOutcome::Added(String::from("acme"))),
            "✅ Added **Acme** to the list."
        );
        assert_eq!(
            add_reply("ACME", &AddOutcome::Duplicate(String::from("acme"))),
            "⚠️ **ACME** is already in the list."
        );
        assert_eq!(
            add_reply("   ", &AddOutcome::Blank),
            "⚠️ Company name can't be blank."
        );
        assert_eq!(
            add_reply("x", &AddOutcome::TooLong),
            "⚠️ Company names can be at most 100 characters."
        );
    }

    #[test]
    fn check_replies() {
        assert_eq!(check_reply("Foo", true), "✅ **Foo** is already in the list.");
        assert_eq!(check_reply("Bar", false), "❌ **Bar** is not in the list.");
    }

    #[test]
    fn channel_reply_mentions_channel() {
        assert_eq!(
            channel_set_reply(ChannelId::new(42)),
            "✅ Company list channel set to <#42>."
        );
    }
}
