use super::Roster;
use itertools::Itertools;
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

pub(crate) const TITLE: &str = "📋 Company Tracker";
pub(crate) const COLOR: u32 = 0x5865f2;
pub(crate) const PLACEHOLDER: &str = "_No companies added yet._";
/// Discord rejects embed descriptions longer than this.
pub(crate) const MAX_BODY_CHARS: usize = 4096;
/// Room kept free for the "…and N more" line while entries remain.
const OVERFLOW_RESERVE: usize = 32;

/// Rendered form of the roster embed, kept separate from serenity's builder so
/// it can be compared in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterDisplay {
    pub(crate) body: String,
    pub(crate) count: usize,
    pub(crate) timestamp: Timestamp,
}

impl RosterDisplay {
    pub(crate) fn footer(&self) -> String {
        format!("Total: {}", self.count)
    }

    pub(crate) fn to_embed(&self) -> CreateEmbed {
        CreateEmbed::new()
            .title(TITLE)
            .color(COLOR)
            .description(&self.body)
            .footer(CreateEmbedFooter::new(self.footer()))
            .timestamp(self.timestamp)
    }
}

pub(crate) fn render(roster: &Roster) -> RosterDisplay {
    render_at(roster, Timestamp::now())
}

pub(crate) fn render_at(roster: &Roster, timestamp: Timestamp) -> RosterDisplay {
    let body = if roster.is_empty() {
        String::from(PLACEHOLDER)
    } else {
        numbered_body(roster.entries())
    };

    RosterDisplay {
        body,
        count: roster.len(),
        timestamp,
    }
}

/// Numbers the entries one per line, cutting off with "…and N more" before
/// the body would outgrow an embed description.
fn numbered_body(entries: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut used = 0;

    for (i, name) in entries.iter().enumerate() {
        let line = format!("{}. {name}", i + 1);
        let cost = line.chars().count() + usize::from(!lines.is_empty());
        let budget = if i + 1 == entries.len() {
            MAX_BODY_CHARS
        } else {
            MAX_BODY_CHARS - OVERFLOW_RESERVE
        };
        if used + cost > budget {
            lines.push(format!("…and {} more", entries.len() - i));
            break;
        }
        used += cost;
        lines.push(line);
    }

    lines.iter().join("\n")
}
