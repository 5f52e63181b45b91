use crate::companies;
use crate::roster::discord::SerenityDisplay;
use crate::storage::StorageMode;
use crate::{AppError, AppVars};
use clap::ArgMatches;
use pluralizer::pluralize;
use poise::{BoxFuture, Command, CreateReply, Framework, FrameworkError, FrameworkOptions};
use serenity::FutureExt;
use serenity::all::{ApplicationId, Context, GuildId, Ready};
use std::env;
use std::num::NonZeroU64;
use std::path::PathBuf;

pub(crate) const DEFAULT_DATA_FILE: &str = "companies.json";

pub(crate) fn load_env(args: &ArgMatches) {
    dotenv::from_filename(
        args.get_one::<PathBuf>("config")
            .expect("config file is bad path?"),
    )
    .ok();
}

// Env Setup
pub(crate) struct Vars {
    pub(crate) bot: BotVars,
    pub(crate) storage: StorageVars,
}

pub(crate) struct BotVars {
    pub(crate) token: String,
    pub(crate) application_id: ApplicationId,
    /// Register commands only in these guilds; empty means globally.
    pub(crate) guilds: Vec<GuildId>,
}

pub(crate) struct StorageVars {
    pub(crate) mode: StorageMode,
    pub(crate) data_file: PathBuf,
}

impl Vars {
    /// Reads the environment, letting command line flags win. Panics on
    /// missing or malformed values since the bot can't start without them.
    pub(crate) fn new(args: &ArgMatches) -> Self {
        let token = env::var("BOT_TOKEN").expect("no discord token set in BOT_TOKEN");
        let application_id = env::var("CLIENT_ID")
            .expect("no application id set in CLIENT_ID")
            .trim()
            .parse::<NonZeroU64>()
            .expect("CLIENT_ID must be valid u64");
        let guilds = parse_guilds(&env::var("TRACKER_GUILDS").unwrap_or_default())
            .expect("TRACKER_GUILDS must be comma separated u64s");

        let mode = if args.get_flag("ephemeral") {
            StorageMode::Ephemeral
        } else {
            env::var("TRACKER_STORAGE")
                .map(|raw| raw.parse::<StorageMode>().expect("TRACKER_STORAGE is invalid"))
                .unwrap_or_default()
        };
        let data_file = args
            .get_one::<PathBuf>("data-file")
            .cloned()
            .or_else(|| env::var_os("TRACKER_DATA_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        Self {
            bot: BotVars {
                token,
                application_id: ApplicationId::new(application_id.get()),
                guilds,
            },
            storage: StorageVars { mode, data_file },
        }
    }
}

pub(crate) fn parse_guilds(raw: &str) -> Result<Vec<GuildId>, String> {
    raw.split(",")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|id| {
            id.parse::<NonZeroU64>()
                .map(|id| GuildId::new(id.get()))
                .map_err(|_| format!("guild id {id:?} not valid snowflake"))
        })
        .collect()
}

// Bot setup

pub(crate) async fn register_commands(
    data: &AppVars,
    ctx: &Context,
    framework: &Framework<AppVars, AppError>,
) -> Result<(), AppError> {
    let commands = &framework.options().commands;
    let guilds = &data.env.bot.guilds;

    if guilds.is_empty() {
        poise::builtins::register_globally(ctx, commands).await?;
    } else {
        for id in guilds.iter() {
            poise::builtins::register_in_guild(ctx, commands, *id).await?;
        }
    }

    let commands_text = pluralize("command", commands.len() as isize, true);
    if guilds.is_empty() {
        tracing::info!("[setup] Registered {commands_text} globally");
    } else {
        let guilds_text = pluralize("guild", guilds.len() as isize, true);
        tracing::info!("[setup] Registered {commands_text} locally in {guilds_text}");
    }

    Ok(())
}

/// Runs once the gateway is ready: registers commands, then makes one attempt
/// at bringing the restored display channel up to date.
pub(crate) async fn framework_setup(
    ctx: &Context,
    _ready: &Ready,
    framework: &Framework<AppVars, AppError>,
    data: AppVars,
) -> Result<AppVars, AppError> {
    if let Err(err) = register_commands(&data, ctx, framework).await {
        tracing::error!("[setup] Failed to register commands: {err:#}");
    }

    tracing::info!(
        storage = %data.tracker.storage_mode(),
        file = %data.env.storage.data_file.display(),
        "[setup] Restoring company list"
    );
    data.tracker
        .restore_display(&SerenityDisplay::new(ctx.http.clone()))
        .await;

    Ok(data)
}

/// Reply text for a failed invocation; only command errors say what went wrong.
fn error_reply(error: &FrameworkError<'_, AppVars, AppError>) -> String {
    match error {
        FrameworkError::Command { error, .. } => {
            format!("An unexpected error occurred: {error:#}")
        }
        _ => String::from("An unknown error occurred"),
    }
}

fn handle_framework_error(error: FrameworkError<AppVars, AppError>) -> BoxFuture<()> {
    async move {
        tracing::error!("command failed: {error}");

        let Some(ctx) = error.ctx() else { return };
        let reply = CreateReply::default()
            .content(error_reply(&error))
            .reply(true)
            .ephemeral(true);
        if let Err(err) = ctx.send(reply).await {
            tracing::error!("couldn't tell the user about the failure: {err:?}")
        }
    }
    .boxed()
}

fn get_bot_commands() -> Vec<Command<AppVars, AppError>> {
    vec![
        companies::add::company_add(),
        companies::check::check_company(),
        companies::set_channel::company_set_channel(),
    ]
}

pub(crate) fn create_bot_framework_options() -> FrameworkOptions<AppVars, AppError> {
    FrameworkOptions {
        on_error: handle_framework_error,
        commands: get_bot_commands(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn guild_list_tolerates_spacing_and_empties() {
        assert_eq!(
            parse_guilds(" 1, 2 ,,3 "),
            Ok(vec![GuildId::new(1), GuildId::new(2), GuildId::new(3)])
        );
        assert_eq!(parse_guilds(""), Ok(vec![]));
    }

    #[test]
    fn guild_list_rejects_garbage() {
        assert!(parse_guilds("1,abc").is_err());
        assert!(parse_guilds("0").is_err());
    }

    #[test]
    fn command_names_match_slash_commands() {
        let names = get_bot_commands()
            .into_iter()
            .map(|c| c.name)
            .collect_vec();

        assert_eq!(names, vec!["companyadd", "checkcompany", "companysetchannel"]);
    }
}
