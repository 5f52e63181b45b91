mod companies;
mod handler;
mod roster;
mod setup;
mod storage;
mod tracker;
mod util;

use crate::setup::{Vars, create_bot_framework_options, framework_setup, load_env};
use crate::tracker::Tracker;
use clap::{Arg, ArgAction, value_parser};
use serenity::Client;
use serenity::all::GatewayIntents;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub(crate) struct AppVarsInner {
    pub(crate) env: Vars,
    pub(crate) tracker: Tracker,
}

pub(crate) type AppVars = Arc<AppVarsInner>;
pub(crate) type AppError = anyhow::Error;
pub(crate) type Context<'a> = poise::Context<'a, AppVars, AppError>;

fn cli() -> clap::Command {
    clap::Command::new("company-tracker")
        .about("Keeps a deduplicated company list mirrored into a Discord channel")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("dotenv file holding BOT_TOKEN, CLIENT_ID and friends")
                .value_parser(value_parser!(PathBuf))
                .default_value(".env"),
        )
        .arg(
            Arg::new("data-file")
                .long("data-file")
                .help("where the company list is saved (overrides TRACKER_DATA_FILE)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("ephemeral")
                .long("ephemeral")
                .help("keep the company list in memory only")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn,poise=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let args = cli().get_matches();
    load_env(&args);
    init_logging();

    let env = Vars::new(&args);
    let tracker = Tracker::load(env.storage.mode.open(&env.storage.data_file));
    let token = env.bot.token.clone();
    let application_id = env.bot.application_id;
    let data: AppVars = Arc::new(AppVarsInner { env, tracker });

    let framework = poise::Framework::builder()
        .options(create_bot_framework_options())
        .setup(move |ctx, ready, framework| Box::pin(framework_setup(ctx, ready, framework, data)))
        .build();

    let mut client = Client::builder(&token, GatewayIntents::GUILDS)
        .application_id(application_id)
        .event_handler(handler::TrackerEventHandler)
        .framework(framework)
        .await
        .expect("couldn't make client");

    if let Err(why) = client.start().await {
        tracing::error!("Client error: {why:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let args = cli().get_matches_from(["company-tracker"]);

        assert_eq!(
            args.get_one::<PathBuf>("config"),
            Some(&PathBuf::from(".env"))
        );
        assert_eq!(args.get_one::<PathBuf>("data-file"), None);
        assert!(!args.get_flag("ephemeral"));
    }

    #[test]
    fn cli_overrides() {
        let args = cli().get_matches_from([
            "company-tracker",
            "--config",
            "prod.env",
            "--data-file",
            "/var/lib/tracker/companies.json",
            "--ephemeral",
        ]);

        assert_eq!(
            args.get_one::<PathBuf>("data-file"),
            Some(&PathBuf::from("/var/lib/tracker/companies.json"))
        );
        assert!(args.get_flag("ephemeral"));
    }
}
