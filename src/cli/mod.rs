#![allow(clippy::module_inception)]
use crate::api::client::HttpActivationApi;
use crate::cli::cli::{Cli, Commands, ProfileCommand};
use crate::cli::console::{ConsoleNavigator, ConsoleNotifier};
use crate::config::config::{
    load_file_config_with_path, log_file_path, parse_api_url, save_file_config, Config,
    FileProfileConfig,
};
use crate::core::confirmation::{ConfirmationState, ConfirmationView};
use crate::core::outcome::OutcomeReport;
use crate::core::route::Route;
use crate::core::token::ActivationToken;
use crate::logging::{self, LogTarget};
use crate::tui;
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;

pub mod cli;
pub mod console;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Confirm {
            token,
            route,
            api_url,
            json,
        } => {
            let config = Config::create(api_url, cli.profile.clone())?;
            logging::init(&config.log_level, LogTarget::Stderr)?;
            let token = confirmation_token(resolve_route(token, route, true)?)?;
            handle_confirm(&config, token, json).await?;
        }
        Commands::Tui {
            token,
            route,
            api_url,
        } => {
            let config = Config::create(api_url, cli.profile.clone())?;
            logging::init(&config.log_level, LogTarget::File(log_file_path()))?;
            let route = resolve_route(token, route, false)?;
            tui::launch(&config, route).await?;
        }
        Commands::Profile(cmd) => {
            handle_profile_commands(cmd)?;
        }
    }

    Ok(())
}

/// Turn the CLI inputs into the route the view would be opened on.
fn resolve_route(
    token: Option<String>,
    route: Option<String>,
    prompt: bool,
) -> anyhow::Result<Route> {
    if let Some(path) = route {
        return Ok(Route::parse(&path));
    }
    let token = match token {
        Some(t) => Some(t),
        None if prompt && std::io::stdin().is_terminal() => Some(
            inquire::Password::new("Activation token")
                .without_confirmation()
                .with_help_message("leave empty to send no token")
                .prompt()?,
        ),
        None => None,
    };
    Ok(Route::confirmation(token.map(ActivationToken::new)))
}

fn confirmation_token(route: Route) -> anyhow::Result<Option<ActivationToken>> {
    match route {
        Route::Confirmation { token } => Ok(token),
        _ => anyhow::bail!("route is not a confirmation page; expected /confirm/<token>"),
    }
}

async fn handle_confirm(
    config: &Config,
    token: Option<ActivationToken>,
    json: bool,
) -> anyhow::Result<()> {
    let api = Arc::new(HttpActivationApi::new(config.api_url.clone(), config.timeout)?);
    let view = ConfirmationView::new(
        api,
        Arc::new(ConsoleNavigator { quiet: json }),
        Arc::new(ConsoleNotifier),
        config.confirm_options(),
    );

    let attempt = view.confirm(token.as_ref()).await;

    if json {
        let report = attempt
            .outcome
            .as_ref()
            .map(|o| o.report())
            .unwrap_or_else(OutcomeReport::missing_token);
        println!("{}", serde_json::to_string(&report)?);
    }

    match attempt.state {
        ConfirmationState::Navigated => Ok(()),
        _ => anyhow::bail!("activation did not complete"),
    }
}

fn handle_profile_commands(cmd: ProfileCommand) -> anyhow::Result<()> {
    let (path, mut cfg) = load_file_config_with_path()?;
    let profiles = cfg.profiles.get_or_insert_with(Default::default);

    match cmd {
        ProfileCommand::List => {
            let default = cfg.default_profile.as_deref();
            if profiles.is_empty() {
                println!("No profiles defined.");
            } else {
                println!("Profiles:");
                for (name, p) in profiles.iter() {
                    if Some(name.as_str()) == default {
                        println!("  {name} -> {} (default)", p.api_url);
                    } else {
                        println!("  {name} -> {}", p.api_url);
                    }
                }
            }
            // Read-only
            return Ok(());
        }
        ProfileCommand::Show { name } => {
            match profiles.get(&name) {
                Some(p) => println!("profile: {name}\n  api_url: {}", p.api_url),
                None => anyhow::bail!(
                    "profile \"{name}\" is not defined; run `activator profile list` to see available profiles"
                ),
            }
            return Ok(());
        }
        ProfileCommand::Add {
            name,
            url,
            on_duplicate_override,
        } => {
            if profiles.contains_key(&name) && !on_duplicate_override {
                anyhow::bail!(
                    "profile \"{name}\" already exists; use --on-duplicate-override to update it"
                );
            }
            let url = parse_api_url(&url)?;
            profiles.insert(
                name.clone(),
                FileProfileConfig {
                    api_url: url.to_string(),
                },
            );
            println!("Profile \"{name}\" set to api_url: {url}");
        }
        ProfileCommand::Rm { name } => {
            if cfg.default_profile.as_deref() == Some(name.as_str()) {
                anyhow::bail!(
                    "cannot remove default profile \"{name}\"; run `activator profile default --clear` or change default first"
                );
            }
            if profiles.remove(&name).is_some() {
                println!("Removed profile \"{name}\".");
            } else {
                anyhow::bail!("profile \"{name}\" is not defined; run `activator profile list`.");
            }
        }
        ProfileCommand::Default { name, clear } => {
            if clear {
                cfg.default_profile = None;
                println!("Default profile cleared.");
            } else if let Some(name) = name {
                if profiles.contains_key(&name) {
                    cfg.default_profile = Some(name.clone());
                    println!("Default profile set to \"{name}\".");
                } else {
                    anyhow::bail!("profile \"{name}\" is not defined; run `activator profile list`.");
                }
            } else {
                match cfg.default_profile.as_deref() {
                    Some(name) => println!("Default profile: {name}"),
                    None => println!("No default profile set."),
                }
                return Ok(());
            }
        }
    }

    save_file_config(&path, &cfg)?;
    Ok(())
}
