pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod display;
pub mod domain;
pub mod http;
pub mod outbox;
pub mod services;
pub mod stats;
pub mod store;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::{info, warn};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::{GameType, QuickAdd};
use crate::http::TrackerClient;
use crate::outbox::{Method, Outbox};
use crate::services::server::ServerService;
use crate::services::TrackerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_tracker(config: &AppConfig) -> Result<TrackerService> {
    let store = store::open_store(&config.storage)?;
    Ok(TrackerService::new(store))
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let port = port.unwrap_or(config.server.port);
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_stats(game_type: Option<&str>) -> Result<()> {
    let game_type = game_type.map(str::parse::<GameType>).transpose()?;
    let tracker = open_tracker(&AppConfig::from_env())?;

    let report = tracker.stats(game_type)?;
    println!("{}", display::render_report(&report));
    Ok(())
}

pub fn handle_decks() -> Result<()> {
    let tracker = open_tracker(&AppConfig::from_env())?;
    for name in tracker.deck_names()? {
        println!("{}", name);
    }
    Ok(())
}

pub struct QuickAddArgs {
    pub my_deck: String,
    pub opponent_deck: String,
    pub result: String,
    pub on_draw: bool,
    pub notes: Option<String>,
    pub server: Option<String>,
}

pub fn handle_quick_add(args: QuickAddArgs) -> Result<()> {
    let entry = QuickAdd {
        my_deck: args.my_deck,
        opponent_deck: args.opponent_deck,
        on_play: !args.on_draw,
        result: args.result,
        notes: args.notes,
    };
    domain::quick_add::parse_result(&entry.result)?;

    let config = AppConfig::from_env();
    match args.server {
        Some(server) => quick_add_remote(&config, &server, &entry),
        None => {
            let id = open_tracker(&config)?.quick_add(entry)?;
            println!("Added match {} to inbox", id);
            Ok(())
        }
    }
}

/// Posts to the server, falling back to the outbox when it is unreachable
fn quick_add_remote(config: &AppConfig, server: &str, entry: &QuickAdd) -> Result<()> {
    let body = serde_json::to_value(entry).context("Failed to serialize quick add")?;
    let client = TrackerClient::new(server, config.outbox.user_agent, config.outbox.timeout_secs)?;
    let runtime = tokio::runtime::Runtime::new()?;

    match runtime.block_on(client.send(Method::Post, "/api/quick-add", &body)) {
        Ok(response) => {
            info!("Server accepted quick add: {}", response);
            println!("Added match to inbox on {}", server);
            Ok(())
        }
        Err(e) => {
            warn!("Server unreachable, queueing quick add: {:?}", e);
            let mut outbox = Outbox::open(&config.outbox.path)?;
            outbox.enqueue(Method::Post, "/api/quick-add", body)?;
            println!(
                "Server unavailable; queued for sync ({} pending)",
                outbox.pending().len()
            );
            Ok(())
        }
    }
}

pub fn handle_organize(match_id: &str, tournament_id: &str) -> Result<()> {
    let tracker = open_tracker(&AppConfig::from_env())?;
    if !tracker.organize(match_id, tournament_id)? {
        anyhow::bail!(
            "Could not move match {} from the inbox to tournament {}",
            match_id,
            tournament_id
        );
    }
    println!("Moved match {} to tournament {}", match_id, tournament_id);
    Ok(())
}

pub fn handle_sync(server: &str) -> Result<()> {
    let config = AppConfig::from_env();
    let client = TrackerClient::new(server, config.outbox.user_agent, config.outbox.timeout_secs)?;
    let mut outbox = Outbox::open(&config.outbox.path)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(outbox.replay(&client))?;

    println!("Synced {} changes, {} still pending", report.sent, report.remaining);
    Ok(())
}
