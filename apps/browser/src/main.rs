use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{
    load_settings, CatalogClient, CharacterDetailSource, ListController, ListStatus,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::WatchStream, StreamExt};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{BrowserCommand, HELP};

#[derive(Parser, Debug)]
#[command(about = "Browse the character catalog from the terminal")]
struct Args {
    /// Settings file (defaults to ./catalog.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the catalog API base url.
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!(api = %settings.api_base_url, "starting catalog browser");

    let client = Arc::new(CatalogClient::from_settings(&settings)?);
    let controller = ListController::new(client.clone());

    let mut updates = WatchStream::from_changes(controller.subscribe());
    tokio::spawn(async move {
        while let Some(snapshot) = updates.next().await {
            match snapshot.status {
                ListStatus::Loading => println!("{}", render::status_line(&snapshot)),
                _ => println!("{}", render::snapshot(&snapshot)),
            }
        }
    });

    controller.load_initial().await;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = BrowserCommand::parse(&line) else {
            continue;
        };
        tracing::debug!(command = command.name(), "browser command");

        match command {
            BrowserCommand::More => {
                let pager = controller.clone();
                tokio::spawn(async move {
                    if pager.load_more().await.is_none() {
                        let snapshot = pager.snapshot().await;
                        println!("nothing to load: {}", render::status_line(&snapshot));
                    }
                });
            }
            BrowserCommand::Refresh => {
                let refresher = controller.clone();
                tokio::spawn(async move {
                    refresher.refresh().await;
                });
            }
            BrowserCommand::Search(term) => controller.set_search_term(term).await,
            BrowserCommand::ClearSearch => controller.set_search_term("").await,
            BrowserCommand::List => println!("{}", render::snapshot(&controller.snapshot().await)),
            BrowserCommand::Show(id) => match client.fetch_character(id).await {
                Ok(detail) => println!("{}", render::detail(&detail)),
                Err(err) => {
                    tracing::warn!(error = %err, "character detail failed");
                    println!("Character #{id} could not be loaded.");
                }
            },
            BrowserCommand::Help => println!("{HELP}"),
            BrowserCommand::Quit => break,
            BrowserCommand::Invalid(reason) => println!("{reason} (type 'help')"),
        }
    }

    Ok(())
}
