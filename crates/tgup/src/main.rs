use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;

use tgup_core::{
    config::Config,
    errors::Error,
    store::Database,
    uploader::{Uploader, COMPLETION_TEXT},
    Result,
};
use tgup_telegram::TelegramTransport;

mod cli;
mod prompt;
mod version;

use prompt::Prompter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::Args::parse();
    if args.version {
        println!("{}", version::banner());
        return ExitCode::SUCCESS;
    }

    if let Err(e) = tgup_core::logging::init("tgup") {
        eprintln!("{e}");
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(usage)) => {
            eprintln!("Usage: {usage}");
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args) -> Result<()> {
    let (config_path, target) = args.require()?;

    let cfg = Config::load(&config_path)?;
    tracing::debug!(api_id = cfg.api_id, "config loaded");

    let (transport, username) = TelegramTransport::connect(&cfg).await?;
    println!("Logged in as bot: @{username}");

    // Open once; every ledger/history handle below shares this connection.
    let db = Database::open(&cfg.database_path)?;

    let (destination, anchor) = {
        let mut prompter = Prompter::stdio();
        let destination = prompt::choose_destination(&mut prompter, &db.chat_history())?;
        let anchor = prompt::ask_reply_anchor(&mut prompter)?;
        (destination, anchor)
    };

    let target = canonical_target(&target)?;
    let uploader = Uploader::new(
        Arc::new(transport),
        db.ledger(),
        destination,
        cfg.send_interval,
    );
    uploader.upload_path(&target, anchor).await?;

    if let Err(e) = uploader.announce_completion().await {
        tracing::warn!(
            "Failed to send completion message to {}: {e}",
            uploader.destination()
        );
    }
    println!("{COMPLETION_TEXT}");

    Ok(())
}

/// Ledger keys are absolute, so reruns from another directory still match.
fn canonical_target(target: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(target).map_err(|e| Error::InvalidPath {
        path: target.to_path_buf(),
        reason: e.to_string(),
    })
}
