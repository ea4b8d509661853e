//! # Design Studio
//!
//! Command-line host for AI edits and exports of design documents.

use std::path::PathBuf;

use clap::Parser;
use studio_client::{
    load_document, save_document, write_export, CliArgs, ClientConfig, Command, DesignSession,
    StudioClient,
};
use studio_core::{Editor, RemoteOutcome};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,studio_client=debug,studio_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    // Use JSON format in production (RUST_LOG_FORMAT=json)
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = ClientConfig::from(&args);
    tracing::info!(
        "Design service: {} (document {})",
        config.base_url,
        config.document_id
    );

    let client = StudioClient::new(&config)?;

    match args.command {
        Command::AiEdit {
            document,
            instruction,
            select,
            output,
        } => {
            let editor = Editor::with_document(load_document(&document)?);
            let mut session = DesignSession::new(editor, client, config.document_id);
            if let Some(id) = select {
                session.select(&id);
            }

            match session.ai_edit(&instruction).await? {
                RemoteOutcome::Applied { .. } => {
                    let target = output.unwrap_or(document);
                    save_document(&target, session.editor().document())?;
                    tracing::info!("Wrote {}", target.display());
                }
                RemoteOutcome::Rejected(reason) => {
                    anyhow::bail!("AI edit rejected: {reason}");
                }
                outcome @ (RemoteOutcome::Completed | RemoteOutcome::Discarded) => {
                    tracing::warn!("AI edit produced no change: {outcome:?}");
                }
            }
        }
        Command::Export {
            document,
            format,
            quality,
            output,
        } => {
            let editor = Editor::with_document(load_document(&document)?);
            let mut session = DesignSession::new(editor, client, config.document_id);

            let Some(bytes) = session.export(format, quality).await? else {
                let reason = session.editor().last_error().unwrap_or("unknown error");
                anyhow::bail!("Export failed: {reason}");
            };
            let target = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "design-{}.{}",
                    session.document_id(),
                    format.extension()
                ))
            });
            write_export(&target, &bytes)?;
            tracing::info!("Wrote {} ({} bytes)", target.display(), bytes.len());
        }
    }

    Ok(())
}
