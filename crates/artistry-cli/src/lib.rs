//! Headless front-end: one style transfer from the command line.

pub mod cli_args;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use artistry_core::{
    ImageFile, ImageSelection, MemoryObjectUrls, SlotKind, StyleTransferClient,
    TransferOrchestrator, UploadZone, load_config,
};
use clap::Parser;
use cli_args::{Cli, SourceArg};
use tracing::warn;

/// Any argument at all selects the command line; a bare launch opens the window.
pub fn should_run_cli_mode() -> bool {
    std::env::args_os().len() > 1
}

/// Parse the process arguments and run one transfer.
pub async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let output = run_with(cli).await?;
    println!("Saved stylized image to {}", output.display());
    Ok(())
}

/// Run one transfer and write the result. Returns the path written.
pub async fn run_with(cli: Cli) -> Result<PathBuf, String> {
    let load = load_config();
    for warning in &load.warnings {
        warn!("{warning}");
    }

    let backend = load.config.backend;
    let timeout = cli
        .timeout_secs
        .map(Duration::from_secs)
        .or_else(|| backend.request_timeout());
    let endpoint = cli.endpoint.unwrap_or(backend.endpoint);
    let client = StyleTransferClient::new(&endpoint, timeout).map_err(|e| e.user_message())?;

    let store = Arc::new(MemoryObjectUrls::new());
    let mut orchestrator = TransferOrchestrator::new(store);
    select_source(&mut orchestrator, SlotKind::Content, &cli.content)?;
    select_source(&mut orchestrator, SlotKind::Style, &cli.style)?;

    let notification = orchestrator
        .run_transfer(&client)
        .await
        .ok_or_else(|| "Both a content image and a style image are required".to_string())?;
    if notification.is_error() {
        return Err(notification.description);
    }

    let result = orchestrator
        .result()
        .ok_or_else(|| "Backend returned no image".to_string())?;
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("stylized.{}", result.image.extension())));
    fs::write(&output, &result.image.bytes[..])
        .map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    Ok(output)
}

/// Feed one argument through an upload zone into the orchestrator.
fn select_source(
    orchestrator: &mut TransferOrchestrator,
    slot: SlotKind,
    raw: &str,
) -> Result<(), String> {
    let mut zone = UploadZone::new(slot);
    let mut on_select = |selection: ImageSelection| orchestrator.select(slot, selection);

    match SourceArg::parse(raw) {
        SourceArg::Url(url) => {
            zone.open_url_form();
            zone.url_input_mut().push_str(&url);
            zone.submit_url(&mut on_select);
        }
        SourceArg::Path(path) => {
            let file = ImageFile::from_path(&path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            // No picker filter on the command line, so take the drop path and its type check.
            if !zone.drop_files([file], &mut on_select) {
                return Err(format!("{} is not an image", path.display()));
            }
        }
    }

    if orchestrator.selection(slot).is_empty() {
        return Err(format!("No {} image given", slot));
    }
    Ok(())
}
