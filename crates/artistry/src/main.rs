//! artistry launcher
//!
//! Arguments on the command line run one headless transfer; a bare launch opens the window.

use anyhow::Result;
use artistry_core::logging::{LoggingDestination, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    if artistry_cli::should_run_cli_mode() {
        if let Err(e) = init_logging(LoggingDestination::FileAndStderr) {
            eprintln!("Warning: logging unavailable: {}", e);
        }
        artistry_cli::run().await.map_err(|e| anyhow::anyhow!(e))?;
    } else {
        if let Err(e) = init_logging(LoggingDestination::FileOnly) {
            eprintln!("Warning: logging unavailable: {}", e);
        }
        if let Err(e) = artistry_gui::run() {
            eprintln!("GUI error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
