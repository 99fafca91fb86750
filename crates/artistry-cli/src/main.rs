use anyhow::Result;
use artistry_core::logging::{LoggingDestination, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = init_logging(LoggingDestination::FileAndStderr) {
        eprintln!("Warning: logging unavailable: {err}");
    }
    artistry_cli::run().await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
