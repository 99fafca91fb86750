//! Async runtime bridge for running the transfer request behind egui

use std::sync::Mutex;
use std::time::Instant;

use artistry_core::{StyleTransferClient, StylizedImage, TransferError, TransferRequest};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Bridge between async runtime and egui
pub struct AsyncBridge {
    /// Tokio runtime for async operations (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,

    /// Sender handed to spawned requests
    update_tx: mpsc::UnboundedSender<TransferUpdate>,

    /// Receiver drained by the UI thread each frame
    update_rx: Mutex<mpsc::UnboundedReceiver<TransferUpdate>>,
}

/// Outcome of a finished request
#[derive(Debug)]
pub struct TransferUpdate {
    pub outcome: Result<StylizedImage, TransferError>,
    pub elapsed_ms: f64,
}

impl AsyncBridge {
    /// Create a new async bridge
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        Self {
            runtime: Some(runtime),
            update_tx,
            update_rx: Mutex::new(update_rx),
        }
    }

    /// Get the runtime handle for spawning tasks
    pub fn runtime(&self) -> &Runtime {
        self.runtime.as_ref().expect("Runtime has been shut down")
    }

    /// Run one request in the background; `ctx` is woken when it settles.
    pub fn spawn_transfer(
        &self,
        client: StyleTransferClient,
        request: TransferRequest,
        ctx: egui::Context,
    ) {
        let tx = self.update_tx.clone();
        self.runtime().spawn(async move {
            let started = Instant::now();
            let outcome = client.transfer(request).await;
            let update = TransferUpdate {
                outcome,
                elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
            };
            if tx.send(update).is_err() {
                tracing::warn!("Transfer finished after the window closed");
            }
            ctx.request_repaint();
        });
    }

    /// Poll for finished requests and call the handler
    pub fn poll_updates<F>(&self, mut handler: F)
    where
        F: FnMut(TransferUpdate),
    {
        let Ok(mut rx) = self.update_rx.lock() else {
            return;
        };
        while let Ok(update) = rx.try_recv() {
            handler(update);
        }
    }
}

impl Default for AsyncBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Shutdown the runtime without blocking
        // This prevents the "Cannot drop a runtime in a context where blocking is not allowed" panic
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
