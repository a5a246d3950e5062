//! Runtime bridge - connects the sync TUI thread with an async Tokio runtime
//!
//! The TUI thread stays synchronous; the one network operation of a session
//! (the chain-document fetch) runs on a worker thread that owns a Tokio
//! runtime. Commands flow down and events flow up over std mpsc channels,
//! drained between input events.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::runtime::Runtime;

use crate::domain::ChainDescriptor;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch the chain-metadata document. Honored at most once per session;
    /// repeats are ignored by the worker.
    FetchChains,
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Chain document fetched and normalized
    ChainsLoaded(Vec<ChainDescriptor>),
    /// Chain document fetch failed; terminal for the session
    ChainsFailed { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker thread with its own Tokio runtime.
    pub fn new(chainlist_url: String) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(async {
                if let Err(err) = run_async_worker(chainlist_url, cmd_rx, evt_tx.clone()).await {
                    let _ = evt_tx.send(RuntimeEvent::ChainsFailed {
                        message: format!("Worker exited: {:#}", err),
                    });
                }
            });
        });

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
