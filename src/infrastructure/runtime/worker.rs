//! Async worker - performs the chain-document fetch off the TUI thread

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::Duration;

use anyhow::Result;

use crate::infrastructure::chainlist::ChainlistClient;
use crate::infrastructure::runtime::bridge::{RuntimeCommand, RuntimeEvent};

/// Run the async worker loop.
///
/// The registry contract is at-most-one fetch, no retry: the first
/// `FetchChains` runs the request and posts its terminal outcome, any later
/// one is dropped.
pub async fn run_async_worker(
    chainlist_url: String,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    let client = ChainlistClient::new(chainlist_url)?;
    let mut fetched = false;

    loop {
        match cmd_rx.try_recv() {
            Ok(RuntimeCommand::Shutdown) => return Ok(()),
            Ok(RuntimeCommand::FetchChains) => {
                if fetched {
                    continue;
                }
                fetched = true;
                let event = match client.fetch().await {
                    Ok(chains) => RuntimeEvent::ChainsLoaded(chains),
                    Err(err) => RuntimeEvent::ChainsFailed {
                        message: format!("{:#}", err),
                    },
                };
                if evt_tx.send(event).is_err() {
                    return Ok(());
                }
            }
            Err(TryRecvError::Empty) => {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Err(TryRecvError::Disconnected) => return Ok(()),
        }
    }
}
