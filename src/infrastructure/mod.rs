//! External-facing plumbing: the chainlist HTTP client and the runtime bridge

pub mod chainlist;
pub mod runtime;

pub use chainlist::{parse_chain_document, ChainlistClient, CHAINLIST_URL};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
