//! Chain registry: a cached loader with three states and a selection

use super::chain::{self, ChainDescriptor};

/// The default selection when the document contains Ethereum mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Lifecycle of the one registry load. `Ready` and `Error` are terminal for
/// the session; there is no retry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryState {
    Loading,
    Ready(Vec<ChainDescriptor>),
    Error(String),
}

/// Owns the loaded chain snapshot and the user's selection.
#[derive(Debug)]
pub struct ChainRegistry {
    state: RegistryState,
    selected: Option<ChainDescriptor>,
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self {
            state: RegistryState::Loading,
            selected: None,
        }
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RegistryState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, RegistryState::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RegistryState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<&ChainDescriptor> {
        self.selected.as_ref()
    }

    /// Apply a successful load. Auto-selects chain id 1 when present and
    /// returns that default so the caller can report it upward. A second
    /// load event is ignored; the state machine is already terminal.
    pub fn apply_loaded(&mut self, chains: Vec<ChainDescriptor>) -> Option<ChainDescriptor> {
        if !self.is_loading() {
            return None;
        }
        let default = chains
            .iter()
            .find(|chain| chain.chain_id == DEFAULT_CHAIN_ID)
            .cloned();
        self.state = RegistryState::Ready(chains);
        self.selected = default.clone();
        default
    }

    /// Apply a failed load. Terminal: no default chain is ever reported.
    pub fn apply_failed(&mut self, message: String) {
        if !self.is_loading() {
            return;
        }
        self.state = RegistryState::Error(message);
        self.selected = None;
    }

    /// Ranked search over the loaded snapshot. Empty outside `Ready`.
    pub fn search(&self, query: &str) -> Vec<&ChainDescriptor> {
        match &self.state {
            RegistryState::Ready(chains) => chain::search(chains, query),
            _ => Vec::new(),
        }
    }

    /// Record a selection by chain id and return the full descriptor so the
    /// caller has the native currency symbol for its labels. Unavailable
    /// outside `Ready`.
    pub fn select(&mut self, chain_id: u64) -> Option<ChainDescriptor> {
        let RegistryState::Ready(chains) = &self.state else {
            return None;
        };
        let chosen = chains.iter().find(|chain| chain.chain_id == chain_id)?;
        self.selected = Some(chosen.clone());
        self.selected.clone()
    }
}
