//! Session state for the badge builder
//!
//! The app owns the raw field values the user types plus the chain
//! registry. Every mutation rebuilds a [`BadgeQuerySpec`] snapshot and
//! recomputes validation and the derived URLs, so the output panel always
//! reflects the most recent edit.

use std::time::{Duration, Instant};

use crate::domain::{
    render_snippet, AssetQuery, BadgeQuerySpec, BitcoinNetwork, ChainDescriptor, ChainRegistry,
    DerivedUrls, DisplayOverrides, EvmQueryKind, OutputFormat, ServiceBases, Validation,
};

/// Asset kind radio. The sum-type query branch is derived from this plus
/// the retained per-kind fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetKind {
    #[default]
    Ethereum,
    Bitcoin,
}

impl AssetKind {
    pub fn title(&self) -> &'static str {
        match self {
            AssetKind::Ethereum => "Ethereum (EVM)",
            AssetKind::Bitcoin => "Bitcoin",
        }
    }
}

/// Focusable form fields. Which ones are visible depends on the asset kind
/// and query type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Asset,
    Chain,
    QueryType,
    TokenAddress,
    Address,
    BtcNetwork,
    Color,
    WarningThreshold,
    Icon,
    LinkToggle,
    Output,
}

impl Field {
    pub fn title(&self) -> &'static str {
        match self {
            Field::Asset => "Blockchain",
            Field::Chain => "Network",
            Field::QueryType => "Query type",
            Field::TokenAddress => "Token contract",
            Field::Address => "Wallet address",
            Field::BtcNetwork => "Network",
            Field::Color => "Color",
            Field::WarningThreshold => "Warning threshold",
            Field::Icon => "Icon",
            Field::LinkToggle => "Link to explorer",
            Field::Output => "Output",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Field::TokenAddress
                | Field::Address
                | Field::Color
                | Field::WarningThreshold
                | Field::Icon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    level: StatusLevel,
    since: Instant,
}

/// Main application state
pub struct App {
    pub registry: ChainRegistry,
    bases: ServiceBases,

    // raw field values; per-kind values are retained across kind switches
    pub asset_kind: AssetKind,
    pub address: String,
    pub token_address: String,
    pub query_kind: EvmQueryKind,
    pub btc_network: BitcoinNetwork,
    pub overrides: DisplayOverrides,
    pub link_to_explorer: bool,
    pub output_format: OutputFormat,

    // selection reported by the registry (the onChainSelected path)
    selected_chain: Option<ChainDescriptor>,

    // chain picker popup
    pub chain_picker_open: bool,
    pub chain_search: String,
    pub chain_cursor: usize,

    pub focus: Field,
    pub should_quit: bool,

    status: Option<StatusMessage>,
    pending_copy: Option<String>,

    // derived on every change
    validation: Validation,
    urls: DerivedUrls,
}

impl App {
    pub fn new(bases: ServiceBases) -> Self {
        let mut app = Self {
            registry: ChainRegistry::new(),
            bases,
            asset_kind: AssetKind::Ethereum,
            address: String::new(),
            token_address: String::new(),
            query_kind: EvmQueryKind::NativeBalance,
            btc_network: BitcoinNetwork::Mainnet,
            overrides: DisplayOverrides::default(),
            link_to_explorer: true,
            output_format: OutputFormat::Markdown,
            selected_chain: None,
            chain_picker_open: false,
            chain_search: String::new(),
            chain_cursor: 0,
            focus: Field::Address,
            should_quit: false,
            status: None,
            pending_copy: None,
            validation: Validation::default(),
            urls: DerivedUrls::default(),
        };
        app.recompute();
        app
    }

    // --- spec snapshot + derived state ---

    /// Assemble the current snapshot from the raw fields.
    pub fn current_spec(&self) -> BadgeQuerySpec {
        let query = match self.asset_kind {
            AssetKind::Ethereum => AssetQuery::Evm {
                chain: self.selected_chain.clone(),
                kind: self.query_kind,
                token_address: self.token_address.clone(),
            },
            AssetKind::Bitcoin => AssetQuery::Bitcoin {
                network: self.btc_network,
            },
        };
        BadgeQuerySpec {
            address: self.address.clone(),
            query,
            overrides: self.overrides.clone(),
            link_to_explorer: self.link_to_explorer,
        }
    }

    fn recompute(&mut self) {
        let spec = self.current_spec();
        self.validation = spec.validate();
        self.urls = spec.derive_urls(&self.bases);
    }

    pub fn address_error(&self) -> &str {
        &self.validation.address_error
    }

    pub fn token_address_error(&self) -> &str {
        &self.validation.token_address_error
    }

    pub fn badge_image_url(&self) -> &str {
        &self.urls.badge_image_url
    }

    pub fn explorer_link_url(&self) -> &str {
        &self.urls.explorer_link_url
    }

    pub fn has_output(&self) -> bool {
        !self.urls.is_empty()
    }

    /// The copyable snippet for the active output tab.
    pub fn output_snippet(&self) -> String {
        render_snippet(&self.current_spec(), &self.urls, self.output_format)
    }

    pub fn selected_chain(&self) -> Option<&ChainDescriptor> {
        self.selected_chain.as_ref()
    }

    /// Label for the native-balance option, e.g. `ETH Balance`.
    pub fn native_balance_label(&self) -> String {
        let symbol = self
            .selected_chain
            .as_ref()
            .and_then(|chain| chain.native_currency_symbol.as_deref())
            .unwrap_or("Native");
        format!("{symbol} Balance")
    }

    // --- registry events ---

    pub fn apply_chains_loaded(&mut self, chains: Vec<ChainDescriptor>) {
        if !self.registry.is_loading() {
            return;
        }
        let count = chains.len();
        let default = self.registry.apply_loaded(chains);
        if let Some(chain) = default {
            self.select_chain(chain);
        }
        self.set_status(format!("Loaded {count} networks"), StatusLevel::Info);
        self.recompute();
    }

    pub fn apply_chains_failed(&mut self, message: String) {
        self.registry.apply_failed(message.clone());
        self.selected_chain = None;
        self.chain_picker_open = false;
        self.set_status(message, StatusLevel::Error);
        self.recompute();
    }

    /// Selection callback: the registry reports the full descriptor so the
    /// builder has the native currency symbol for its labels.
    pub fn select_chain(&mut self, chain: ChainDescriptor) {
        self.selected_chain = Some(chain);
        self.recompute();
    }

    // --- field navigation ---

    /// Fields visible for the current kind/query selections, in tab order.
    pub fn visible_fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Asset];
        match self.asset_kind {
            AssetKind::Ethereum => {
                fields.push(Field::Chain);
                fields.push(Field::QueryType);
                if self.query_kind == EvmQueryKind::Erc20Balance {
                    fields.push(Field::TokenAddress);
                }
            }
            AssetKind::Bitcoin => fields.push(Field::BtcNetwork),
        }
        fields.extend([
            Field::Address,
            Field::Color,
            Field::WarningThreshold,
            Field::Icon,
            Field::LinkToggle,
            Field::Output,
        ]);
        fields
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let fields = self.visible_fields();
        let current = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        let len = fields.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.focus = fields[next];
    }

    fn clamp_focus(&mut self) {
        let fields = self.visible_fields();
        if !fields.contains(&self.focus) {
            self.focus = Field::Address;
        }
    }

    // --- edits ---

    pub fn input_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        if self.chain_picker_open {
            self.chain_search.push(ch);
            self.chain_cursor = 0;
            return;
        }
        let target = match self.focus {
            Field::Address => &mut self.address,
            Field::TokenAddress => &mut self.token_address,
            Field::Color => &mut self.overrides.color,
            Field::WarningThreshold => &mut self.overrides.warning_threshold,
            Field::Icon => &mut self.overrides.icon,
            _ => return,
        };
        target.push(ch);
        self.recompute();
    }

    pub fn backspace(&mut self) {
        if self.chain_picker_open {
            self.chain_search.pop();
            self.chain_cursor = 0;
            return;
        }
        let target = match self.focus {
            Field::Address => &mut self.address,
            Field::TokenAddress => &mut self.token_address,
            Field::Color => &mut self.overrides.color,
            Field::WarningThreshold => &mut self.overrides.warning_threshold,
            Field::Icon => &mut self.overrides.icon,
            _ => return,
        };
        target.pop();
        self.recompute();
    }

    /// Cycle the value of an enum-valued field. `forward` is false for the
    /// left arrow.
    pub fn cycle_value(&mut self, forward: bool) {
        match self.focus {
            Field::Asset => self.toggle_asset_kind(),
            Field::QueryType => {
                self.query_kind = match self.query_kind {
                    EvmQueryKind::NativeBalance => EvmQueryKind::Erc20Balance,
                    EvmQueryKind::Erc20Balance => EvmQueryKind::NativeBalance,
                };
                self.clamp_focus();
            }
            Field::BtcNetwork => {
                let all = BitcoinNetwork::ALL;
                let idx = all
                    .iter()
                    .position(|network| *network == self.btc_network)
                    .unwrap_or(0);
                let next = if forward {
                    (idx + 1) % all.len()
                } else {
                    (idx + all.len() - 1) % all.len()
                };
                self.btc_network = all[next];
            }
            Field::LinkToggle => self.link_to_explorer = !self.link_to_explorer,
            Field::Output => {
                let all = OutputFormat::ALL;
                let idx = all
                    .iter()
                    .position(|format| *format == self.output_format)
                    .unwrap_or(0);
                let next = if forward {
                    (idx + 1) % all.len()
                } else {
                    (idx + all.len() - 1) % all.len()
                };
                self.output_format = all[next];
            }
            _ => return,
        }
        self.recompute();
    }

    fn toggle_asset_kind(&mut self) {
        // per-kind fields are retained; only the active branch changes
        self.asset_kind = match self.asset_kind {
            AssetKind::Ethereum => AssetKind::Bitcoin,
            AssetKind::Bitcoin => AssetKind::Ethereum,
        };
        self.clamp_focus();
    }

    // --- chain picker ---

    pub fn open_chain_picker(&mut self) {
        if !self.registry.is_ready() {
            let message = match self.registry.error() {
                Some(err) => err.to_string(),
                None => "Loading networks…".to_string(),
            };
            let level = if self.registry.error().is_some() {
                StatusLevel::Error
            } else {
                StatusLevel::Warn
            };
            self.set_status(message, level);
            return;
        }
        self.chain_picker_open = true;
        self.chain_search.clear();
        self.chain_cursor = 0;
    }

    pub fn close_chain_picker(&mut self) {
        self.chain_picker_open = false;
    }

    pub fn picker_results(&self) -> Vec<ChainDescriptor> {
        self.registry
            .search(&self.chain_search)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn picker_move(&mut self, down: bool) {
        let len = self.picker_results().len();
        if len == 0 {
            self.chain_cursor = 0;
            return;
        }
        if down {
            self.chain_cursor = (self.chain_cursor + 1).min(len - 1);
        } else {
            self.chain_cursor = self.chain_cursor.saturating_sub(1);
        }
    }

    pub fn picker_confirm(&mut self) {
        let results = self.picker_results();
        let Some(chosen) = results.get(self.chain_cursor) else {
            return;
        };
        if let Some(chain) = self.registry.select(chosen.chain_id) {
            let label = chain.label();
            self.select_chain(chain);
            self.set_status(format!("Selected {label}"), StatusLevel::Info);
        }
        self.chain_picker_open = false;
    }

    // --- clipboard ---

    /// Queue the active snippet for the clipboard; main drains the request.
    pub fn request_copy(&mut self) {
        let snippet = self.output_snippet();
        if snippet.is_empty() {
            self.set_status("Nothing to copy yet", StatusLevel::Warn);
            return;
        }
        self.pending_copy = Some(snippet);
    }

    pub fn take_copy_request(&mut self) -> Option<String> {
        self.pending_copy.take()
    }

    // --- status line ---

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }
}
