//! badgesmith: build crypto balance-badge URLs
//!
//! The library half holds everything testable: the chain registry, the
//! badge query spec with its validation and URL derivation, the chainlist
//! client, and the session state. The binary wires it to a terminal.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
