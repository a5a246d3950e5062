//! Pure logic: address checks, chain metadata, registry state, query spec

pub mod address;
pub mod chain;
pub mod registry;
pub mod resource;
pub mod spec;

pub use chain::{ChainDescriptor, RawChain};
pub use registry::{ChainRegistry, RegistryState};
pub use resource::{BitcoinNetwork, ResourcePath, ResourcePathError};
pub use spec::{
    render_snippet, AssetQuery, BadgeQuerySpec, DerivedUrls, DisplayOverrides, EvmQueryKind,
    OutputFormat, ServiceBases, Validation,
};
