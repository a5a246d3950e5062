pub mod bridge;
pub mod worker;

pub use bridge::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
