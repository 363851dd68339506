//! Shared state adapters.

mod in_memory;

pub use in_memory::InMemorySharedState;
