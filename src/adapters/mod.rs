//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `shared_state` - in-process shared state store
//! - `knowledge` - askables/rules file loaders and the rule engine
//! - `terminal` - text presenter and console input loop

pub mod knowledge;
pub mod shared_state;
pub mod terminal;

pub use knowledge::{load_catalog, load_knowledge_base, LoadError, RuleEngine};
pub use shared_state::InMemorySharedState;
pub use terminal::{ConsoleFrontend, ConsoleOutcome, TerminalPresenter};
