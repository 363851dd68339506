//! Terminal adapters - text rendering and line-driven input.

mod console;
mod presenter;

pub use console::{parse_selection, ConsoleError, ConsoleFrontend, ConsoleOutcome, SelectionError};
pub use presenter::TerminalPresenter;
