//! Askable module - facts the engine cannot derive and must ask for.
//!
//! - `AskableSpec` / `AskableOption` - static question descriptions
//! - `QuestionKind` - answer shape with one `decode` per variant
//! - `AskableCatalog` - the read-only set loaded at startup

mod catalog;
mod kind;
mod spec;

pub use catalog::{AskableCatalog, CatalogError};
pub use kind::{DecodeError, QuestionKind, TypedValue};
pub use spec::{AskableOption, AskableSpec};
