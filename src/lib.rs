//! Expert Advisor - Question/Answer Sync Between Inference and Presentation
//!
//! This crate runs a rule-based consultation: an inference worker asks for
//! facts it cannot derive, a presentation layer collects the user's answers,
//! and both sides coordinate through a shared key-value state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
