//! Browser adapters for the tutor ports.
//!
//! `llm` talks to the model over `fetch()`; `file` wraps the
//! `<input type="file">` picker.

pub mod file;
pub mod llm;
