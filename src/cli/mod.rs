//! CLI command handlers

pub mod commands;

pub use commands::{build, callbacks, check, init, macros, xml};
