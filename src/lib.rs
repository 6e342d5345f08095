// ABOUTME: Library root for gitship - exposes the pipeline and its collaborators.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod context;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod history;
pub mod output;
pub mod tools;
pub mod types;
