// ABOUTME: Command module aggregator for the gitship CLI.
// ABOUTME: Re-exports the deploy and history command handlers.

mod deploy;
mod history;

pub use deploy::deploy;
pub use history::history;
