//! Dispatch CLI library.
//!
//! Argument parsing helpers, terminal styling and report rendering for the
//! `dispatch-cli` binary.

pub mod args;
pub mod output;
pub mod terminal;
