//! Flight network CLI library.
//!
//! This crate provides the command handlers and output formatting used by
//! the `flightnet-cli` binary.

pub mod commands;
pub mod output;
