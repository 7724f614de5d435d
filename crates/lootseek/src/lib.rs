//! # LOOTSEEK Command Line
//!
//! Argument parsing and process setup for the `lootseek` and
//! `lootseek-inspect` binaries. The search itself lives in
//! `lootseek_search`.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod runtime;

pub use cli::{parse_seed, InspectArgs, SearchArgs, DEFAULT_OUTPUT};
pub use runtime::{exit_code_for, init_tracing, report_failure, spawn_interrupt_handler};
