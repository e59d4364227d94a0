//! Simsh - a line-oriented shell with background job supervision.
//!
//! A command line is tokenized, built into a [`Command`](crate::core::parser::ast::Command),
//! and then either run by a builtin or launched as an external program in the
//! foreground or the background. Background jobs are tracked by
//! [`JobManager`](crate::shell::job_control::JobManager) and reported once they finish.

#![recursion_limit = "1024"]
#![deny(missing_debug_implementations)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod util;

pub mod core;
mod editor;
pub mod errors;
pub mod shell;

pub use crate::shell::{display_error, Shell, ShellConfig};
pub use crate::util::ShellExitStatusExt;
