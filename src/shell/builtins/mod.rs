//! Simsh builtins
//!
//! This module includes the implementations of common shell builtin commands.
//! Where possible the commands conform to their standard Bash counterparts.

use std::iter;

use docopt::Docopt;
use serde::de::DeserializeOwned;

use self::prelude::*;

use self::clear::Clear;
use self::dirs::{Cd, Pwd};
use self::echo::Echo;
use self::env::{Export, Unset};
use self::exit::Exit;
use self::help::Help;
use self::jobs::Jobs;

pub mod prelude {
    pub use std::io::Write;

    pub use super::{parse_args, BuiltinCommand};
    pub use crate::errors::{Error, ErrorKind, Result, ResultExt};
    pub use crate::shell::Shell;
}

mod clear;
mod dirs;
mod echo;
mod env;
mod exit;
mod help;
mod jobs;

const CD_NAME: &str = "cd";
const CLEAR_NAME: &str = "clear";
const ECHO_NAME: &str = "echo";
const EXIT_NAME: &str = "exit";
const EXPORT_NAME: &str = "export";
const HELP_NAME: &str = "help";
const JOBS_NAME: &str = "jobs";
const PWD_NAME: &str = "pwd";
const UNSET_NAME: &str = "unset";

const BUILTIN_NAMES: [&str; 9] = [
    CD_NAME,
    CLEAR_NAME,
    ECHO_NAME,
    EXIT_NAME,
    EXPORT_NAME,
    HELP_NAME,
    JOBS_NAME,
    PWD_NAME,
    UNSET_NAME,
];

/// Represents a Simsh builtin command such as cd or help.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user. The first line is the usage.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> &'static str {
        Self::HELP.lines().next().unwrap_or(Self::NAME)
    }
    /// Runs the command with the given arguments in the `shell` environment.
    ///
    /// `args` does not include the command's own name.
    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    BUILTIN_NAMES.contains(&program.as_ref())
}

/// precondition: command is a builtin.
pub fn run<S1, S2>(shell: &mut Shell, program: S1, args: &[S2], stdout: &mut dyn Write) -> Result<()>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug_assert!(is_builtin(&program));
    debug!("running builtin {}", program.as_ref());

    match program.as_ref() {
        CD_NAME => Cd::run(shell, args, stdout),
        CLEAR_NAME => Clear::run(shell, args, stdout),
        ECHO_NAME => Echo::run(shell, args, stdout),
        EXIT_NAME => Exit::run(shell, args, stdout),
        EXPORT_NAME => Export::run(shell, args, stdout),
        HELP_NAME => Help::run(shell, args, stdout),
        JOBS_NAME => Jobs::run(shell, args, stdout),
        PWD_NAME => Pwd::run(shell, args, stdout),
        UNSET_NAME => Unset::run(shell, args, stdout),
        other => Err(ErrorKind::CommandNotFound(other.to_string()).into()),
    }
}

/// Parses `args` against a docopt usage string.
pub fn parse_args<D, S, I>(usage: &str, program: S, args: I) -> Result<D>
where
    D: DeserializeOwned,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args = Docopt::new(usage)?
        .argv(iter::once(program).chain(args))
        .deserialize()?;
    Ok(args)
}
