//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

use std::fmt;
use std::process::ExitStatus;

use crate::core::job::JobId;

/// The standard stream a redirection was requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Stream::Stdin => write!(f, "input"),
            Stream::Stdout => write!(f, "output"),
            Stream::Stderr => write!(f, "error"),
        }
    }
}

fn describe_status(status: &Option<ExitStatus>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

error_chain! {
    foreign_links {
        Docopt(::docopt::Error);
        Io(::std::io::Error);
        Log(::log::SetLoggerError);
        Nix(::nix::Error);
        Readline(::rustyline::error::ReadlineError);
    }

    errors {
        UnterminatedQuote {
            description("unterminated quote")
            display("syntax error: unterminated quote")
        }
        TrailingEscape {
            description("trailing escape")
            display("syntax error: trailing backslash at end of input")
        }
        MissingRedirectTarget(operator: String) {
            description("missing redirect target")
            display("syntax error: expected a file name after `{}'", operator)
        }
        EmptyCommand {
            description("empty command")
            display("syntax error: no command provided")
        }
        UnsupportedOperator(operator: String) {
            description("unsupported operator")
            display("syntax error: unsupported operator `{}'", operator)
        }
        CommandNotFound(command: String) {
            description("command not found")
            display("{}: command not found", command)
        }
        // `status` is `None` when the program could not be started at all.
        CommandFailed(command: String, status: Option<ExitStatus>) {
            description("command failed")
            display("{}: command failed{}", command, describe_status(status))
        }
        JobNotFound(id: JobId) {
            description("no such job")
            display("{}: no such job", id)
        }
        RedirectFailed(path: String, stream: Stream) {
            description("redirection failed")
            display("cannot open {} file `{}'", stream, path)
        }
        BuiltinCommand(message: String, code: i32) {
            description("builtin command failed")
            display("{}", message)
        }
    }
}

impl Error {
    pub fn builtin_command<S: Into<String>>(message: S, code: i32) -> Self {
        ErrorKind::BuiltinCommand(message.into(), code).into()
    }

    /// Returns `true` if the error came from reading the command line rather than running it.
    pub fn is_syntax_error(&self) -> bool {
        match *self.kind() {
            ErrorKind::UnterminatedQuote
            | ErrorKind::TrailingEscape
            | ErrorKind::MissingRedirectTarget(_)
            | ErrorKind::EmptyCommand
            | ErrorKind::UnsupportedOperator(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display() {
        let e: Error = ErrorKind::CommandFailed("ls".to_string(), None).into();
        assert_eq!(e.to_string(), "ls: command failed");
    }

    #[test]
    fn redirect_failed_display() {
        let e: Error = ErrorKind::RedirectFailed("in.txt".to_string(), Stream::Stdin).into();
        assert_eq!(e.to_string(), "cannot open input file `in.txt'");
    }

    #[test]
    fn builtin_command_display() {
        let e = Error::builtin_command("cd: HOME not set", 1);
        assert_eq!(e.to_string(), "cd: HOME not set");
        match *e.kind() {
            ErrorKind::BuiltinCommand(_, code) => assert_eq!(code, 1),
            ref other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn syntax_errors() {
        assert!(Error::from(ErrorKind::EmptyCommand).is_syntax_error());
        assert!(Error::from(ErrorKind::MissingRedirectTarget("<".to_string())).is_syntax_error());
        assert!(Error::from(ErrorKind::UnsupportedOperator("|".to_string())).is_syntax_error());
        assert!(!Error::from(ErrorKind::CommandNotFound("x".to_string())).is_syntax_error());
    }

    #[test]
    fn unsupported_operator_display() {
        let e: Error = ErrorKind::UnsupportedOperator("&&".to_string()).into();
        assert_eq!(e.to_string(), "syntax error: unsupported operator `&&'");
    }
}
