use std::process::ExitStatus;

use crate::shell::builtins::{self, prelude::*};
use crate::util::ShellExitStatusExt;

pub struct Exit;

impl builtins::BuiltinCommand for Exit {
    const NAME: &'static str = builtins::EXIT_NAME;

    const HELP: &'static str = "\
exit: exit [n]
    Exit the shell with a status of N. If N is omitted, the exit status
    is that of the last command executed. N is taken modulo 256.";

    fn run<T: AsRef<str>>(shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        if args.len() > 1 {
            return Err(Error::builtin_command("exit: too many arguments", 1));
        }

        let status = args.first().map(|arg| parse_status(arg.as_ref()));
        shell.exit(status);
    }
}

fn parse_status(arg: &str) -> ExitStatus {
    let code = arg.parse::<i64>().unwrap_or_else(|_| {
        eprintln!("simsh: exit: {}: numeric argument required", arg);
        2
    });
    ExitStatus::from_status(code.rem_euclid(256) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wraps_into_a_byte() {
        assert_eq!(parse_status("0").shell_code(), 0);
        assert_eq!(parse_status("3").shell_code(), 3);
        assert_eq!(parse_status("256").shell_code(), 0);
        assert_eq!(parse_status("257").shell_code(), 1);
        assert_eq!(parse_status("-1").shell_code(), 255);
    }

    #[test]
    fn non_numeric_status() {
        assert_eq!(parse_status("abc").shell_code(), 2);
    }
}
