use crate::shell::builtins::{self, prelude::*};
use crate::shell::builtins::{Cd, Clear, Echo, Exit, Export, Jobs, Pwd, Unset};

pub struct Help;

impl builtins::BuiltinCommand for Help {
    const NAME: &'static str = builtins::HELP_NAME;

    const HELP: &'static str = "\
help: help [command ...]
    Display helpful information about builtin commands. If COMMAND is specified,
    gives detailed help on all commands matching COMMAND, otherwise a list of the
    builtins is printed.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            for usage in &all_usages() {
                writeln!(stdout, "{}", usage)?;
            }
            return Ok(());
        }

        let mut unmatched = Vec::new();
        for arg in args {
            match help_for(arg.as_ref()) {
                Some(help) => writeln!(stdout, "{}", help)?,
                None => unmatched.push(arg.as_ref()),
            }
        }

        if unmatched.len() == args.len() {
            let msg = unmatched
                .iter()
                .map(|topic| format!("help: no help topics match `{}'", topic))
                .collect::<Vec<String>>()
                .join("\n");
            return Err(Error::builtin_command(msg, 1));
        }

        Ok(())
    }
}

fn all_usages() -> [&'static str; 9] {
    [
        Cd::usage(),
        Clear::usage(),
        Echo::usage(),
        Exit::usage(),
        Export::usage(),
        Help::usage(),
        Jobs::usage(),
        Pwd::usage(),
        Unset::usage(),
    ]
}

fn help_for(name: &str) -> Option<&'static str> {
    match name {
        builtins::CD_NAME => Some(Cd::HELP),
        builtins::CLEAR_NAME => Some(Clear::HELP),
        builtins::ECHO_NAME => Some(Echo::HELP),
        builtins::EXIT_NAME => Some(Exit::HELP),
        builtins::EXPORT_NAME => Some(Export::HELP),
        builtins::HELP_NAME => Some(Help::HELP),
        builtins::JOBS_NAME => Some(Jobs::HELP),
        builtins::PWD_NAME => Some(Pwd::HELP),
        builtins::UNSET_NAME => Some(Unset::HELP),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shell::ShellConfig;

    fn help(args: &[&str]) -> Result<String> {
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();
        let mut stdout: Vec<u8> = Vec::new();
        Help::run(&mut shell, args, &mut stdout)?;
        Ok(String::from_utf8(stdout).unwrap())
    }

    #[test]
    fn lists_every_builtin() {
        let output = help(&[]).unwrap();
        assert_eq!(output.lines().count(), builtins::BUILTIN_NAMES.len());
        assert!(output.contains("cd: cd [dir]"));
        assert!(output.contains("clear: clear"));
        assert!(output.contains("exit: exit [n]"));
    }

    #[test]
    fn topic_help() {
        let output = help(&["pwd"]).unwrap();
        assert_eq!(output, format!("{}\n", Pwd::HELP));
    }

    #[test]
    fn partially_unknown_topics() {
        assert!(help(&["nope", "cd"]).is_ok());
    }

    #[test]
    fn unknown_topic() {
        let e = help(&["nope"]).unwrap_err();
        assert_eq!(e.to_string(), "help: no help topics match `nope'");
    }
}
