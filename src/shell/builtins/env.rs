use std::env;

use crate::shell::builtins::{self, prelude::*};

pub struct Export;

impl builtins::BuiltinCommand for Export {
    const NAME: &'static str = builtins::EXPORT_NAME;

    const HELP: &'static str = "\
export: export [name[=value] ...]
    Set each NAME in the environment of the shell and of the programs it
    starts. Without arguments, print every exported variable.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()> {
        if args.is_empty() {
            let mut vars: Vec<(String, String)> = env::vars().collect();
            vars.sort();
            for (key, value) in vars {
                writeln!(stdout, "{}={}", key, value)?;
            }
            return Ok(());
        }

        let mut bad_args = Vec::new();
        for arg in args {
            let mut key_value = arg.as_ref().splitn(2, '=');
            let key = key_value.next().unwrap_or_default();
            let value = key_value.next().unwrap_or_default();
            if is_valid_identifier(key) && !value.contains('\0') {
                env::set_var(key, value);
            } else {
                bad_args.push(arg.as_ref());
            }
        }

        if !bad_args.is_empty() {
            return Err(invalid_identifiers(Self::NAME, &bad_args));
        }

        Ok(())
    }
}

pub struct Unset;

impl builtins::BuiltinCommand for Unset {
    const NAME: &'static str = builtins::UNSET_NAME;

    const HELP: &'static str = "\
unset: unset [name ...]
    For each name, remove the corresponding variable.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        let mut bad_args = Vec::new();
        for arg in args {
            if is_valid_identifier(arg.as_ref()) {
                env::remove_var(arg.as_ref());
            } else {
                bad_args.push(arg.as_ref());
            }
        }

        if !bad_args.is_empty() {
            return Err(invalid_identifiers(Self::NAME, &bad_args));
        }

        Ok(())
    }
}

/// A name `$NAME` expansion can refer to.
fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid_identifiers(builtin: &str, bad_args: &[&str]) -> Error {
    let msg = bad_args
        .iter()
        .map(|arg| format!("{}: `{}': not a valid identifier", builtin, arg))
        .collect::<Vec<String>>()
        .join("\n");
    Error::builtin_command(msg, 1)
}
