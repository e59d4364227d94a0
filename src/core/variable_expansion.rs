use std::path::Path;

use regex::{Captures, Regex};

use crate::core::parser::ast::Command;

/// `\$` stays escaped for the lexer; `${NAME}` and `$NAME` are looked up.
const VARIABLE_PATTERN: &str = r"\\\$|\$\{([^}]*)\}|\$([A-Za-z0-9_]+)";

lazy_static! {
    static ref VARIABLE_RE: Regex = Regex::new(VARIABLE_PATTERN)
        .unwrap_or_else(|e| panic!("invalid variable pattern: {}", e));
}

/// Replaces `$NAME` and `${NAME}` in a command line.
///
/// Unset variables expand to nothing. A `$` that does not start a variable
/// name, an empty `${}`, and an escaped `\$` are left as written.
pub fn expand_variables<F>(line: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    VARIABLE_RE.replace_all(line, |caps: &Captures<'_>| {
        match caps.get(1).or_else(|| caps.get(2)) {
            Some(name) if !name.as_str().is_empty() => lookup(name.as_str()).unwrap_or_default(),
            _ => caps[0].to_string(),
        }
    })
    .into_owned()
}

/// Expands a leading `~` in every argument and redirect target.
pub fn expand_tilde(command: Command, home_dir: Option<&Path>) -> Command {
    let home_dir = match home_dir {
        Some(home_dir) => home_dir,
        None => return command,
    };
    let expand = |word: String| expand_tilde_word(word, home_dir);

    Command {
        args: command.args.into_iter().map(expand).collect(),
        input_file: command.input_file.map(expand),
        output_file: command.output_file.map(expand),
        error_file: command.error_file.map(expand),
        ..command
    }
}

fn expand_tilde_word(word: String, home_dir: &Path) -> String {
    if word == "~" {
        home_dir.to_string_lossy().into_owned()
    } else if let Some(rest) = word.strip_prefix("~/") {
        home_dir.join(rest).to_string_lossy().into_owned()
    } else {
        word
    }
}
