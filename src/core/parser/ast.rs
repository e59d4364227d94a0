use crate::errors::{ErrorKind, Result};

const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";
const APPEND_REDIRECT: &str = ">>";
const ERROR_REDIRECT: &str = "2>";
const BACKGROUND: &str = "&";

// Recognised so they can be refused; simsh runs one program per line.
const PIPE: &str = "|";
const AND: &str = "&&";
const OR: &str = "||";

/// A single program invocation with its redirections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Command {
    /// The program followed by its arguments; never empty.
    pub args: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    /// Append to `output_file` instead of truncating it.
    pub append: bool,
    pub error_file: Option<String>,
    pub background: bool,
}

impl Command {
    /// Builds a command from words produced by the lexer.
    ///
    /// Redirection operators may appear anywhere and take the following word
    /// as their target. Repeating an operator for the same stream replaces
    /// the earlier target. `&` marks the command for the background wherever
    /// it appears. `|`, `&&` and `||` are syntax errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use simsh::core::parser::ast::Command;
    ///
    /// let command = Command::from_tokens(&["ls", "-l", ">>", "out.txt", "&"]).unwrap();
    /// assert_eq!(command.args, vec!["ls", "-l"]);
    /// assert_eq!(command.output_file, Some("out.txt".to_string()));
    /// assert!(command.append);
    /// assert!(command.background);
    /// ```
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let mut command = Command::default();
        let mut tokens = tokens.iter().map(S::as_ref);

        while let Some(token) = tokens.next() {
            match token {
                INPUT_REDIRECT => command.input_file = Some(target(token, tokens.next())?),
                OUTPUT_REDIRECT => {
                    command.output_file = Some(target(token, tokens.next())?);
                    command.append = false;
                }
                APPEND_REDIRECT => {
                    command.output_file = Some(target(token, tokens.next())?);
                    command.append = true;
                }
                ERROR_REDIRECT => command.error_file = Some(target(token, tokens.next())?),
                BACKGROUND => command.background = true,
                PIPE | AND | OR => bail!(ErrorKind::UnsupportedOperator(token.to_string())),
                word => command.args.push(word.to_string()),
            }
        }

        if command.args.is_empty() {
            bail!(ErrorKind::EmptyCommand);
        }

        Ok(command)
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    /// The program and its arguments joined by spaces, for display.
    pub fn argv(&self) -> String {
        self.args.join(" ")
    }
}

fn target(operator: &str, next: Option<&str>) -> Result<String> {
    next.map(str::to_string)
        .ok_or_else(|| ErrorKind::MissingRedirectTarget(operator.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cmd() {
        let command = Command::from_tokens(&["cmd"]).unwrap();
        assert_eq!(
            command,
            Command {
                args: vec!["cmd".to_string()],
                ..Default::default()
            }
        );
        assert_eq!(command.program(), "cmd");
    }

    #[test]
    fn single_cmd_with_args() {
        let command = Command::from_tokens(&["cmd", "var1", "var2", "var3"]).unwrap();
        assert_eq!(command.args, vec!["cmd", "var1", "var2", "var3"]);
        assert_eq!(command.argv(), "cmd var1 var2 var3");
    }

    #[test]
    fn append_and_background() {
        let command = Command::from_tokens(&["ls", "-l", ">>", "out.txt", "&"]).unwrap();
        assert_eq!(
            command,
            Command {
                args: vec!["ls".to_string(), "-l".to_string()],
                output_file: Some("out.txt".to_string()),
                append: true,
                background: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn input_and_error_redirects() {
        let command = Command::from_tokens(&["cat", "<", "in.txt", "2>", "err.txt"]).unwrap();
        assert_eq!(
            command,
            Command {
                args: vec!["cat".to_string()],
                input_file: Some("in.txt".to_string()),
                error_file: Some("err.txt".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn all_redirects_together() {
        let command =
            Command::from_tokens(&["sort", "<", "a", ">", "b", "2>", "c", "-r"]).unwrap();
        assert_eq!(command.args, vec!["sort", "-r"]);
        assert_eq!(command.input_file.as_deref(), Some("a"));
        assert_eq!(command.output_file.as_deref(), Some("b"));
        assert!(!command.append);
        assert_eq!(command.error_file.as_deref(), Some("c"));
    }

    #[test]
    fn last_redirect_wins() {
        let command = Command::from_tokens(&["cmd", ">>", "first", ">", "second"]).unwrap();
        assert_eq!(command.output_file.as_deref(), Some("second"));
        assert!(!command.append);

        let command = Command::from_tokens(&["cmd", "<", "a", "<", "b"]).unwrap();
        assert_eq!(command.input_file.as_deref(), Some("b"));
    }

    #[test]
    fn background_marker_anywhere() {
        let command = Command::from_tokens(&["sleep", "&", "5"]).unwrap();
        assert_eq!(command.args, vec!["sleep", "5"]);
        assert!(command.background);
    }

    #[test]
    fn operator_word_as_target() {
        let command = Command::from_tokens(&["cat", "<", ">"]).unwrap();
        assert_eq!(command.input_file.as_deref(), Some(">"));
    }

    #[test]
    fn empty_command() {
        for tokens in &[vec![], vec![">", "out.txt"], vec!["&"]] {
            match *Command::from_tokens(tokens.as_slice()).unwrap_err().kind() {
                ErrorKind::EmptyCommand => {}
                ref other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn unsupported_operators() {
        for operator in &["|", "&&", "||"] {
            let e = Command::from_tokens(&["echo", "hi", *operator, "wc", "-c"]).unwrap_err();
            assert!(e.is_syntax_error());
            match *e.kind() {
                ErrorKind::UnsupportedOperator(ref op) => assert_eq!(op, operator),
                ref other => panic!("unexpected error: {:?}", other),
            }
        }

        // Only whole words are operators.
        let command = Command::from_tokens(&["echo", "a|b", "x&&y"]).unwrap();
        assert_eq!(command.args, vec!["echo", "a|b", "x&&y"]);
    }

    #[test]
    fn missing_redirect_target() {
        for operator in &["<", ">", ">>", "2>"] {
            match *Command::from_tokens(&["cmd", *operator]).unwrap_err().kind() {
                ErrorKind::MissingRedirectTarget(ref op) => assert_eq!(op, operator),
                ref other => panic!("unexpected error: {:?}", other),
            }
        }

        match *Command::from_tokens(&["<"]).unwrap_err().kind() {
            ErrorKind::MissingRedirectTarget(_) => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
    }
}
