use crate::shell::builtins::{self, prelude::*};

/// Moves the cursor home and erases the screen.
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

pub struct Clear;

impl builtins::BuiltinCommand for Clear {
    const NAME: &'static str = builtins::CLEAR_NAME;

    const HELP: &'static str = "\
clear: clear
    Clear the terminal screen. Arguments are ignored.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, _args: &[T], stdout: &mut dyn Write) -> Result<()> {
        write!(stdout, "{}", CLEAR_SCREEN)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::shell::ShellConfig;

    #[test]
    fn writes_clear_sequence() {
        let mut shell = Shell::new(ShellConfig::noninteractive()).unwrap();
        let mut stdout: Vec<u8> = Vec::new();
        Clear::run(&mut shell, &["ignored"], &mut stdout).unwrap();
        assert_eq!(stdout, b"\x1b[H\x1b[2J");
    }

    #[test]
    fn is_a_builtin() {
        assert!(builtins::is_builtin("clear"));
    }
}
