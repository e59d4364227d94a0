use crate::shell::builtins::{self, prelude::*};

pub struct Echo;

impl builtins::BuiltinCommand for Echo {
    const NAME: &'static str = builtins::ECHO_NAME;

    const HELP: &'static str = "\
echo: echo [-n] [arg ...]
    Write the arguments to standard output, separated by single spaces and
    followed by a newline. With -n the trailing newline is omitted.";

    fn run<T: AsRef<str>>(_shell: &mut Shell, args: &[T], stdout: &mut dyn Write) -> Result<()> {
        let (newline, args) = match args.split_first() {
            Some((first, rest)) if first.as_ref() == "-n" => (false, rest),
            _ => (true, args),
        };

        let line = args.iter().map(T::as_ref).collect::<Vec<_>>().join(" ");
        if newline {
            writeln!(stdout, "{}", line)?;
        } else {
            write!(stdout, "{}", line)?;
        }

        Ok(())
    }
}
