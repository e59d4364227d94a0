#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;
use std::process::{self, ExitStatus};

use docopt::Docopt;
use nix::unistd::Pid;

use simsh::errors::*;
use simsh::{display_error, Shell, ShellConfig, ShellExitStatusExt};

const COMMAND_HISTORY_CAPACITY: usize = 100;
const LOG_FILE_NAME: &str = ".simsh_log";

const USAGE: &str = "
simsh.

Usage:
    simsh [options]
    simsh [options] -c <command>
    simsh [options] <file>
    simsh (-h | --help)
    simsh --version

Options:
    -h --help       Show this screen.
    --version       Show version.
    -c              If the -c option is present, then commands are read from the first non-option
                        argument command_string.
    --log=<path>    File to write log to, defaults to ~/.simsh_log
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    arg_file: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_log: Option<String>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logger(args.flag_log.as_deref()) {
        display_error(&e);
    }
    debug!("{:?}", args);

    if args.flag_version {
        println!("simsh version {}", env!("CARGO_PKG_VERSION"));
    } else if args.flag_c || args.arg_file.is_some() {
        execute_from_command_string_or_file(&args);
    } else {
        execute_from_stdin();
    }
}

fn init_logger(path: Option<&str>) -> Result<()> {
    let log_path = match path {
        Some(path) => PathBuf::from(path),
        None => default_log_path()?,
    };

    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(fern::log_file(&log_path).chain_err(|| {
            format!("failed to open log file `{}'", log_path.display())
        })?)
        .apply()?;

    Ok(())
}

fn default_log_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(LOG_FILE_NAME))
        .ok_or_else(|| "unable to get home directory for the log file".into())
}

fn execute_from_command_string_or_file(args: &Args) -> ! {
    let shell_config = ShellConfig::noninteractive();
    let mut shell = Shell::new(shell_config).unwrap_or_else(|e| display_error_and_exit(&e));

    let result = if let Some(ref command) = args.arg_command {
        shell.execute_command_string(command)
    } else if let Some(ref file_path) = args.arg_file {
        shell.execute_commands_from_file(file_path)
    } else {
        unreachable!();
    };

    match result {
        Ok(()) => shell.exit(None),
        Err(e) => {
            display_error(&e);
            if shell.last_exit_status().success() {
                shell.exit(Some(ExitStatus::from_failure()));
            }
            shell.exit(None)
        }
    }
}

fn execute_from_stdin() -> ! {
    let shell_config = ShellConfig::interactive(COMMAND_HISTORY_CAPACITY);
    let mut shell = Shell::new(shell_config).unwrap_or_else(|e| display_error_and_exit(&e));
    shell.execute_from_stdin();
    shell.exit(None)
}

fn display_error_and_exit(error: &Error) -> ! {
    error!("failed to create shell: {}", error);
    display_error(error);
    process::exit(ExitStatus::from_failure().shell_code());
}
