//! Simsh - Shell Module
//!
//! The Shell owns the background job table and the line editor, and runs one
//! command line at a time. Finished background jobs are reported after every
//! line.

use std::env;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{self, ExitStatus};

use crate::core::{
    parser::{self, ast, lexer},
    variable_expansion,
};
use crate::editor::Editor;
use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::shell::{
    builtins,
    display_error,
    execute_command::{self, Redirections},
    job_control::{JobManager, Listing},
    ShellConfig,
};
use crate::util::{unix, ShellExitStatusExt};

const HISTORY_FILE_NAME: &str = ".simsh_history";
const SYNTAX_ERROR_EXIT_STATUS: i32 = 2;
const COMMAND_NOT_FOUND_EXIT_STATUS: i32 = 127;

/// Simsh Shell
pub struct Shell {
    /// Responsible for readline and history.
    editor: Editor,
    history_file: Option<PathBuf>,
    job_manager: JobManager,
    /// Exit status of last command executed.
    last_exit_status: ExitStatus,
    config: ShellConfig,
}

impl Shell {
    /// Constructs a new Shell to manage running jobs and command history.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let mut shell = Self {
            editor: Editor::with_capacity(config.command_history_capacity),
            history_file: None,
            job_manager: JobManager::default(),
            last_exit_status: ExitStatus::from_success(),
            config,
        };

        if config.ignore_interrupts {
            unix::ignore_interactive_signals()?;
        }

        if config.enable_command_history {
            shell.load_history()?;
        }

        info!("simsh started up");
        Ok(shell)
    }

    fn load_history(&mut self) -> Result<()> {
        self.history_file = dirs::home_dir().map(|p| p.join(HISTORY_FILE_NAME));
        match self.history_file {
            Some(ref history_file) => self.editor.load_history(history_file)?,
            None => warn!("unable to get home directory"),
        }

        Ok(())
    }

    /// Custom prompt to output to the user.
    /// Returns `None` when end of file is reached.
    pub fn prompt(&mut self) -> Result<Option<String>> {
        let cwd = env::current_dir()?;
        let prompt = format!(
            "{}|{}\n$ ",
            self.last_exit_status.shell_code(),
            display_dir(&cwd, dirs::home_dir().as_deref()).display()
        );
        self.editor.readline(&prompt)
    }

    /// Runs one command line and then reports finished background jobs.
    ///
    /// Blank lines and comments are skipped. Any failure, including a
    /// program that exits unsuccessfully, is returned after the exit status
    /// has been updated.
    pub fn execute_command_string(&mut self, input: &str) -> Result<()> {
        let input = lexer::strip_comment(input.trim());
        if input.is_empty() {
            return Ok(());
        }

        if self.config.enable_command_history {
            self.editor.add_history_entry(input);
        }

        let result = self.execute_line(input);
        self.last_exit_status = match result {
            Ok(()) => ExitStatus::from_success(),
            Err(ref e) => exit_status_for(e),
        };

        let reaped = self.job_manager.reap(&mut io::stdout());
        log_if_err!(reaped, "failed to report finished jobs");

        result
    }

    fn execute_line(&mut self, input: &str) -> Result<()> {
        let expanded = variable_expansion::expand_variables(input, |name| env::var(name).ok());
        let command = parser::parse(&expanded)?;
        let command = variable_expansion::expand_tilde(command, dirs::home_dir().as_deref());

        if builtins::is_builtin(command.program()) {
            self.execute_builtin(&command)
        } else {
            let stdout = io::stdout();
            let mut stdout = stdout.lock();
            execute_command::launch(&mut self.job_manager, &command, &mut stdout)?;
            stdout.flush()?;
            Ok(())
        }
    }

    /// Builtins run inside the shell; only output redirection reaches them.
    fn execute_builtin(&mut self, command: &ast::Command) -> Result<()> {
        if command.background {
            debug!("{} is a builtin; running it in the foreground", command.program());
        }

        let redirections = Redirections::open(command)?;
        let program = command.program();
        let args = &command.args[1..];
        match redirections.stdout {
            Some(mut file) => builtins::run(self, program, args, &mut file),
            None => {
                // Children write straight to fd 1, so nothing may stay buffered.
                let stdout = io::stdout();
                let mut stdout = stdout.lock();
                let result = builtins::run(self, program, args, &mut stdout);
                stdout.flush()?;
                result
            }
        }
    }

    /// Runs a simsh script from a file, reporting errors line by line.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .chain_err(|| format!("failed to read script `{}'", path.display()))?;

        for line in contents.lines() {
            if let Err(e) = self.execute_command_string(line) {
                display_error(&e);
            }
        }

        Ok(())
    }

    /// Runs jobs from stdin until EOF is received.
    pub fn execute_from_stdin(&mut self) {
        loop {
            let input = match self.prompt() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                e => {
                    log_if_err!(e, "prompt");
                    continue;
                }
            };

            if let Err(e) = self.execute_command_string(&input) {
                error!("execute_command_string: {}", e);
                display_error(&e);
            }
        }
    }

    pub fn job_manager(&self) -> &JobManager {
        &self.job_manager
    }

    /// The shell's background jobs.
    pub fn jobs(&self) -> Listing<'_> {
        self.job_manager.list()
    }

    pub fn last_exit_status(&self) -> ExitStatus {
        self.last_exit_status
    }

    /// Exit the shell.
    ///
    /// Valid exit codes are between 0 and 255. Like bash and its descendents, it automatically
    /// converts exit codes to a u8 such that positive n becomes n % 256 and negative n becomes
    /// (256 + n) % 256.
    ///
    /// Exit the shell with a status of n. If n is None, then the exit status is that of the last
    /// command executed.
    pub fn exit(&mut self, n: Option<ExitStatus>) -> ! {
        if self.config.display_messages {
            println!("exit");
        }

        if self.job_manager.has_jobs() {
            warn!("exiting with {} background job(s) still running", self.job_manager.len());
        }

        let code = n.unwrap_or(self.last_exit_status).shell_code();
        let code_like_u8 = code.rem_euclid(256);

        if self.config.enable_command_history {
            if let Some(ref history_file) = self.history_file {
                if let Err(e) = self.editor.save_history(history_file) {
                    error!(
                        "error: failed to save history to file during shutdown: {}",
                        e
                    );
                }
            }
        }

        info!("simsh has shut down");
        process::exit(code_like_u8);
    }
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}\n{:?}", self.job_manager, self.editor)
    }
}

/// `cwd` relative to `~` when it is inside the home directory.
fn display_dir(cwd: &Path, home: Option<&Path>) -> PathBuf {
    match home.map(|home| cwd.strip_prefix(home)) {
        Some(Ok(rel)) if rel.as_os_str().is_empty() => PathBuf::from("~"),
        Some(Ok(rel)) => Path::new("~").join(rel),
        _ => cwd.to_path_buf(),
    }
}

/// The status a failed line leaves behind, as `$?` would report it.
fn exit_status_for(error: &Error) -> ExitStatus {
    let code = match *error.kind() {
        _ if error.is_syntax_error() => SYNTAX_ERROR_EXIT_STATUS,
        ErrorKind::Docopt(_) => SYNTAX_ERROR_EXIT_STATUS,
        ErrorKind::CommandNotFound(_) => COMMAND_NOT_FOUND_EXIT_STATUS,
        ErrorKind::CommandFailed(_, Some(status)) => status.shell_code(),
        ErrorKind::BuiltinCommand(_, code) => code,
        _ => 1,
    };

    ExitStatus::from_status(code.rem_euclid(256))
}
