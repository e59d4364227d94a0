use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::core::job::{JobId, ProcessId};
use crate::core::parser::ast;
use crate::errors::{ErrorKind, Result, ResultExt, Stream};
use crate::shell::job_control::{JobManager, ProcessProbe};
use crate::util::unix;

/// Mode for files created by output redirection, before the umask applies.
const CREATE_MODE: u32 = 0o644;

/// Files opened for a command's redirections. A `None` stream is inherited
/// from the shell.
#[derive(Debug, Default)]
pub struct Redirections {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

impl Redirections {
    /// Opens every redirection target named by `command`.
    ///
    /// Input must already exist. Output is created and then truncated or
    /// appended to according to `command.append`; error output is always
    /// truncated.
    pub fn open(command: &ast::Command) -> Result<Self> {
        let stdin = match command.input_file {
            Some(ref path) => Some(open_input(path)?),
            None => None,
        };
        let stdout = match command.output_file {
            Some(ref path) => Some(open_output(path, command.append, Stream::Stdout)?),
            None => None,
        };
        let stderr = match command.error_file {
            Some(ref path) => Some(open_output(path, false, Stream::Stderr)?),
            None => None,
        };

        Ok(Self {
            stdin,
            stdout,
            stderr,
        })
    }
}

fn open_input(path: &str) -> Result<File> {
    File::open(path).chain_err(|| ErrorKind::RedirectFailed(path.to_string(), Stream::Stdin))
}

fn open_output(path: &str, append: bool, stream: Stream) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(CREATE_MODE);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }

    options
        .open(path)
        .chain_err(|| ErrorKind::RedirectFailed(path.to_string(), stream))
}

fn stdio(file: Option<File>) -> Stdio {
    file.map_or_else(Stdio::inherit, Stdio::from)
}

/// Finds the file `name` refers to, searching `PATH` unless `name` contains a `/`.
pub fn resolve_executable<S: AsRef<str>>(name: S) -> Option<PathBuf> {
    let name = name.as_ref();
    if name.is_empty() {
        return None;
    }

    which::which(name).ok()
}

/// Runs an external command.
///
/// A foreground command blocks until it exits and fails unless it exits
/// successfully. A background command is registered with `job_manager`,
/// announced on `stdout` as `[id] pid`, and its job id returned.
///
/// The redirection files are handed to the child; the shell's copies are
/// closed when this returns.
pub fn launch<P: ProcessProbe>(
    job_manager: &mut JobManager<P>,
    command: &ast::Command,
    stdout: &mut dyn Write,
) -> Result<Option<JobId>> {
    let program = command.program();
    let path = resolve_executable(program)
        .ok_or_else(|| ErrorKind::CommandNotFound(program.to_string()))?;
    let redirections = Redirections::open(command)?;

    let mut process = Command::new(&path);
    process
        .arg0(program)
        .args(&command.args[1..])
        .stdin(stdio(redirections.stdin))
        .stdout(stdio(redirections.stdout))
        .stderr(stdio(redirections.stderr));

    if command.background {
        // Background programs keep the shell's ignored interrupt signals,
        // so Ctrl-C at the prompt does not reach them.
        let child = process
            .spawn()
            .chain_err(|| ErrorKind::CommandFailed(program.to_string(), None))?;
        let pid = ProcessId::from(child.id());
        debug!("spawned {} ({}) in the background", path.display(), pid);

        let job_id = job_manager.register(pid, &command.argv());
        writeln!(stdout, "[{}] {}", job_id, pid)?;
        Ok(Some(job_id))
    } else {
        unsafe {
            process.pre_exec(unix::restore_interactive_signals);
        }

        debug!("running {} in the foreground", path.display());
        let status = process
            .status()
            .chain_err(|| ErrorKind::CommandFailed(program.to_string(), None))?;
        if !status.success() {
            bail!(ErrorKind::CommandFailed(program.to_string(), Some(status)));
        }

        Ok(None)
    }
}
