use std::io;

use nix::errno::Errno;
use nix::sys::signal::{self, SigHandler, Signal};
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::core::job::ProcessId;
use crate::errors::Result;
use crate::shell::job_control::{Liveness, ProcessProbe};

const INTERACTIVE_SIGNALS: [Signal; 2] = [Signal::SIGINT, Signal::SIGQUIT];

/// Probes the operating system's process table.
///
/// A child that has exited stays a zombie, and a zombie still answers a
/// signal 0 probe, so children are probed with a non-blocking `waitpid`
/// that reaps them in the same call. Processes that are not our children
/// fall back to `kill(pid, 0)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn probe(&mut self, pid: ProcessId) -> Result<Liveness> {
        let pid = Pid::from(pid);
        match wait::waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(WaitStatus::StillAlive) => Ok(Liveness::Alive),
            Ok(WaitStatus::Exited(pid, status_code)) => {
                debug!("{} exited with {}.", pid, status_code);
                Ok(Liveness::Exited)
            }
            Ok(WaitStatus::Signaled(pid, signal, ..)) => {
                debug!("{} terminated by signal {:?}.", pid, signal);
                Ok(Liveness::Exited)
            }
            Ok(status) => {
                debug!("{} changed state without exiting: {:?}", pid, status);
                Ok(Liveness::Alive)
            }
            Err(Errno::ECHILD) => is_alive(pid),
            Err(e) => Err(e.into()),
        }
    }
}

/// Sends signal 0 to `pid`, which checks for existence without delivering anything.
pub fn is_alive(pid: Pid) -> Result<Liveness> {
    match signal::kill(pid, None::<Signal>) {
        Ok(()) | Err(Errno::EPERM) => Ok(Liveness::Alive),
        Err(Errno::ESRCH) => Ok(Liveness::Exited),
        Err(e) => Err(e.into()),
    }
}

/// Keeps Ctrl-C and Ctrl-\ from killing the interactive shell itself.
pub fn ignore_interactive_signals() -> Result<()> {
    for &sig in &INTERACTIVE_SIGNALS {
        unsafe { signal::signal(sig, SigHandler::SigIgn) }?;
    }

    Ok(())
}

/// Runs in the forked child before `exec`; foreground programs get the
/// default disposition back so the terminal can interrupt them.
pub fn restore_interactive_signals() -> io::Result<()> {
    for &sig in &INTERACTIVE_SIGNALS {
        unsafe { signal::signal(sig, SigHandler::SigDfl) }.map_err(io::Error::from)?;
    }

    Ok(())
}
