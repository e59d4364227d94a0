use std::fmt;

use nix::{libc, unistd::Pid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessId(u32);

impl From<u32> for ProcessId {
    fn from(value: u32) -> Self {
        ProcessId(value)
    }
}

impl From<ProcessId> for Pid {
    fn from(value: ProcessId) -> Self {
        Pid::from_raw(value.0 as libc::pid_t)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobStatus {
    Running,
    /// Only observed while the completion line is written; the job is
    /// removed from the table right after.
    Done,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Done => write!(f, "Done"),
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Running
    }
}

/// A program started in the background.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    id: JobId,
    pid: ProcessId,
    /// The program and its arguments, joined for display.
    command: String,
    status: JobStatus,
}

impl Job {
    pub fn new(id: JobId, pid: ProcessId, command: &str) -> Self {
        Self {
            id,
            pid,
            command: command.to_string(),
            status: JobStatus::default(),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn mark_done(&mut self) {
        self.status = JobStatus::Done;
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]  {}    {}", self.id, self.status, self.command)
    }
}
