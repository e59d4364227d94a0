//! Background job table.
//!
//! Jobs are registered when a command is launched with `&` and removed by
//! [`JobManager::reap`] once their process has exited. There is no
//! exit-notification channel: every reap sweep asks a [`ProcessProbe`]
//! about each job in turn.

use std::fmt;
use std::io::Write;
use std::slice;

use crate::core::job::{Job, JobId, ProcessId};
use crate::errors::{ErrorKind, Result};
use crate::util::unix::SystemProbe;

/// What a probe learned about a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liveness {
    Alive,
    /// The process is gone; any OS bookkeeping for it has been reclaimed.
    Exited,
}

/// Non-blocking liveness check against a process id.
pub trait ProcessProbe {
    /// Must not block. An `Err` means the process could not be queried at
    /// all, which is different from learning that it exited.
    fn probe(&mut self, pid: ProcessId) -> Result<Liveness>;
}

pub struct JobManager<P = SystemProbe> {
    jobs: Vec<Job>,
    /// Ids handed out so far. Never reset, so ids are never reused.
    job_count: u32,
    probe: P,
}

impl Default for JobManager<SystemProbe> {
    fn default() -> Self {
        Self::with_probe(SystemProbe)
    }
}

impl<P: ProcessProbe> JobManager<P> {
    pub fn with_probe(probe: P) -> Self {
        Self {
            jobs: Vec::new(),
            job_count: 0,
            probe,
        }
    }

    /// Adds a running job and returns its freshly allocated id.
    pub fn register(&mut self, pid: ProcessId, command: &str) -> JobId {
        let job_id = self.get_next_job_id();
        self.jobs.push(Job::new(job_id, pid, command));
        debug!("registered job [{}] ({}) {}", job_id, pid, command);
        job_id
    }

    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Current jobs in registration order.
    pub fn list(&self) -> Listing<'_> {
        if self.is_empty() {
            Listing::Empty
        } else {
            Listing::Jobs(JobIter(self.jobs.iter()))
        }
    }

    pub fn get(&self, job_id: JobId) -> Result<&Job> {
        self.jobs
            .iter()
            .find(|job| job.id() == job_id)
            .ok_or_else(|| ErrorKind::JobNotFound(job_id).into())
    }

    /// Probes every job once, announcing and removing the ones that exited.
    ///
    /// A job whose probe fails stays in the table for a later sweep. If
    /// writing an announcement fails, the sweep still completes and the
    /// first write error is returned.
    pub fn reap(&mut self, stdout: &mut dyn Write) -> Result<()> {
        let probe = &mut self.probe;
        let mut notified = Ok(());

        self.jobs.retain_mut(|job| match probe.probe(job.pid()) {
            Ok(Liveness::Alive) => true,
            Ok(Liveness::Exited) => {
                job.mark_done();
                debug!("job [{}] ({}) is done", job.id(), job.pid());
                if notified.is_ok() {
                    notified = writeln!(stdout, "{}", job);
                }
                false
            }
            Err(e) => {
                warn!("failed to probe job [{}] ({}): {}", job.id(), job.pid(), e);
                true
            }
        });

        Ok(notified?)
    }

    fn get_next_job_id(&mut self) -> JobId {
        self.job_count += 1;
        JobId(self.job_count)
    }
}

impl<P> fmt::Debug for JobManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} jobs\tjob_count: {}", self.jobs.len(), self.job_count)?;
        for job in &self.jobs {
            writeln!(f, "{:?}", job)?;
        }

        Ok(())
    }
}

/// The result of [`JobManager::list`].
#[derive(Clone, Debug)]
pub enum Listing<'a> {
    /// The table holds no jobs.
    Empty,
    Jobs(JobIter<'a>),
}

impl<'a> fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Listing::Empty => write!(f, "No background jobs"),
            Listing::Jobs(ref jobs) => {
                for (i, job) in jobs.clone().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}", job)?;
                }
                Ok(())
            }
        }
    }
}

/// Iterates over jobs in registration order. Clone it to start over.
#[derive(Clone, Debug)]
pub struct JobIter<'a>(slice::Iter<'a, Job>);

impl<'a> Iterator for JobIter<'a> {
    type Item = &'a Job;

    fn next(&mut self) -> Option<&'a Job> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for JobIter<'a> {}
