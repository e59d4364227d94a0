use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// Logs the error held by a `Result` without propagating it.
macro_rules! log_if_err {
    ($result:expr, $fmt:expr) => {
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), e);
        }
    };
    ($result:expr, $fmt:expr, $($arg:tt)+) => {
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), $($arg)+, e);
        }
    };
}

pub mod unix;

/// Shell Utility Extensions for `ExitStatus`
pub trait ShellExitStatusExt {
    /// Create an ExitStatus to indicate *successful* program execution.
    fn from_success() -> Self;

    /// Create an ExitStatus to indicate *unsuccessful* program execution.
    fn from_failure() -> Self;

    /// Create an ExitStatus from a status code
    fn from_status(code: i32) -> Self;

    /// The status code a shell reports for this status: the exit code, or
    /// 128 plus the signal number if the process was killed by a signal.
    fn shell_code(&self) -> i32;
}

impl ShellExitStatusExt for ExitStatus {
    /// # Examples
    /// ```rust
    /// use simsh::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(ExitStatus::from_success().success());
    /// ```
    fn from_success() -> Self {
        ExitStatus::from_status(0)
    }

    /// # Examples
    /// ```rust
    /// use simsh::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(!ExitStatus::from_failure().success());
    /// ```
    fn from_failure() -> Self {
        ExitStatus::from_status(1)
    }

    /// # Examples
    /// ```rust
    /// use simsh::ShellExitStatusExt;
    /// use std::process::ExitStatus;
    /// assert!(ExitStatus::from_status(0).success());
    /// assert!(!ExitStatus::from_status(1).success());
    /// ```
    fn from_status(code: i32) -> Self {
        ExitStatus::from_raw(code << 8)
    }

    fn shell_code(&self) -> i32 {
        self.code()
            .or_else(|| self.signal().map(|signal| 128 + signal))
            .unwrap_or(1)
    }
}
