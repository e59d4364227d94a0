use crate::errors::Error;

pub mod builtins;
pub mod execute_command;
pub mod job_control;
pub mod shell;

pub use self::shell::Shell;

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Determines if new command entries will be added to the shell's command history.
    ///
    /// Note: This is checked before the other command history config fields.
    enable_command_history: bool,

    /// Number of entries to store in the shell's command history
    command_history_capacity: usize,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,

    /// Ignore SIGINT and SIGQUIT in the shell process so they only reach
    /// foreground programs.
    ignore_interrupts: bool,
}

impl ShellConfig {
    /// Creates an interactive shell, e.g. command history, interrupt handling
    ///
    /// # Complete List
    /// - Command History is enabled and saved on exit
    /// - Ctrl-C and Ctrl-\ are ignored by the shell itself
    /// - Some additional messages are displayed
    pub fn interactive(command_history_capacity: usize) -> Self {
        Self {
            enable_command_history: true,
            command_history_capacity,
            display_messages: true,
            ignore_interrupts: true,
        }
    }

    /// Creates a noninteractive shell, e.g. for `-c` and script files
    ///
    /// # Complete List
    /// - Command History is disabled. Commands are neither recorded nor saved.
    /// - Signals keep their default disposition.
    /// - Fewer messages are displayed
    pub fn noninteractive() -> Self {
        Default::default()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            enable_command_history: false,
            command_history_capacity: 0,
            display_messages: false,
            ignore_interrupts: false,
        }
    }
}

/// Prints an error and everything it was chained over to stderr.
pub fn display_error(error: &Error) {
    let mut message = format!("simsh: {}", error);
    for cause in error.iter().skip(1) {
        message.push_str(&format!(": {}", cause));
    }
    eprintln!("{}", message);
}
