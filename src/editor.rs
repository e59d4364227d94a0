use std::fmt;
use std::io;
use std::path::Path;

use rustyline::{
    self,
    completion::{Completer, FilenameCompleter, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    CompletionType, Config, Helper,
};

use crate::errors::Result;

struct EditorHelper(FilenameCompleter);

impl Completer for EditorHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &rustyline::Context<'_>,
    ) -> ::std::result::Result<(usize, Vec<Pair>), ReadlineError> {
        self.0.complete(line, pos, ctx)
    }
}

impl Hinter for EditorHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<Self::Hint> {
        None
    }
}

impl Highlighter for EditorHelper {}

impl Helper for EditorHelper {}

impl Validator for EditorHelper {}

/// Line editor with file name completion and a bounded history.
pub struct Editor {
    internal: rustyline::Editor<EditorHelper>,
}

impl Editor {
    pub fn with_capacity(history_capacity: usize) -> Self {
        let config = Config::builder()
            .max_history_size(history_capacity)
            .history_ignore_space(true)
            .completion_type(CompletionType::Circular)
            .build();

        let mut internal = rustyline::Editor::with_config(config);
        internal.set_helper(Some(EditorHelper(FilenameCompleter::new())));

        Self { internal }
    }

    /// Reads one line. Returns `None` at end of input; an interrupted line
    /// reads as empty.
    pub fn readline(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.internal.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(e) => Err(e.into()),
        }
    }

    /// A missing history file is not an error.
    pub fn load_history<P: AsRef<Path> + ?Sized>(&mut self, path: &P) -> Result<()> {
        match self.internal.load_history(path) {
            Ok(()) => Ok(()),
            Err(ReadlineError::Io(ref inner)) if inner.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save_history<P: AsRef<Path> + ?Sized>(&mut self, path: &P) -> Result<()> {
        self.internal.save_history(path)?;
        Ok(())
    }

    pub fn add_history_entry(&mut self, line: &str) {
        self.internal.add_history_entry(line);
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "history: {} entries", self.internal.history().len())
    }
}
