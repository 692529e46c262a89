//! Where console lines come from: an interactive editor or a script.

use crate::error::ReplError;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// One read attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    /// Ctrl-C: drop the pending statement and keep going.
    Interrupted,
    Eof,
}

/// A supplier of console input.
pub trait LineSource {
    /// One-time setup run while the console initializes.
    fn prepare(&mut self) -> Result<(), ReplError> {
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReplError>;

    /// Record a completed statement.
    fn add_history(&mut self, _entry: &str) {}

    /// Persist history when the loop ends.
    fn finish(&mut self) -> Result<(), ReplError> {
        Ok(())
    }

    /// `name:line` of the last line read, for sources that have one.
    fn location(&self) -> Option<String> {
        None
    }
}

/// Interactive input through `rustyline`, with an optional history file.
pub struct EditorSource {
    editor: DefaultEditor,
    history_file: Option<PathBuf>,
}

impl EditorSource {
    pub fn new(history_file: Option<PathBuf>, history_size: usize) -> Result<Self, ReplError> {
        let config = EditorConfig::builder()
            .max_history_size(history_size)?
            .auto_add_history(false)
            .build();
        let editor = DefaultEditor::with_config(config)?;
        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl LineSource for EditorSource {
    fn prepare(&mut self) -> Result<(), ReplError> {
        let Some(path) = self.history_file.as_deref() else {
            return Ok(());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no history file yet");
            return Ok(());
        }
        // A corrupt history file is not worth refusing to start over.
        if let Err(e) = self.editor.load_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to load history");
        }
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<ReadLine, ReplError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadLine::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadLine::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadLine::Eof),
            Err(e) => Err(e.into()),
        }
    }

    fn add_history(&mut self, entry: &str) {
        if let Err(e) = self.editor.add_history_entry(entry) {
            tracing::debug!(error = %e, "history entry rejected");
        }
    }

    fn finish(&mut self) -> Result<(), ReplError> {
        let Some(path) = self.history_file.as_deref() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.editor.save_history(path)?;
        tracing::debug!(path = %path.display(), "history saved");
        Ok(())
    }
}

/// Lines from a script file or an in-memory list.
pub struct ScriptSource {
    name: String,
    lines: VecDeque<String>,
    line_no: usize,
}

impl ScriptSource {
    pub fn from_file(path: &Path) -> Result<Self, ReplError> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_lines(
            path.display().to_string(),
            text.lines().map(str::to_string),
        ))
    }

    pub fn from_lines<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
            line_no: 0,
        }
    }
}

impl LineSource for ScriptSource {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadLine, ReplError> {
        match self.lines.pop_front() {
            Some(line) => {
                self.line_no += 1;
                Ok(ReadLine::Line(line))
            }
            None => Ok(ReadLine::Eof),
        }
    }

    fn location(&self) -> Option<String> {
        Some(format!("{}:{}", self.name, self.line_no))
    }
}
