//! Rendering contract for console diagnostics and its terminal implementation.
//!
//! Diagnostics (evaluation errors, warnings, startup failures) go to stderr
//! so the console's standard output carries only what the user printed.

use crossterm::style::{Color, Stylize};

const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";

/// Injectable rendering interface used by the REPL engine.
///
/// `Renderer` is the default terminal implementation; tests substitute a
/// recording sink.
pub trait RenderSink: Send + Sync {
    /// Render a warning line.
    fn warn(&self, msg: &str);
    /// Render an error line.
    fn error(&self, msg: &str);
}

/// Writes diagnostics to stderr, optionally colored.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn label(&self, label: &str, color: Color) -> String {
        if self.color {
            label.with(color).bold().to_string()
        } else {
            label.to_string()
        }
    }
}

impl RenderSink for Renderer {
    fn warn(&self, msg: &str) {
        eprintln!("{} {msg}", self.label(LABEL_WARNING, Color::Yellow));
    }

    fn error(&self, msg: &str) {
        eprintln!("{} {msg}", self.label(LABEL_ERROR, Color::Red));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_carry_no_escape_codes() {
        let renderer = Renderer::new(false);
        assert_eq!(renderer.label(LABEL_ERROR, Color::Red), "error:");
    }

    #[test]
    fn colored_labels_are_styled() {
        let renderer = Renderer::new(true);
        let label = renderer.label(LABEL_ERROR, Color::Red);
        assert!(label.contains("error:"), "got {label:?}");
    }
}
