//! Engine configuration.

use crate::config::ConsoleConfig;

use super::prompt::PromptMode;

/// How the engine presents itself.
///
/// The defaults are the engine's own: a chatty `repl` that echoes results.
/// Consoles built on it override what they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOptions {
    /// Discard everything printed while the engine initializes.
    pub suppress_startup_output: bool,
    /// Print `=> <inspect>` after each evaluated line.
    pub echo_results: bool,
    pub app_name: String,
    /// Use the simple prompt whatever was requested.
    pub force_simple_prompt: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            suppress_startup_output: false,
            echo_results: true,
            app_name: "repl".to_string(),
            force_simple_prompt: false,
        }
    }
}

impl ReplOptions {
    /// Options for the portal console: silent start, no echo, simple prompt.
    pub fn portal() -> Self {
        Self {
            suppress_startup_output: true,
            echo_results: false,
            app_name: "portal".to_string(),
            force_simple_prompt: true,
        }
    }

    pub fn from_console(console: &ConsoleConfig) -> Self {
        Self {
            suppress_startup_output: console.suppress_startup_output,
            echo_results: console.echo_results,
            app_name: console.app_name.clone(),
            force_simple_prompt: console.force_simple_prompt,
        }
    }

    /// The prompt actually shown for a requested mode.
    pub fn prompt_mode(&self, requested: PromptMode) -> PromptMode {
        if self.force_simple_prompt {
            PromptMode::Simple
        } else {
            requested
        }
    }
}
