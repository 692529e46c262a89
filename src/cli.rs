//! CLI argument parsing via clap.

use clap::Parser;
use portal::build_info::LONG_VERSION;
use portal::repl::PromptMode;
use std::ffi::OsString;
use std::path::PathBuf;

/// Flag the console always runs with, injected ahead of the user's arguments.
pub const SIMPLE_PROMPT_FLAG: &str = "--simple-prompt";

/// Interactive console for a Sling server, with `$s` and `$um` pre-bound.
#[derive(Debug, Parser)]
#[command(name = "portal", version, long_version = LONG_VERSION)]
pub struct Args {
    /// Script to evaluate instead of reading from the terminal.
    pub script: Option<PathBuf>,

    /// Path to config file (default: ./portal.toml or ~/.config/portal/portal.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Override the Sling server URL.
    #[arg(short = 's', long = "server")]
    pub server: Option<String>,

    /// Override the admin user name.
    #[arg(short = 'u', long = "user")]
    pub user: Option<String>,

    /// Read the admin password from the terminal.
    #[arg(long = "ask-password")]
    pub ask_password: bool,

    /// Prompt style: `default` or `simple`.
    #[arg(long = "prompt", value_name = "MODE")]
    pub prompt: Option<PromptMode>,

    /// Use the simple `>> ` prompt.
    #[arg(long = "simple-prompt", overrides_with = "simple_prompt")]
    pub simple_prompt: bool,

    /// Print `=> value` after each evaluated line.
    #[arg(long = "echo")]
    pub echo: bool,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// The prompt style asked for on the command line.
    pub fn requested_prompt(&self) -> PromptMode {
        if self.simple_prompt {
            PromptMode::Simple
        } else {
            self.prompt.unwrap_or_default()
        }
    }
}

/// `argv` with [`SIMPLE_PROMPT_FLAG`] inserted right after the program name.
pub fn with_forced_simple_prompt<I>(argv: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    let at = args.len().min(1);
    args.insert(at, OsString::from(SIMPLE_PROMPT_FLAG));
    args
}
