//! Portal: an interactive console for administering a Sling server.
//!
//! The console starts with two handles already bound: `$s`, a session with
//! the configured server, and `$um`, a user manager built from that session.
//! Startup is silent, results are not echoed, and the prompt is `>> `.
//!
//! # Embedding
//!
//! ```no_run
//! use portal::config::Config;
//! use portal::console::{self, ConsoleIo};
//! use portal::repl::{Output, PromptMode, ScriptSource};
//! use portal::ui::Renderer;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let config = Config::default();
//! let mut script = ScriptSource::from_lines("setup", ["$um.create_user 'alice'", "exit"]);
//! let io = ConsoleIo {
//!     source: &mut script,
//!     output: Output::stdout(),
//!     renderer: Arc::new(Renderer::new(false)),
//! };
//! let result = console::run(&config, PromptMode::Simple, io).await;
//! std::process::exit(console::exit_code(&result));
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod console;
pub mod error;
pub mod eval;
pub mod globals;
pub mod logging;
pub mod repl;
pub mod sling;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
