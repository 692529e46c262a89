//! Generic read-eval-print engine.
//!
//! The engine knows nothing about Sling: it drives an [`Interpreter`] over
//! any [`Environment`](crate::eval::Environment) and is configured through
//! [`ReplOptions`].
//! - `output` owns the console's standard output and scoped silencing.
//! - `input` supplies lines from `rustyline` or a script.
//! - `prompt` renders the two prompt styles.
//! - `engine` runs initialization and the loop itself.
//!
//! [`Interpreter`]: crate::eval::Interpreter

mod engine;
mod input;
mod options;
mod output;
mod prompt;

pub use engine::{ExitReason, Repl, ReplContext, ReplParts, StartupHook};
pub use input::{EditorSource, LineSource, ReadLine, ScriptSource};
pub use options::ReplOptions;
pub use output::{Output, SharedBuffer, SilenceGuard};
pub use prompt::{nesting_depth, prompt_text, PromptMode};
