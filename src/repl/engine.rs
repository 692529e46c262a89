//! The read-eval loop.

use crate::build_info;
use crate::error::{EvalError, ReplError, StartupError};
use crate::eval::{Environment, EvalOutcome, Interpreter};
use crate::ui::RenderSink;
use std::io::Write;
use std::sync::Arc;

use super::input::{LineSource, ReadLine};
use super::options::ReplOptions;
use super::output::Output;
use super::prompt::{prompt_text, PromptMode};

/// Why [`Repl::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit` or `quit` was evaluated.
    Exit,
    /// The source ran out of lines (Ctrl-D, end of script).
    EndOfInput,
}

/// The engine state handed to the startup hook once setup is done.
#[derive(Clone)]
pub struct ReplContext {
    pub app_name: String,
    pub prompt_mode: PromptMode,
    pub echo_results: bool,
    /// Bound globals, sigil included.
    pub globals: Vec<String>,
    output: Output,
}

impl ReplContext {
    /// The console's standard output.
    pub fn output(&self) -> Output {
        self.output.clone()
    }
}

/// Runs once at the end of initialization; an `Err` aborts startup.
pub type StartupHook = Box<dyn FnOnce(&ReplContext) -> Result<(), String> + Send>;

/// Pieces the engine is built from.
pub struct ReplParts<E> {
    pub options: ReplOptions,
    pub requested_prompt: PromptMode,
    pub interpreter: Interpreter<E>,
    pub output: Output,
    pub renderer: Arc<dyn RenderSink>,
}

pub struct Repl<E> {
    options: ReplOptions,
    prompt_mode: PromptMode,
    interpreter: Interpreter<E>,
    output: Output,
    renderer: Arc<dyn RenderSink>,
}

impl<E: Environment> Repl<E> {
    /// One-time setup: banner, globals list and input preparation, then `hook`.
    ///
    /// With `suppress_startup_output` the setup runs silenced and output is
    /// restored however it ends. The hook runs afterwards, unsilenced.
    pub fn initialize(
        parts: ReplParts<E>,
        source: &mut dyn LineSource,
        hook: Option<StartupHook>,
    ) -> Result<Self, StartupError> {
        let ReplParts {
            options,
            requested_prompt,
            interpreter,
            output,
            renderer,
        } = parts;

        let globals = interpreter.env().global_names();
        {
            let _quiet = options.suppress_startup_output.then(|| output.silence());
            let mut out = output.clone();
            write_banner(&mut out, &options.app_name, &globals)
                .map_err(|e| StartupError::Init(format!("writing banner: {e}")))?;
            source.prepare()?;
        }

        let repl = Self {
            prompt_mode: options.prompt_mode(requested_prompt),
            options,
            interpreter,
            output,
            renderer,
        };
        if let Some(hook) = hook {
            hook(&repl.context()).map_err(StartupError::Init)?;
        }
        tracing::debug!(
            app = %repl.options.app_name,
            prompt = %repl.prompt_mode,
            globals = ?globals,
            "console initialized"
        );
        Ok(repl)
    }

    pub fn context(&self) -> ReplContext {
        ReplContext {
            app_name: self.options.app_name.clone(),
            prompt_mode: self.prompt_mode,
            echo_results: self.options.echo_results,
            globals: self.interpreter.env().global_names(),
            output: self.output.clone(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.options.app_name
    }

    pub fn prompt_mode(&self) -> PromptMode {
        self.prompt_mode
    }

    /// Read and evaluate lines from `source` until `exit` or end of input.
    ///
    /// Statements left open at a line end are continued on the next line.
    /// Evaluation errors are rendered and the loop carries on.
    pub async fn run(&mut self, source: &mut dyn LineSource) -> Result<ExitReason, ReplError> {
        let mut pending = String::new();
        let mut line_no = 1;
        let reason = loop {
            let prompt = prompt_text(self.prompt_mode, &self.options.app_name, line_no, &pending);
            let line = match source.read_line(&prompt)? {
                ReadLine::Line(line) => line,
                ReadLine::Interrupted => {
                    pending.clear();
                    continue;
                }
                ReadLine::Eof => {
                    if !pending.is_empty() {
                        self.report(source, &EvalError::Incomplete);
                    }
                    break ExitReason::EndOfInput;
                }
            };
            line_no += 1;

            if !pending.is_empty() {
                pending.push('\n');
            }
            pending.push_str(&line);
            if Interpreter::<E>::needs_more_input(&pending) {
                continue;
            }

            let statement = std::mem::take(&mut pending);
            if statement.trim().is_empty() {
                continue;
            }
            source.add_history(&statement);
            if self.evaluate(source, &statement).await? {
                break ExitReason::Exit;
            }
        };

        if let Err(e) = source.finish() {
            self.renderer.warn(&format!("could not save history: {e}"));
        }
        tracing::debug!(reason = ?reason, "console loop finished");
        Ok(reason)
    }

    /// Evaluate one statement; `true` means leave the loop.
    async fn evaluate(
        &mut self,
        source: &dyn LineSource,
        statement: &str,
    ) -> Result<bool, ReplError> {
        let mut out = self.output.clone();
        match self.interpreter.eval(statement, &mut out).await {
            EvalOutcome::Value(value) => {
                if self.options.echo_results {
                    writeln!(out, "=> {}", value.inspect())?;
                }
                out.flush()?;
                Ok(false)
            }
            EvalOutcome::Error(e) => {
                out.flush()?;
                self.report(source, &e);
                Ok(false)
            }
            EvalOutcome::Exit => Ok(true),
        }
    }

    fn report(&self, source: &dyn LineSource, error: &EvalError) {
        match source.location() {
            Some(location) => self.renderer.error(&format!("{location}: {error}")),
            None => self.renderer.error(&error.to_string()),
        }
    }
}

fn write_banner(out: &mut Output, app_name: &str, globals: &[String]) -> std::io::Result<()> {
    writeln!(out, "{}", build_info::banner_line(app_name))?;
    if !globals.is_empty() {
        writeln!(out, "globals: {}", globals.join(", "))?;
    }
    writeln!(out, "type `help` for commands, `exit` to leave")?;
    out.flush()
}
