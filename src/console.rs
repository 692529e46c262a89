//! The portal console: Sling globals bound into the REPL engine.
//!
//! [`run`] is the whole bootstrap once configuration is settled: bind `$s`
//! and `$um`, initialize the engine (silently, by default), evaluate the rc
//! file, then hand over to the read-eval loop.

use crate::config::{Config, ServerConfig};
use crate::error::{SlingError, StartupError};
use crate::eval::Interpreter;
use crate::globals::{Globals, SlingEnvironment};
use crate::repl::{
    ExitReason, LineSource, Output, PromptMode, Repl, ReplContext, ReplOptions, ReplParts,
    ScriptSource, StartupHook,
};
use crate::sling::{Session, UserManager};
use crate::ui::RenderSink;
use std::sync::Arc;

/// Process exit status for a clean finish.
pub const EXIT_OK: i32 = 0;
/// Process exit status for configuration or startup failures.
pub const EXIT_STARTUP_FAILURE: i32 = 1;

/// Build `$s` from the server settings, then `$um` from `$s`.
pub fn bind_globals(server: &ServerConfig) -> Result<Globals<Session, UserManager>, StartupError> {
    Globals::bind(
        || Session::connect(server),
        |session| Ok::<_, SlingError>(UserManager::new(session)),
    )
}

/// Where the console reads from and writes to.
pub struct ConsoleIo<'a> {
    pub source: &'a mut dyn LineSource,
    pub output: Output,
    pub renderer: Arc<dyn RenderSink>,
}

/// Bootstrap the console and run it until `exit` or end of input.
pub async fn run(
    config: &Config,
    requested_prompt: PromptMode,
    io: ConsoleIo<'_>,
) -> Result<ExitReason, StartupError> {
    let ConsoleIo {
        source,
        output,
        renderer,
    } = io;

    let globals = bind_globals(&config.server)?;
    let parts = ReplParts {
        options: ReplOptions::from_console(&config.console),
        requested_prompt,
        interpreter: Interpreter::new(SlingEnvironment::new(globals)),
        output,
        renderer: Arc::clone(&renderer),
    };
    let mut repl = Repl::initialize(parts, source, Some(ready_hook()))?;

    if let Some(rc_file) = config.console.rc_file.as_deref() {
        if rc_file.is_file() {
            tracing::debug!(path = %rc_file.display(), "evaluating rc file");
            let mut rc = ScriptSource::from_file(rc_file)?;
            if repl.run(&mut rc).await? == ExitReason::Exit {
                return Ok(ExitReason::Exit);
            }
        } else {
            tracing::debug!(path = %rc_file.display(), "rc file not found, skipping");
        }
    }

    Ok(repl.run(source).await?)
}

/// Exit status for a finished console run.
pub fn exit_code(result: &Result<ExitReason, StartupError>) -> i32 {
    match result {
        Ok(_) => EXIT_OK,
        Err(_) => EXIT_STARTUP_FAILURE,
    }
}

fn ready_hook() -> StartupHook {
    Box::new(|ctx: &ReplContext| {
        tracing::info!(
            app = %ctx.app_name,
            prompt = %ctx.prompt_mode,
            echo = ctx.echo_results,
            "console ready"
        );
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{FakeServer, TestTempDir};
    use crate::ui::Renderer;

    fn config_for(url: String) -> Config {
        let mut config = Config::default();
        config.server.url = url;
        config.server.timeout_secs = 5;
        config.console.history_file = None;
        config
    }

    #[tokio::test]
    async fn rc_file_runs_before_the_session_and_is_not_silenced() {
        let server = FakeServer::start(vec![]).await;
        let dir = TestTempDir::new("console-rc");
        let rc = dir.write_text("portalrc", "puts 'from rc'\nmissing_local\n");
        let mut config = config_for(server.url());
        config.console.rc_file = Some(rc);

        let (output, buffer) = Output::buffer();
        let mut script = ScriptSource::from_lines("session", ["puts $s.current_user.name"]);
        let result = run(
            &config,
            PromptMode::Default,
            ConsoleIo {
                source: &mut script,
                output,
                renderer: Arc::new(Renderer::new(false)),
            },
        )
        .await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert_eq!(buffer.contents(), "from rc\nadmin\n");
    }

    #[tokio::test]
    async fn exit_in_rc_file_ends_the_console() {
        let dir = TestTempDir::new("console-rc-exit");
        let rc = dir.write_text("portalrc", "exit\n");
        let mut config = config_for("http://127.0.0.1:9/".to_string());
        config.console.rc_file = Some(rc);

        let (output, buffer) = Output::buffer();
        let mut script = ScriptSource::from_lines("session", ["puts 'unreached'"]);
        let result = run(
            &config,
            PromptMode::Default,
            ConsoleIo {
                source: &mut script,
                output,
                renderer: Arc::new(Renderer::new(false)),
            },
        )
        .await;
        assert_eq!(exit_code(&result), EXIT_OK);
        assert_eq!(result.unwrap(), ExitReason::Exit);
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn binding_fails_on_unsupported_scheme() {
        let mut server = ServerConfig::default();
        server.url = "ftp://sling/".to_string();
        let err = bind_globals(&server).err().unwrap();
        assert!(err.to_string().contains("unsupported scheme"), "got {err}");
    }
}
