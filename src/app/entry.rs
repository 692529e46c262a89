//! Application entry orchestration for the portal binary.

use crate::cli::Args;
use portal::config::{load_config, validate_config, Config};
use portal::console::{self, ConsoleIo};
use portal::error::{ConfigError, StartupError};
use portal::repl::{EditorSource, ExitReason, LineSource, Output, ScriptSource};
use portal::ui::{RenderSink, Renderer};
use std::sync::Arc;

/// Top-level entrypoint: settle configuration, then run the console.
pub(crate) async fn run(args: Args) -> i32 {
    let renderer = Renderer::new(!args.no_color);
    let result = run_console(&args, Arc::new(renderer)).await;
    match &result {
        Ok(reason) => tracing::debug!(?reason, "console finished"),
        Err(e) => renderer.error(&e.to_string()),
    }
    console::exit_code(&result)
}

async fn run_console(
    args: &Args,
    renderer: Arc<dyn RenderSink>,
) -> Result<ExitReason, StartupError> {
    let loaded = load_config(args.config.as_deref())?;
    tracing::info!(source = %loaded.source, "configuration loaded");
    let mut config = loaded.config;
    apply_cli_overrides(&mut config, args)?;
    validate_config(&config)?;

    let mut source: Box<dyn LineSource> = match &args.script {
        Some(path) => Box::new(ScriptSource::from_file(path)?),
        None => Box::new(EditorSource::new(
            config.console.history_file.clone(),
            config.console.history_size,
        )?),
    };

    console::run(
        &config,
        args.requested_prompt(),
        ConsoleIo {
            source: source.as_mut(),
            output: Output::stdout(),
            renderer,
        },
    )
    .await
}

/// Layer command-line flags over the loaded configuration.
fn apply_cli_overrides(config: &mut Config, args: &Args) -> Result<(), ConfigError> {
    if let Some(url) = &args.server {
        config.server.url = url.trim().to_string();
    }
    if let Some(user) = &args.user {
        config.server.admin_user = user.trim().to_string();
    }
    if args.ask_password {
        let prompt = format!("password for {}: ", config.server.admin_user);
        config.server.admin_password = rpassword::prompt_password(prompt)?;
    }
    if args.echo {
        config.console.echo_results = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_loaded_config() {
        let args = Args::parse_from([
            "portal",
            "--server",
            " http://sling:4502/ ",
            "-u",
            "root",
            "--echo",
        ]);
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &args).unwrap();
        assert_eq!(config.server.url, "http://sling:4502/");
        assert_eq!(config.server.admin_user, "root");
        assert!(config.console.echo_results);
        assert_eq!(config.server.admin_password, "admin");
    }

    #[test]
    fn blank_user_override_fails_validation() {
        let args = Args::parse_from(["portal", "--user", "  "]);
        let mut config = Config::default();
        apply_cli_overrides(&mut config, &args).unwrap();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn missing_script_is_a_startup_failure() {
        let args = Args::parse_from(["portal", "--no-color", "/nonexistent/script.portal"]);
        assert_eq!(run(args).await, 1);
    }
}
