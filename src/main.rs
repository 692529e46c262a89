//! CLI entry point for portal.

mod app;
mod cli;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse_from(cli::with_forced_simple_prompt(std::env::args_os()));
    portal::logging::init_logging(!args.no_color);
    let code = app::entry::run(args).await;
    std::process::exit(code);
}
