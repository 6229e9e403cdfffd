//! CLI entry point for generate-my-projects.
//!
//! ```sh
//! cargo run -p generate-my-projects
//! ```

use anyhow::Result;
use generate_my_projects::cli::{Cli, DEFAULT_LOG_FILTER};
use generate_my_projects::runner::ProcessRunner;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)
            }),
        )
        .init();

    let opts = Cli::parse_lenient(std::env::args_os()).into_options()?;
    let code = generate_my_projects::run(&opts, &ProcessRunner, &mut std::io::stdout())?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
