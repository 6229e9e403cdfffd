//! generate-my-projects — regenerates the editor plugin source lists.
//!
//! Runs `tools/compiler_scripts/generate_source_list.py` once per configured
//! source list, in order, and stops at the first generator that fails.
//!
//! # Quick start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use generate_my_projects::{Options, config::SourceListsConfig, locations::Locations};
//! use generate_my_projects::runner::ProcessRunner;
//!
//! let opts = Options {
//!     locations: Locations::from_root(Path::new("/work/dart")),
//!     config: SourceListsConfig::builtin().unwrap(),
//!     interpreter: None,
//!     no_gyp: false,
//! };
//! let code = generate_my_projects::run(&opts, &ProcessRunner, &mut std::io::stdout()).unwrap();
//! std::process::exit(code);
//! ```

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub mod cli;
pub mod config;
pub mod locations;
pub mod runner;

use config::{InvocationSpec, SourceListsConfig};
use locations::Locations;
use runner::CommandRunner;

/// Printed when the legacy `--no-gyp` flag is passed.
pub const NO_GYP_NOTICE: &str = "--no-gyp is deprecated.";

/// Everything a run needs, resolved once at entry.
#[derive(Debug)]
pub struct Options {
    pub locations: Locations,
    pub config: SourceListsConfig,
    /// Overrides `config.interpreter` when set.
    pub interpreter: Option<String>,
    /// Legacy flag; only prints [`NO_GYP_NOTICE`].
    pub no_gyp: bool,
}

/// Run the full driver: resolve every source list, run the generator for
/// each in order, then print the `--no-gyp` notice if requested.
///
/// Returns the process exit code: `0` when every generator succeeded,
/// otherwise the first non-zero code.  The notice is only printed once all
/// generators have succeeded and never affects the returned code.
pub fn run<R, W>(opts: &Options, runner: &R, out: &mut W) -> Result<i32>
where
    R: CommandRunner + ?Sized,
    W: Write + ?Sized,
{
    let specs = opts.config.resolve(&opts.locations)?;
    let interpreter = opts
        .interpreter
        .as_deref()
        .unwrap_or(&opts.config.interpreter);
    let generator_script = opts.config.generator_script(&opts.locations);

    info!(
        root = %opts.locations.root.display(),
        source_lists = specs.len(),
        "loaded configuration"
    );

    let code = generate_source_lists(&specs, interpreter, &generator_script, runner)?;
    if code != 0 {
        return Ok(code);
    }

    if opts.no_gyp {
        writeln!(out, "{NO_GYP_NOTICE}").context("writing deprecation notice")?;
    }

    Ok(0)
}

/// Invoke `generator_script` for each spec in order, stopping at the first
/// non-zero exit code and returning it.  Outputs already written by earlier
/// specs are left in place.
pub fn generate_source_lists<R>(
    specs: &[InvocationSpec],
    interpreter: &str,
    generator_script: &Path,
    runner: &R,
) -> Result<i32>
where
    R: CommandRunner + ?Sized,
{
    for spec in specs {
        let invocation = spec.invocation(interpreter, generator_script);
        info!(name = %spec.name, output = %spec.output, "generating source list");
        let code = runner
            .run(&invocation)
            .with_context(|| format!("generating source list `{}`", spec.name))?;
        if code != 0 {
            warn!(name = %spec.name, code, "generator failed");
            return Ok(code);
        }
    }
    Ok(0)
}
