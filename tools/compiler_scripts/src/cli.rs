//! Command-line surface of `generate-my-projects`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use crate::Options;
use crate::config::{self, SourceListsConfig};
use crate::locations::Locations;

/// Log filter used when `RUST_LOG` is unset: a clean run prints nothing.
pub const DEFAULT_LOG_FILTER: &str = "generate_my_projects=warn";

/// Long options that take a value, with the short alias if any.
const VALUE_OPTIONS: &[(&str, Option<&str>)] = &[
    ("--root", None),
    ("--config", Some("-c")),
    ("--interpreter", None),
];

/// Flags that take no value.
const FLAGS: &[&str] = &["--no-gyp", "-h", "--help", "-V", "--version"];

/// generate-my-projects — regenerate the editor plugin source lists.
#[derive(Parser, Debug)]
#[command(name = "generate-my-projects", version, about)]
pub struct Cli {
    /// Deprecated; has no effect besides printing a notice.
    #[arg(long)]
    pub no_gyp: bool,

    /// Repository root (defaults to three levels above this crate's manifest).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Source-list configuration file (defaults to the built-in lists).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Program used to run the generator script (overrides config).
    #[arg(long)]
    pub interpreter: Option<String>,
}

impl Cli {
    /// Parse `args` (program name first), dropping anything that is not one
    /// of the declared options.  Stray arguments never abort a run.
    pub fn parse_lenient<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(known_args(args))
    }

    /// Resolve locations and load the source lists.
    pub fn into_options(self) -> Result<Options> {
        let locations = match &self.root {
            Some(root) => Locations::from_root(root),
            None => {
                Locations::from_anchor(&Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"))
            }
        };
        let config = match &self.config {
            Some(path) => config::load_config(path)?,
            None => SourceListsConfig::builtin()?,
        };
        Ok(Options {
            locations,
            config,
            interpreter: self.interpreter,
            no_gyp: self.no_gyp,
        })
    }
}

/// Keep the program name and every declared option (with its value);
/// drop the rest.
fn known_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut kept: Vec<OsString> = args.next().into_iter().collect();
    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();
        if FLAGS.contains(&text.as_str()) {
            kept.push(arg);
            continue;
        }
        let takes_value = VALUE_OPTIONS
            .iter()
            .any(|(long, short)| text == *long || Some(text.as_str()) == *short);
        if takes_value {
            kept.push(arg);
            kept.extend(args.next());
            continue;
        }
        let inline_value = VALUE_OPTIONS
            .iter()
            .any(|(long, _)| text.starts_with(&format!("{long}=")));
        if inline_value {
            kept.push(arg);
            continue;
        }
        debug!(arg = %text, "ignoring unrecognized argument");
    }
    kept
}
