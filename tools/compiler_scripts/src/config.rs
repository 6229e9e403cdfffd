//! Configuration types for `source_lists.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::locations::{DEFAULT_GENERATOR, Locations};
use crate::runner::Invocation;

/// Built-in source lists, shipped next to this crate's manifest.
const BUILTIN_SOURCE_LISTS: &str = include_str!("../source_lists.toml");

/// Root configuration.
#[derive(Debug, Deserialize)]
pub struct SourceListsConfig {
    /// Program used to run the generator script.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Generator file name, looked up in `tools/compiler_scripts`.
    #[serde(default = "default_generator")]
    pub generator: String,
    /// Source lists to regenerate, in order.
    #[serde(default)]
    pub source_list: Vec<SourceListConfig>,
}

fn default_interpreter() -> String {
    "python".to_string()
}

fn default_generator() -> String {
    DEFAULT_GENERATOR.to_string()
}

/// One `[[source_list]]` entry, before placeholder interpolation.
#[derive(Debug, Deserialize)]
pub struct SourceListConfig {
    /// Target name handed to the generator (e.g. `plugin_engine_java`).
    pub name: String,
    /// Output file; may contain `{editor}`-style placeholders.
    pub output: String,
    /// Source directory to scan, relative to the editor directory.
    pub path: String,
}

/// A fully resolved request to generate one source list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub name: String,
    pub output: String,
    pub path: String,
}

impl InvocationSpec {
    /// The command line running `generator_script` for this spec:
    /// `<interpreter> <generator_script> <name> <output> <path>`.
    pub fn invocation(&self, interpreter: &str, generator_script: &Path) -> Invocation {
        Invocation {
            program: interpreter.to_string(),
            args: vec![
                generator_script.to_string_lossy().into_owned(),
                self.name.clone(),
                self.output.clone(),
                self.path.clone(),
            ],
        }
    }
}

impl SourceListsConfig {
    /// The source lists shipped with this crate.
    pub fn builtin() -> Result<Self> {
        parse(BUILTIN_SOURCE_LISTS).context("parsing built-in source_lists.toml")
    }

    /// Interpolate every entry against `locations`.
    ///
    /// All entries are resolved before returning so that a bad entry fails
    /// the whole run before any generator is started.
    pub fn resolve(&self, locations: &Locations) -> Result<Vec<InvocationSpec>> {
        if self.source_list.is_empty() {
            bail!("no [[source_list]] entries configured");
        }
        self.source_list
            .iter()
            .map(|entry| {
                let output = locations
                    .interpolate(&entry.output)
                    .with_context(|| format!("resolving output of `{}`", entry.name))?;
                let path = locations
                    .interpolate(&entry.path)
                    .with_context(|| format!("resolving path of `{}`", entry.name))?;
                Ok(InvocationSpec {
                    name: entry.name.clone(),
                    output,
                    path,
                })
            })
            .collect()
    }

    /// Absolute path of the configured generator script.
    pub fn generator_script(&self, locations: &Locations) -> PathBuf {
        locations.generator_script(&self.generator)
    }
}

fn parse(content: &str) -> Result<SourceListsConfig> {
    Ok(toml::from_str(content)?)
}

/// Load and parse a `source_lists.toml` configuration file.
pub fn load_config(path: &Path) -> Result<SourceListsConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let config = parse(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
    Ok(config)
}
