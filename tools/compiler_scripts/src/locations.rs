//! Repository locations derived from the generator's own position.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

/// File name of the external generator inside `tools/compiler_scripts`.
pub const DEFAULT_GENERATOR: &str = "generate_source_list.py";

/// Lexically normalize `path`: drop `.`, fold `name/..`, and drop `..` that
/// would climb above the root.  Leading `..` on a relative path is kept.
/// The filesystem is never consulted, so symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// The symbolic directories the source lists are expressed against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    pub root: PathBuf,
    pub compiler_scripts: PathBuf,
    pub editor: PathBuf,
}

impl Locations {
    /// Derive locations from a file sitting at
    /// `<root>/tools/compiler_scripts/<file>`: the root is three levels up.
    pub fn from_anchor(anchor: &Path) -> Self {
        Self::from_root(&anchor.join("..").join("..").join(".."))
    }

    pub fn from_root(root: &Path) -> Self {
        let root = normalize(root);
        let compiler_scripts = normalize(&root.join("tools").join("compiler_scripts"));
        let editor = normalize(&root.join("editor"));
        Self {
            root,
            compiler_scripts,
            editor,
        }
    }

    /// Look up a location by its placeholder name.
    pub fn get(&self, name: &str) -> Option<&Path> {
        match name {
            "root" => Some(&self.root),
            "compiler_scripts" => Some(&self.compiler_scripts),
            "editor" => Some(&self.editor),
            _ => None,
        }
    }

    /// Path of the generator script `file_name` inside `compiler_scripts`.
    pub fn generator_script(&self, file_name: &str) -> PathBuf {
        self.compiler_scripts.join(file_name)
    }

    /// Replace every `{name}` in `template` with the matching location.
    ///
    /// Unknown names and unterminated braces are errors, so a resolved
    /// string never carries a placeholder into a command line.
    pub fn interpolate(&self, template: &str) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                bail!("unterminated placeholder in `{template}`");
            };
            let key = &after[..end];
            let Some(location) = self.get(key) else {
                bail!(
                    "unknown location `{{{key}}}` in `{template}` \
                     (expected one of {{root}}, {{compiler_scripts}}, {{editor}})"
                );
            };
            out.push_str(&location.to_string_lossy());
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
