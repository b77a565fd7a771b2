//! Page discovery.
//!
//! The collection only sees [`PageSource`]; [`TomlPageSource`] is the
//! file-backed provider used by the CLI.

use super::Page;
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Provider of pages for a content root.
pub trait PageSource {
    /// Return every page under `root` whose file name matches one of `includes`.
    fn discover(&self, root: &Path, includes: &[String]) -> Result<Vec<Page>>;
}

/// Reads one TOML document per page file.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlPageSource;

impl PageSource for TomlPageSource {
    fn discover(&self, root: &Path, includes: &[String]) -> Result<Vec<Page>> {
        if root.parent().is_none() && root.has_root() {
            bail!("refusing to discover pages from the filesystem root `{}`", root.display());
        }

        let patterns = includes
            .iter()
            .map(|pattern| glob_to_regex(pattern))
            .collect::<Result<Vec<_>>>()?;

        collect_matching_files(root, &patterns)
            .iter()
            .map(|path| read_page(path))
            .collect()
    }
}

/// Deserialize a page file. A page without an `id` takes the file stem.
fn read_page(path: &Path) -> Result<Page> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let mut page: Page =
        toml::from_str(&content).with_context(|| format!("failed to parse `{}`", path.display()))?;

    if page.id.is_empty() {
        page.id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    Ok(page)
}

/// Collect matching files recursively, sorted by path for a stable order.
fn collect_matching_files(root: &Path, patterns: &[Regex]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name) && patterns.iter().any(|re| re.is_match(name))
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Compile a file-name glob (`*.toml`, `post-?.toml`) into an anchored regex.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => re.push_str("[^/]*"),
            '?' => re.push_str("[^/]"),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');

    Regex::new(&re).with_context(|| format!("invalid include pattern `{pattern}`"))
}
