//! Pattern-based file discovery.
//!
//! Patterns use `glob` crate syntax matched against paths relative to the
//! discovery root, with `/` as a literal separator and `{a,b}` alternatives
//! expanded up front. An exclude pattern that matches a directory excludes
//! everything beneath it.

use crate::error::EngineError;
use async_trait::async_trait;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Finds files under a directory by pattern
#[async_trait]
pub trait Glob: Send + Sync {
    /// Files under `cwd` matching `pattern` and none of `exclude`, as
    /// `cwd`-joined paths in a deterministic order.
    async fn glob(
        &self,
        cwd: &Path,
        pattern: &str,
        exclude: &[String],
    ) -> Result<Vec<PathBuf>, EngineError>;
}

/// Compiled include/exclude patterns
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PatternSet {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, EngineError> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a `cwd`-relative path matches any include pattern.
    pub fn is_match(&self, relative: &Path) -> bool {
        let candidate = to_pattern_path(relative);
        self.include
            .iter()
            .any(|pattern| pattern.matches_with(&candidate, MATCH_OPTIONS))
    }

    /// Whether a `cwd`-relative path, or any of its ancestors, is excluded.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let mut prefix = PathBuf::new();
        for component in relative.components() {
            prefix.push(component);
            let candidate = to_pattern_path(&prefix);
            if self
                .exclude
                .iter()
                .any(|pattern| pattern.matches_with(&candidate, MATCH_OPTIONS))
            {
                return true;
            }
        }
        false
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, EngineError> {
    let mut compiled = Vec::new();
    for pattern in patterns {
        for expanded in expand_braces(pattern) {
            let parsed = Pattern::new(&expanded).map_err(|source| EngineError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            compiled.push(parsed);
        }
    }
    Ok(compiled)
}

fn to_pattern_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Expand `{a,b}` alternatives, including nested and repeated groups.
///
/// A group without a top-level comma, or without a closing brace, is literal.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0usize;
    let mut close = None;
    let mut commas = Vec::new();
    for (offset, ch) in pattern[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(open + offset),
            _ => {}
        }
    }

    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];

    if commas.is_empty() {
        // literal group; keep it and expand whatever follows
        return expand_braces(suffix)
            .into_iter()
            .map(|rest| format!("{}{}", &pattern[..=close], rest))
            .collect();
    }

    let mut bounds = vec![open];
    bounds.extend(commas);
    bounds.push(close);

    let mut expanded = Vec::new();
    for window in bounds.windows(2) {
        let alternative = &pattern[window[0] + 1..window[1]];
        expanded.extend(expand_braces(&format!("{}{}{}", prefix, alternative, suffix)));
    }
    expanded
}

/// Discovery on the host filesystem with `walkdir`
///
/// Siblings are visited in file-name order; excluded directories are pruned
/// rather than walked. Unreadable entries are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkdirGlob;

#[async_trait]
impl Glob for WalkdirGlob {
    async fn glob(
        &self,
        cwd: &Path,
        pattern: &str,
        exclude: &[String],
    ) -> Result<Vec<PathBuf>, EngineError> {
        let patterns = PatternSet::new(&[pattern.to_string()], exclude)?;
        let root = cwd.to_path_buf();

        tokio::task::spawn_blocking(move || walk(&root, &patterns))
            .await
            .map_err(|e| EngineError::io(cwd, std::io::Error::other(e)))
    }
}

fn walk(root: &Path, patterns: &PatternSet) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match entry.path().strip_prefix(root) {
            Ok(relative) => relative.as_os_str().is_empty() || !patterns.is_excluded(relative),
            Err(_) => true,
        });

    let mut paths = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("Skipping unreadable entry during discovery: {}", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(relative) = entry.path().strip_prefix(root) {
            if patterns.is_match(relative) {
                paths.push(entry.path().to_path_buf());
            }
        }
    }
    paths
}
