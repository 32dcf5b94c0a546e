use anyhow::{Context, Result};
use regex::Regex;

use crate::constants::PATTERN_SEPARATORS;

/// A compiled list of Ant-style glob patterns.
///
/// Patterns are matched against paths relative to the start folder, using
/// `/` as separator:
///
/// - `*` matches any run of characters inside one path segment
/// - `?` matches exactly one character inside one path segment
/// - `**` as a whole segment matches zero or more directories
/// - a trailing `/` is shorthand for `/**`
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    sources: Vec<String>,
    patterns: Vec<Regex>,
    /// Directories whose whole subtree is matched (from `dir/**` patterns)
    subtrees: Vec<Regex>,
}

impl PatternSet {
    /// Compile a comma or semicolon separated pattern list.
    ///
    /// Blank entries are ignored, so an empty list compiles to an empty set.
    pub fn parse(list: &str) -> Result<Self> {
        let entries: Vec<&str> = list
            .split(PATTERN_SEPARATORS)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        Self::from_patterns(&entries)
    }

    /// Compile individual patterns
    pub fn from_patterns<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut set = PatternSet::default();
        for entry in entries {
            set.push(entry.as_ref())?;
        }
        Ok(set)
    }

    fn push(&mut self, raw: &str) -> Result<()> {
        let pattern = normalize_pattern(raw);
        let regex = Regex::new(&glob_to_regex(&pattern))
            .context(format!("Invalid file pattern '{}'", raw))?;

        if let Some(dir) = pattern.strip_suffix("/**") {
            let subtree = Regex::new(&glob_to_regex(dir))
                .context(format!("Invalid file pattern '{}'", raw))?;
            self.subtrees.push(subtree);
        }

        self.sources.push(pattern);
        self.patterns.push(regex);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Normalized pattern strings, in the order they were given
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Whether a start-relative file path matches any pattern
    pub fn matches(&self, relative_path: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(relative_path))
    }

    /// Whether everything below a start-relative directory is matched,
    /// so the walker can skip descending into it.
    pub fn matches_subtree(&self, relative_dir: &str) -> bool {
        self.subtrees.iter().any(|p| p.is_match(relative_dir))
    }
}

/// Unify separators and expand the trailing-slash shorthand
fn normalize_pattern(raw: &str) -> String {
    let mut pattern = raw.replace('\\', "/");

    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest.to_string();
    }
    let pattern = pattern.trim_start_matches('/');

    let expanded = if pattern.ends_with('/') {
        format!("{}**", pattern)
    } else {
        pattern.to_string()
    };

    // "**/**" matches exactly what "**" matches
    let mut segments: Vec<&str> = expanded.split('/').collect();
    segments.dedup_by(|a, b| *a == "**" && *b == "**");
    segments.join("/")
}

/// Translate one normalized glob into an anchored regular expression
fn glob_to_regex(pattern: &str) -> String {
    let segments: Vec<&str> = pattern.split('/').collect();
    let last = segments.len().saturating_sub(1);
    let mut regex = String::from("^");

    for (i, segment) in segments.iter().enumerate() {
        if *segment == "**" {
            if i == last {
                if regex.ends_with('/') {
                    // "dir/**" also matches "dir" itself
                    regex.pop();
                    regex.push_str("(?:/.*)?");
                } else {
                    regex.push_str(".*");
                }
            } else {
                regex.push_str("(?:[^/]*/)*");
            }
            continue;
        }

        regex.push_str(&segment_to_regex(segment));
        if i != last {
            regex.push('/');
        }
    }

    regex.push('$');
    regex
}

fn segment_to_regex(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() * 2);
    for c in segment.chars() {
        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out
}
