use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::constants::DEFAULT_EXCLUDES;
use crate::discovery::pattern::PatternSet;
use crate::discovery::relative::relative_path;

/// A regular file found below the start folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Location on disk
    pub path: PathBuf,
    /// Path below the start folder, `/` separated
    pub relative: String,
}

/// Lists files below a start folder that pass include/exclude patterns
#[derive(Debug, Clone)]
pub struct FileMatcher {
    includes: PatternSet,
    excludes: PatternSet,
}

impl FileMatcher {
    /// Create a matcher from already-expanded pattern lists.
    ///
    /// An empty include list matches every file. With `default_excludes`
    /// the built-in VCS and editor scratch patterns are added to `excludes`.
    pub fn new(includes: &str, excludes: &str, default_excludes: bool) -> Result<Self> {
        let includes = match PatternSet::parse(includes)? {
            set if set.is_empty() => PatternSet::from_patterns(&["**"])?,
            set => set,
        };

        let mut exclude_list: Vec<String> = PatternSet::parse(excludes)?.sources().to_vec();
        if default_excludes {
            exclude_list.extend(DEFAULT_EXCLUDES.iter().map(|p| p.to_string()));
        }
        let excludes = PatternSet::from_patterns(&exclude_list)?;

        Ok(FileMatcher { includes, excludes })
    }

    /// Walk `start` and return every matching regular file.
    ///
    /// Symbolic links to files are listed under the link's own path; links to
    /// directories are not descended into. Entries that cannot be read are
    /// logged and skipped; a missing start folder is an error.
    pub fn list(&self, start: &Path) -> Result<Vec<MatchedFile>> {
        if !start.exists() {
            return Err(anyhow!("Start folder does not exist: {}", start.display()));
        }
        if !start.is_dir() {
            return Err(anyhow!("Start folder is not a directory: {}", start.display()));
        }

        let mut results = Vec::new();
        let walker = WalkDir::new(start)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(start, entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry below {}: {}", start.display(), e);
                    continue;
                }
            };

            // Links to regular files are uploaded; links to directories are not walked
            let file_type = entry.file_type();
            if !(file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())) {
                continue;
            }

            let relative = relative_path(start, Some(entry.path()))?;
            if !self.includes.matches(&relative) {
                continue;
            }
            if self.excludes.matches(&relative) {
                debug!("Skipping excluded file: {}", relative);
                continue;
            }

            debug!("Matched file: {}", relative);
            results.push(MatchedFile {
                path: entry.into_path(),
                relative,
            });
        }

        Ok(results)
    }

    /// Directories whose whole subtree is excluded are not descended into
    fn is_pruned(&self, start: &Path, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        match relative_path(start, Some(entry.path())) {
            Ok(relative) => {
                let pruned = self.excludes.matches_subtree(&relative);
                if pruned {
                    debug!("Skipping excluded directory: {}", relative);
                }
                pruned
            }
            Err(_) => false,
        }
    }
}
