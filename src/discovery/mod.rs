//! File discovery below the start folder.
//!
//! Include and exclude lists are Ant-style globs evaluated against paths
//! relative to the start folder. Matched files carry their relative path so
//! the upload loop can build object keys without touching the filesystem
//! again.
//!
//! ```no_run
//! use artifact_uploader::discovery::FileMatcher;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let matcher = FileMatcher::new("**/*.jar, **/*.pom", "**/test-classes/", true)?;
//! for file in matcher.list(Path::new("target"))? {
//!     println!("{} -> {}", file.path.display(), file.relative);
//! }
//! # Ok(())
//! # }
//! ```

/// Glob pattern compilation
pub mod pattern;

/// Start-relative paths and object key construction
pub mod relative;

/// Directory walking and filtering
pub mod walker;

pub use pattern::PatternSet;
pub use relative::{destination_key, relative_path};
pub use walker::{FileMatcher, MatchedFile};
