//! Global constants for the artifact uploader.
//!
//! This module centralizes hardcoded values so that defaults used by the
//! configuration layer, the discovery walker and the upload loop stay in one
//! place.

// Object storage constants
/// Content type attached to every uploaded object unless configured otherwise
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Signing region used when none is configured (S3-compatible servers accept it)
pub const DEFAULT_REGION: &str = "us-east-1";

/// Separator between object key segments
pub const KEY_SEPARATOR: char = '/';

// Discovery constants
/// Characters separating individual patterns inside an include/exclude list
pub const PATTERN_SEPARATORS: &[char] = &[',', ';'];

/// Upper bound on the number of parent hops when computing a relative path
pub const MAX_RELATIVE_DEPTH: usize = 4096;

/// Version-control and editor scratch files skipped when default excludes are on
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    "**/SCCS",
    "**/SCCS/**",
    "**/vssver.scc",
    "**/.svn",
    "**/.svn/**",
    "**/.DS_Store",
    "**/.git",
    "**/.git/**",
    "**/.gitattributes",
    "**/.gitignore",
    "**/.gitmodules",
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    "**/.hgsub",
    "**/.hgsubstate",
    "**/.hgtags",
    "**/.bzr",
    "**/.bzr/**",
    "**/.bzrignore",
    "**/_darcs",
    "**/_darcs/**",
];

// Process exit codes
/// Exit code when every matched file was uploaded
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for a fatal error that aborted the step
pub const EXIT_FATAL: i32 = 1;

/// Exit code when the run completed but at least one file failed to upload
pub const EXIT_DEGRADED: i32 = 2;
