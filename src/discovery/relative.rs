use std::path::Path;

use anyhow::{anyhow, bail, Result};

use crate::constants::{KEY_SEPARATOR, MAX_RELATIVE_DEPTH};

/// Path of `file` relative to `start`, joined with `/` and without a
/// leading separator.
///
/// Walks upward from the file through its parents until it reaches `start`.
/// `None` and `file == start` both yield an empty string. A file that is not
/// below `start` fails instead of walking forever.
pub fn relative_path(start: &Path, file: Option<&Path>) -> Result<String> {
    let Some(mut current) = file else {
        return Ok(String::new());
    };

    let mut trace: Vec<String> = Vec::new();
    while current != start {
        if trace.len() >= MAX_RELATIVE_DEPTH {
            bail!(
                "File {} is nested deeper than {} levels below start folder {}",
                file.map(|f| f.display().to_string()).unwrap_or_default(),
                MAX_RELATIVE_DEPTH,
                start.display()
            );
        }

        let outside = || {
            anyhow!(
                "File {} is outside start folder {}",
                file.map(|f| f.display().to_string()).unwrap_or_default(),
                start.display()
            )
        };

        let name = current.file_name().ok_or_else(outside)?;
        trace.push(name.to_string_lossy().into_owned());
        current = current.parent().ok_or_else(outside)?;
    }

    trace.reverse();
    Ok(trace.join("/"))
}

/// Object key for one file: the prefix followed by either the
/// start-relative path or the bare file name.
///
/// `prefix` is expected to be empty or already end with a separator.
pub fn destination_key(prefix: &str, relative: &str, preserve_structure: bool) -> String {
    let suffix = if preserve_structure {
        relative
    } else {
        relative
            .rsplit(KEY_SEPARATOR)
            .next()
            .unwrap_or(relative)
    };
    format!("{}{}", prefix, suffix)
}
