use std::collections::HashMap;

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::constants::KEY_SEPARATOR;

lazy_static! {
    /// Matches `$$`, `${NAME}` (dots allowed inside braces) or `$NAME`
    static ref VARIABLE_PATTERN: Regex =
        Regex::new(r"\$\$|\$\{([A-Za-z0-9_.]+)\}|\$([A-Za-z0-9_]+)").unwrap();
}

/// Substitute `${VAR}` and `$VAR` references from `env`.
///
/// `$$` produces a literal `$`. References to names missing from `env` are
/// left verbatim. Substituted values are inserted as-is and never scanned
/// again, so a value containing `$` cannot trigger a second expansion.
pub fn expand(template: &str, env: &HashMap<String, String>) -> String {
    if !template.contains('$') {
        return template.to_string();
    }

    VARIABLE_PATTERN
        .replace_all(template, |caps: &Captures| {
            if &caps[0] == "$$" {
                return "$".to_string();
            }
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match env.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Ensure a non-empty target folder ends with exactly one key separator.
///
/// Empty input yields an empty prefix. Already-terminated input is returned
/// unchanged, which makes the function idempotent.
pub fn normalize_target_folder(folder: &str) -> String {
    if folder.is_empty() || folder.ends_with(KEY_SEPARATOR) {
        folder.to_string()
    } else {
        format!("{}{}", folder, KEY_SEPARATOR)
    }
}

/// Build the expansion environment from the process environment plus overrides.
///
/// Overrides win over process variables with the same name.
pub fn build_environment(overrides: &[(String, String)]) -> HashMap<String, String> {
    let mut env: HashMap<String, String> = std::env::vars().collect();
    for (key, value) in overrides {
        env.insert(key.clone(), value.clone());
    }
    env
}

/// Parse a `KEY=VALUE` pair as given on the command line
pub fn parse_key_value(pair: &str) -> Result<(String, String)> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected KEY=VALUE, got '{}'", pair))?;

    if key.trim().is_empty() {
        return Err(anyhow!("Empty variable name in '{}'", pair));
    }

    Ok((key.trim().to_string(), value.to_string()))
}
