//! Input path cleanup and output path derivation.

use anyhow::{Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Tidy a path as typed or pasted: trim, drop one pair of matching quotes,
/// expand a leading `~/`.
pub fn normalize_input_path(raw: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    expand_home(strip_quotes(raw.trim()), home.as_deref())
}

fn strip_quotes(s: &str) -> &str {
    for q in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

fn expand_home(s: &str, home: Option<&Path>) -> PathBuf {
    match (s.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(s),
    }
}

/// Normalize and check the input path. Nothing is read on failure.
pub fn resolve_input(raw: &str) -> Result<PathBuf> {
    let path = normalize_input_path(raw);
    if !path.exists() {
        bail!("input file not found: {}", path.display());
    }
    if !path.is_file() {
        bail!("input is not a file: {}", path.display());
    }
    Ok(path)
}

/// `<dir>/<stem> (cleaned)<.ext>`, with `.csv` when the input has no extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_else(|| "export".as_ref()));
    name.push(" (cleaned)");
    match input.extension() {
        Some(ext) => {
            name.push(".");
            name.push(ext);
        }
        None => name.push(".csv"),
    }
    input.with_file_name(name)
}

pub fn output_path(input: &Path, explicit: Option<&Path>, overwrite: bool) -> Result<PathBuf> {
    match (explicit, overwrite) {
        (Some(_), true) => bail!("--output cannot be combined with overwrite"),
        (Some(path), false) => Ok(path.to_path_buf()),
        (None, true) => Ok(input.to_path_buf()),
        (None, false) => Ok(default_output_path(input)),
    }
}
