use anyhow::{Context, Result};
use pwdedup_core::DedupConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optional config file:
///
/// ```toml
/// [options]
/// normalize_url = true
/// lowercase_usernames = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub options: DedupConfig,
}

pub fn load_config(path: &Path) -> Result<FileConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

fn parse_config(s: &str) -> Result<FileConfig> {
    Ok(toml::from_str(s)?)
}
