//! Run configuration: five independent switches, resolved once per run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "snake_case")]
pub struct DedupConfig {
    /// Reduce the site part of the key to `scheme://host`.
    pub normalize_url: bool,
    /// Compare usernames case-insensitively.
    pub lowercase_usernames: bool,
    /// Drop rows whose password is empty after trimming.
    pub ignore_empty_passwords: bool,
    /// Drop rows without a `modifyTime` value.
    pub require_modify_time: bool,
    /// Write the result over the input file. Not read by the deduplicator.
    pub overwrite_output: bool,
}

impl DedupConfig {
    /// OR every switch with `other`. A switch set by any source stays set.
    pub fn merge(self, other: DedupConfig) -> Self {
        Self {
            normalize_url: self.normalize_url || other.normalize_url,
            lowercase_usernames: self.lowercase_usernames || other.lowercase_usernames,
            ignore_empty_passwords: self.ignore_empty_passwords || other.ignore_empty_passwords,
            require_modify_time: self.require_modify_time || other.require_modify_time,
            overwrite_output: self.overwrite_output || other.overwrite_output,
        }
    }

    pub fn with_normalize_url(mut self, on: bool) -> Self {
        self.normalize_url = on;
        self
    }

    pub fn with_lowercase_usernames(mut self, on: bool) -> Self {
        self.lowercase_usernames = on;
        self
    }

    pub fn with_ignore_empty_passwords(mut self, on: bool) -> Self {
        self.ignore_empty_passwords = on;
        self
    }

    pub fn with_require_modify_time(mut self, on: bool) -> Self {
        self.require_modify_time = on;
        self
    }

    pub fn with_overwrite_output(mut self, on: bool) -> Self {
        self.overwrite_output = on;
        self
    }
}
