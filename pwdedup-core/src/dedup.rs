//! Deduplicator: a single pass over the row stream, keeping the most
//! recent row per account key.
//!
//! Per row, in order:
//! - empty-password filter (`ignore_empty_passwords`)
//! - missing-modifyTime filter (`require_modify_time`)
//! - key derivation
//! - merge: a new key is inserted; a known key counts as a duplicate and
//!   the incoming row wins only when its timestamp is strictly greater
//!
//! Filtered rows never reach the store and are not counted as duplicates.
//! Equal or unparseable timestamps keep the row seen first.

use anyhow::Result;
use tracing::{debug, info};

use crate::config::DedupConfig;
use crate::key::AccountKey;
use crate::row::Row;
use crate::store::{Offer, RecordStore};
use crate::timestamp::record_timestamp;

/// What happened to one input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    SkippedEmptyPassword,
    SkippedMissingModifyTime,
    Inserted,
    Replaced,
    KeptExisting,
}

impl Decision {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Decision::Replaced | Decision::KeptExisting)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Decision::SkippedEmptyPassword | Decision::SkippedMissingModifyTime
        )
    }
}

/// Final result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupOutcome {
    /// Latest row per key, in first-seen key order.
    pub rows: Vec<Row>,
    /// Rows whose key was already stored, whichever of the two was kept.
    pub duplicates: usize,
    pub rows_read: usize,
    pub skipped_empty_password: usize,
    pub skipped_missing_modify_time: usize,
}

/// Accumulator for one invocation. Nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    config: DedupConfig,
    store: RecordStore,
    duplicates: usize,
    rows_read: usize,
    skipped_empty_password: usize,
    skipped_missing_modify_time: usize,
}

impl Deduplicator {
    pub fn new(config: DedupConfig) -> Self {
        Self {
            config,
            store: RecordStore::new(),
            duplicates: 0,
            rows_read: 0,
            skipped_empty_password: 0,
            skipped_missing_modify_time: 0,
        }
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn push(&mut self, row: Row) -> Decision {
        self.rows_read += 1;

        if self.config.ignore_empty_passwords && row.password().unwrap_or("").trim().is_empty() {
            self.skipped_empty_password += 1;
            debug!(row = self.rows_read, "skipping row with empty password");
            return Decision::SkippedEmptyPassword;
        }

        if self.config.require_modify_time && row.modify_time().unwrap_or("").is_empty() {
            self.skipped_missing_modify_time += 1;
            debug!(row = self.rows_read, "skipping row without modifyTime");
            return Decision::SkippedMissingModifyTime;
        }

        let key = AccountKey::for_row(&row, &self.config);
        let offered = self.store.offer(key.clone(), row, |incoming, stored| {
            record_timestamp(incoming).is_newer_than(&record_timestamp(stored))
        });

        match offered {
            Offer::Inserted => {
                debug!(row = self.rows_read, %key, "new account");
                Decision::Inserted
            }
            Offer::Replaced => {
                self.duplicates += 1;
                debug!(row = self.rows_read, %key, "duplicate is newer, replacing");
                Decision::Replaced
            }
            Offer::Kept => {
                self.duplicates += 1;
                debug!(row = self.rows_read, %key, "duplicate is not newer, keeping stored row");
                Decision::KeptExisting
            }
        }
    }

    pub fn finish(self) -> DedupOutcome {
        info!(
            rows_read = self.rows_read,
            kept = self.store.len(),
            duplicates = self.duplicates,
            skipped_empty_password = self.skipped_empty_password,
            skipped_missing_modify_time = self.skipped_missing_modify_time,
            "deduplication finished"
        );
        DedupOutcome {
            rows: self.store.into_rows(),
            duplicates: self.duplicates,
            rows_read: self.rows_read,
            skipped_empty_password: self.skipped_empty_password,
            skipped_missing_modify_time: self.skipped_missing_modify_time,
        }
    }
}

/// Fold a row stream into its deduplicated form.
pub fn process<I>(rows: I, config: &DedupConfig) -> DedupOutcome
where
    I: IntoIterator<Item = Row>,
{
    let mut dedup = Deduplicator::new(*config);
    for row in rows {
        dedup.push(row);
    }
    dedup.finish()
}

/// Like [`process`], over a fallible stream. The first error aborts the run.
pub fn try_process<I>(rows: I, config: &DedupConfig) -> Result<DedupOutcome>
where
    I: IntoIterator<Item = Result<Row>>,
{
    let mut dedup = Deduplicator::new(*config);
    for row in rows {
        dedup.push(row?);
    }
    Ok(dedup.finish())
}
