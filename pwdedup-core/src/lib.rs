//! pwdedup-core: account keys, recency rules and the dedup fold for
//! password-manager exports.

pub mod config;
pub mod dedup;
pub mod key;
pub mod row;
pub mod store;
pub mod timestamp;

pub use config::DedupConfig;
pub use dedup::{Decision, DedupOutcome, Deduplicator, process, try_process};
pub use key::{AccountKey, normalize_url};
pub use row::Row;
pub use store::{Offer, RecordStore};
pub use timestamp::{Timestamp, record_timestamp};
