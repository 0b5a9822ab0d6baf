//! pwdedup-ingest: CSV row stream in and out of the dedup core.

pub mod reader;
pub mod writer;

pub use reader::RowReader;
pub use writer::{RowWriter, header_for, write_rows_to_path};
