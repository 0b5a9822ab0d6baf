use anyhow::Result;
use pwdedup_core::{DedupConfig, Row, try_process};
use pwdedup_ingest::{RowReader, RowWriter, write_rows_to_path};
use std::path::PathBuf;

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("sample_export.csv")
}

fn all_options() -> DedupConfig {
    DedupConfig::default()
        .with_normalize_url(true)
        .with_lowercase_usernames(true)
        .with_ignore_empty_passwords(true)
        .with_require_modify_time(true)
}

fn passwords(rows: &[Row]) -> Vec<&str> {
    rows.iter().filter_map(|r| r.password()).collect()
}

#[test]
fn test_sample_without_options_keeps_everything() {
    let reader = RowReader::from_path(sample_path()).unwrap();
    assert_eq!(reader.headers().len(), 11);

    let out = try_process(reader, &DedupConfig::default()).unwrap();
    assert_eq!(out.rows_read, 8);
    assert_eq!(out.rows.len(), 8);
    assert_eq!(out.duplicates, 0);
}

#[test]
fn test_sample_with_all_options() {
    let reader = RowReader::from_path(sample_path()).unwrap();
    let out = try_process(reader, &all_options()).unwrap();

    assert_eq!(passwords(&out.rows), vec!["gh-new-pass", "bank-new", "forum-first"]);
    assert_eq!(out.duplicates, 3);
    assert_eq!(out.skipped_empty_password, 2);
    assert_eq!(out.skipped_missing_modify_time, 0);

    // replaced row carries its own extra columns
    assert_eq!(out.rows[0].get("vault"), Some("Personal"));
    assert!(out.rows[0].get("totp").unwrap().starts_with("otpauth://"));
}

#[test]
fn test_sample_require_modify_time_only() {
    let reader = RowReader::from_path(sample_path()).unwrap();
    let config = DedupConfig::default().with_require_modify_time(true);
    let out = try_process(reader, &config).unwrap();

    // the router row has an empty modifyTime
    assert_eq!(out.skipped_missing_modify_time, 1);
    assert_eq!(out.rows.len(), 7);
}

#[test]
fn test_written_output_dedups_to_itself() {
    let reader = RowReader::from_path(sample_path()).unwrap();
    let first = try_process(reader, &all_options()).unwrap();

    let mut writer = RowWriter::new(Vec::new());
    writer.write_all(&first.rows).unwrap();
    let bytes = writer.finish().unwrap();

    let text = String::from_utf8(bytes.clone()).unwrap();
    assert!(text.starts_with(
        "type,name,url,email,username,password,note,totp,createTime,modifyTime,vault\n"
    ));

    let reread = RowReader::from_reader(bytes.as_slice()).unwrap();
    let second = try_process(reread, &all_options()).unwrap();
    assert_eq!(second.rows, first.rows);
    assert_eq!(second.duplicates, 0);
}

#[test]
fn test_write_rows_to_path_replaces_file() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("pwdedup-ingest-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let out_path = dir.join("export (cleaned).csv");
    std::fs::write(&out_path, "stale contents\n")?;

    let rows = vec![Row::new().with("name", "A").with("url", "a.com")];
    let written = write_rows_to_path(&out_path, &rows)?;

    assert_eq!(written, 1);
    assert_eq!(std::fs::read_to_string(&out_path)?, "name,url\nA,a.com\n");
    assert!(!dir.join(".export (cleaned).csv.pwdedup-tmp").exists());

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let err = RowReader::from_path("/definitely/not/here.csv").err().unwrap();
    assert!(format!("{err:#}").contains("opening /definitely/not/here.csv"));
}
