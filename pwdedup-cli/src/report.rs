use crossterm::style::Stylize;
use pwdedup_core::DedupOutcome;
use std::path::Path;

/// Label/value lines for the end-of-run summary. Zero skip counters are left out.
pub fn summary_lines(outcome: &DedupOutcome) -> Vec<(&'static str, usize)> {
    let mut lines = vec![("Rows read", outcome.rows_read)];
    if outcome.skipped_empty_password > 0 {
        lines.push(("Skipped (empty password)", outcome.skipped_empty_password));
    }
    if outcome.skipped_missing_modify_time > 0 {
        lines.push(("Skipped (no modifyTime)", outcome.skipped_missing_modify_time));
    }
    lines.push(("Duplicates merged", outcome.duplicates));
    lines.push(("Rows kept", outcome.rows.len()));
    lines
}

pub fn print_summary(outcome: &DedupOutcome, output: Option<&Path>) {
    for (label, value) in summary_lines(outcome) {
        let value = value.to_string();
        let value = if label == "Duplicates merged" && outcome.duplicates > 0 {
            value.yellow()
        } else {
            value.white()
        };
        let label = format!("{:<26}", format!("{label}:"));
        println!("{} {}", label.bold(), value);
    }

    match output {
        Some(path) => println!("{} {}", "Wrote".green().bold(), path.display()),
        None => println!("{}", "Dry run: nothing written".cyan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwdedup_core::Row;

    #[test]
    fn test_summary_hides_zero_skips() {
        let outcome = DedupOutcome {
            rows: vec![Row::new()],
            duplicates: 2,
            rows_read: 3,
            ..Default::default()
        };
        assert_eq!(
            summary_lines(&outcome),
            vec![("Rows read", 3), ("Duplicates merged", 2), ("Rows kept", 1)]
        );
    }

    #[test]
    fn test_summary_lists_skips() {
        let outcome = DedupOutcome {
            rows_read: 4,
            skipped_empty_password: 1,
            skipped_missing_modify_time: 3,
            ..Default::default()
        };
        let labels: Vec<_> = summary_lines(&outcome).into_iter().map(|(l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Rows read",
                "Skipped (empty password)",
                "Skipped (no modifyTime)",
                "Duplicates merged",
                "Rows kept"
            ]
        );
    }
}
