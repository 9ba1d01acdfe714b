//! Expense repository
//!
//! Durable ordered sequence of expense records in a delimited file whose first
//! line is always `Date,Category,Amount`. Adds append; deletes and clears
//! rewrite the whole file.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::ExpenseRecord;

use super::csv_io::{
    append_rows, is_missing_or_empty, read_rows, rewrite_atomic, RawRow, RowSet,
};

/// Header row of the expense store
pub const EXPENSE_HEADER: [&str; 3] = ["Date", "Category", "Amount"];

/// Repository for expense records
pub struct ExpenseRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ExpenseRepository {
    /// Create a new repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn acquire(&self) -> LedgerResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|e| LedgerError::Io(format!("Failed to acquire store lock: {}", e)))
    }

    /// Create the store with its header row if it is missing or empty
    pub fn ensure_initialized(&self) -> LedgerResult<()> {
        let _guard = self.acquire()?;

        if is_missing_or_empty(&self.path) {
            rewrite_atomic::<_, Vec<String>>(&self.path, &EXPENSE_HEADER, &[])?;
            log::debug!("Created expense store at {}", self.path.display());
        }
        Ok(())
    }

    /// Append one record to the end of the store
    pub fn append(&self, record: &ExpenseRecord) -> LedgerResult<()> {
        let _guard = self.acquire()?;

        append_rows(&self.path, &EXPENSE_HEADER, &[to_row(record)])?;
        log::debug!("Appended expense: {}", record);
        Ok(())
    }

    /// Read every data row, skipping the header
    ///
    /// Rows with an unparsable amount are returned unchanged so they can be
    /// displayed; aggregation is responsible for leaving them out.
    pub fn load_all(&self) -> LedgerResult<Vec<ExpenseRecord>> {
        let _guard = self.acquire()?;

        let set = read_rows(&self.path)?;
        Ok(set
            .rows
            .into_iter()
            .map(|row| from_row(&self.path, row))
            .collect())
    }

    /// Remove every record matching the triple and rewrite the store
    ///
    /// Duplicates of the same triple are all removed since records carry no
    /// identity. Returns the number removed; the file is left untouched when
    /// nothing matched.
    pub fn delete_matching(&self, date: &str, category: &str, amount: &str) -> LedgerResult<usize> {
        let _guard = self.acquire()?;

        let set = read_rows(&self.path)?;
        let skipped = set.skipped;
        let records: Vec<ExpenseRecord> = set
            .rows
            .into_iter()
            .map(|row| from_row(&self.path, row))
            .collect();

        let before = records.len();
        let survivors: Vec<Vec<String>> = records
            .iter()
            .filter(|r| !r.matches(date, category, amount))
            .map(to_row)
            .collect();
        let removed = before - survivors.len();

        if removed > 0 {
            rewrite_atomic(&self.path, &EXPENSE_HEADER, &survivors)?;
            warn_dropped(&self.path, skipped);
            log::debug!(
                "Deleted {} expense(s) matching {}, {}, {}",
                removed,
                date,
                category,
                amount
            );
        }

        Ok(removed)
    }

    /// Rewrite the store to the header row only; returns how many records
    /// were dropped
    pub fn clear_all(&self) -> LedgerResult<usize> {
        let _guard = self.acquire()?;

        let RowSet { rows, skipped } = read_rows(&self.path)?;
        let dropped = rows.len();
        rewrite_atomic::<_, Vec<String>>(&self.path, &EXPENSE_HEADER, &[])?;
        warn_dropped(&self.path, skipped);
        log::debug!("Cleared {} expense(s)", dropped);
        Ok(dropped)
    }
}

fn warn_dropped(path: &Path, skipped: usize) {
    if skipped > 0 {
        log::warn!(
            "Rewrite of {} dropped {} unreadable row(s)",
            path.display(),
            skipped
        );
    }
}

fn to_row(record: &ExpenseRecord) -> Vec<String> {
    vec![
        record.date.clone(),
        record.category.clone(),
        record.amount.clone(),
    ]
}

fn from_row(path: &Path, row: RawRow) -> ExpenseRecord {
    let field = |i: usize| row.fields.get(i).unwrap_or_default().to_string();
    let record = ExpenseRecord::new(field(0), field(1), field(2));

    if row.fields.len() != EXPENSE_HEADER.len() {
        log::warn!(
            "{}:{}: expected {} fields, found {}",
            path.display(),
            row.line,
            EXPENSE_HEADER.len(),
            row.fields.len()
        );
    } else if !record.is_well_formed() {
        log::warn!(
            "{}:{}: amount '{}' is not a number; excluded from totals",
            path.display(),
            row.line,
            record.amount
        );
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.csv"));
        (temp_dir, repo)
    }

    #[test]
    fn test_append_and_load() {
        let (_temp_dir, repo) = create_repo();

        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "100"))
            .unwrap();
        repo.append(&ExpenseRecord::new("02-01-2024", "Travel", "50.5"))
            .unwrap();

        let records = repo.load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], ExpenseRecord::new("01-01-2024", "Food", "100"));
        assert_eq!(records[1].category, "Travel");
    }

    #[test]
    fn test_load_missing_store_is_empty() {
        let (_temp_dir, repo) = create_repo();
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_ensure_initialized_writes_header() {
        let (_temp_dir, repo) = create_repo();

        repo.ensure_initialized().unwrap();
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Date,Category,Amount\n"
        );

        // Existing data is left alone
        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "1"))
            .unwrap();
        repo.ensure_initialized().unwrap();
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_rows_are_listed() {
        let (_temp_dir, repo) = create_repo();
        fs::write(
            repo.path(),
            "Date,Category,Amount\n01-01-2024,Food,abc\n02-01-2024,Food,5\nlonely\n",
        )
        .unwrap();

        let records = repo.load_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount, "abc");
        assert!(!records[0].is_well_formed());
        assert_eq!(records[2], ExpenseRecord::new("lonely", "", ""));
    }

    #[test]
    fn test_header_is_never_data() {
        let (_temp_dir, repo) = create_repo();
        repo.ensure_initialized().unwrap();

        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_matching_removes_only_match() {
        let (_temp_dir, repo) = create_repo();
        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "100.0"))
            .unwrap();
        repo.append(&ExpenseRecord::new("02-01-2024", "Food", "100.0"))
            .unwrap();

        let removed = repo.delete_matching("01-01-2024", "Food", "100").unwrap();
        assert_eq!(removed, 1);

        let records = repo.load_all().unwrap();
        assert_eq!(records, vec![ExpenseRecord::new("02-01-2024", "Food", "100.0")]);
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Date,Category,Amount\n02-01-2024,Food,100.0\n"
        );
    }

    #[test]
    fn test_delete_matching_removes_all_duplicates() {
        let (_temp_dir, repo) = create_repo();
        for _ in 0..3 {
            repo.append(&ExpenseRecord::new("01-01-2024", "Food", "9"))
                .unwrap();
        }
        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "10"))
            .unwrap();

        assert_eq!(repo.delete_matching("01-01-2024", "Food", "9").unwrap(), 3);
        assert_eq!(repo.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_without_match_leaves_file() {
        let (_temp_dir, repo) = create_repo();
        fs::write(repo.path(), "Date,Category,Amount\r\n01-01-2024,Food,5\r\n").unwrap();

        assert_eq!(repo.delete_matching("01-01-2024", "Food", "6").unwrap(), 0);
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Date,Category,Amount\r\n01-01-2024,Food,5\r\n"
        );
    }

    #[test]
    fn test_delete_corrupt_row_by_text() {
        let (_temp_dir, repo) = create_repo();
        fs::write(repo.path(), "Date,Category,Amount\n01-01-2024,Food,n/a\n").unwrap();

        assert_eq!(repo.delete_matching("01-01-2024", "Food", "n/a").unwrap(), 1);
        assert!(repo.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_clear_all_is_idempotent() {
        let (_temp_dir, repo) = create_repo();
        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "5"))
            .unwrap();

        assert_eq!(repo.clear_all().unwrap(), 1);
        let first = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(repo.clear_all().unwrap(), 0);
        let second = fs::read_to_string(repo.path()).unwrap();

        assert_eq!(first, "Date,Category,Amount\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_append_after_header_without_newline() {
        let (_temp_dir, repo) = create_repo();
        fs::write(repo.path(), "Date,Category,Amount").unwrap();

        repo.append(&ExpenseRecord::new("01-01-2024", "Food", "100"))
            .unwrap();

        assert_eq!(
            repo.load_all().unwrap(),
            vec![ExpenseRecord::new("01-01-2024", "Food", "100")]
        );
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Date,Category,Amount\n01-01-2024,Food,100\n"
        );
    }

    #[test]
    fn test_append_after_record_without_newline() {
        let (_temp_dir, repo) = create_repo();
        fs::write(repo.path(), "Date,Category,Amount\n01-01-2024,Food,5").unwrap();

        repo.append(&ExpenseRecord::new("02-01-2024", "Travel", "7"))
            .unwrap();

        let records = repo.load_all().unwrap();
        assert_eq!(
            records,
            vec![
                ExpenseRecord::new("01-01-2024", "Food", "5"),
                ExpenseRecord::new("02-01-2024", "Travel", "7"),
            ]
        );
        assert!(records.iter().all(|r| r.is_well_formed()));
    }

    #[test]
    fn test_unwritable_store_is_io_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let repo = ExpenseRepository::new(blocker.join("expenses.csv"));

        let err = repo
            .append(&ExpenseRecord::new("01-01-2024", "Food", "5"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = repo.clear_all().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);

        let err = repo.ensure_initialized().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_store_path_is_directory() {
        let (temp_dir, _) = create_repo();
        let dir = temp_dir.path().join("expenses.csv");
        fs::create_dir(&dir).unwrap();
        let repo = ExpenseRepository::new(dir);

        let err = repo
            .append(&ExpenseRecord::new("01-01-2024", "Food", "5"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }

    #[test]
    fn test_rewrite_drops_undecodable_rows() {
        let (_temp_dir, repo) = create_repo();
        let mut bytes = b"Date,Category,Amount\n01-01-2024,Food,5\n".to_vec();
        bytes.extend_from_slice(b"02-01-2024,\xff,7\n");
        fs::write(repo.path(), bytes).unwrap();

        assert_eq!(repo.load_all().unwrap().len(), 1);
        assert_eq!(repo.delete_matching("01-01-2024", "Food", "5").unwrap(), 1);
        assert_eq!(
            fs::read_to_string(repo.path()).unwrap(),
            "Date,Category,Amount\n"
        );
    }

    #[test]
    fn test_concurrent_appends() {
        let (_temp_dir, repo) = create_repo();
        let repo = Arc::new(repo);

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        let record =
                            ExpenseRecord::new("01-01-2024", format!("T{}", t), i.to_string());
                        repo.append(&record).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = repo.load_all().unwrap();
        assert_eq!(records.len(), 100);
        assert!(records.iter().all(|r| r.is_well_formed()));
        let contents = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(contents.matches("Date,Category,Amount").count(), 1);
    }
}
