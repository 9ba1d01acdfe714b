//! Income repository
//!
//! A single plain-text value, no header and no delimiter. Loading never fails:
//! a missing, unreadable or unparsable file reads as zero.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Income;

use super::csv_io::write_text_atomic;

/// Repository for the monthly income value
pub struct IncomeRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl IncomeRepository {
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
            .map_err(|e| LedgerError::Io(format!("Failed to acquire income lock: {}", e)))
    }

    /// Load the stored income, defaulting to zero
    pub fn load(&self) -> Income {
        let Ok(_guard) = self.acquire() else {
            return Income::zero();
        };

        if !self.path.exists() {
            return Income::zero();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                return Income::zero();
            }
        };

        match contents.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Income::new(value),
            _ => {
                log::warn!(
                    "Income file {} holds '{}', which is not a number; using 0",
                    self.path.display(),
                    contents.trim()
                );
                Income::zero()
            }
        }
    }

    /// Overwrite the stored income
    pub fn save(&self, income: Income) -> LedgerResult<()> {
        let _guard = self.acquire()?;

        write_text_atomic(&self.path, &income.to_string())?;
        log::debug!("Saved income {}", income);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    fn create_repo() -> (TempDir, IncomeRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = IncomeRepository::new(temp_dir.path().join("income.txt"));
        (temp_dir, repo)
    }

    #[test]
    fn test_save_to_unwritable_path_is_io_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let repo = IncomeRepository::new(blocker.join("income.txt"));

        let err = repo.save(Income::new(100.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert_eq!(repo.load(), Income::zero());
    }

    #[test]
    fn test_missing_file_is_zero() {
        let (_temp_dir, repo) = create_repo();
        assert_eq!(repo.load(), Income::zero());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, repo) = create_repo();

        repo.save(Income::new(4500.75)).unwrap();
        assert_eq!(repo.load().amount(), 4500.75);
        assert_eq!(fs::read_to_string(repo.path()).unwrap(), "4500.75");
    }

    #[test]
    fn test_save_overwrites() {
        let (_temp_dir, repo) = create_repo();

        repo.save(Income::new(100.0)).unwrap();
        repo.save(Income::new(250.0)).unwrap();
        assert_eq!(repo.load().amount(), 250.0);
    }

    #[test]
    fn test_tolerates_whitespace_and_python_style_floats() {
        let (_temp_dir, repo) = create_repo();

        fs::write(repo.path(), "3000.0\n").unwrap();
        assert_eq!(repo.load().amount(), 3000.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        let (_temp_dir, repo) = create_repo();

        fs::write(repo.path(), "lots").unwrap();
        assert_eq!(repo.load(), Income::zero());

        fs::write(repo.path(), "").unwrap();
        assert_eq!(repo.load(), Income::zero());
    }
}
