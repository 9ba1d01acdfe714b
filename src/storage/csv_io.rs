//! File I/O utilities for the delimited expense store
//!
//! Appends go straight to the end of the file. Full rewrites go to a
//! temporary sibling file that is synced and renamed over the original, so a
//! failure mid-write never leaves a half-written store behind.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::LedgerError;

/// A data row read from the store, after the header
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based line number of the record in the file
    pub line: u64,
    pub fields: StringRecord,
}

/// Rows read from the store, plus how many undecodable rows were skipped
#[derive(Debug, Default)]
pub struct RowSet {
    pub rows: Vec<RawRow>,
    pub skipped: usize,
}

fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.has_headers(false).terminator(Terminator::Any(b'\n'));
    builder
}

fn ensure_parent(path: &Path) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            LedgerError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Check whether the file is missing or has zero length
pub fn is_missing_or_empty<P: AsRef<Path>>(path: P) -> bool {
    fs::metadata(path.as_ref())
        .map(|meta| meta.len() == 0)
        .unwrap_or(true)
}

/// Read every row after the first line
///
/// A missing file reads as no rows. Rows that can't be decoded are skipped
/// with a warning and counted; rows with the wrong number of fields are
/// returned as-is.
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<RowSet, LedgerError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(RowSet::default());
    }

    let file = File::open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut set = RowSet::default();
    for result in reader.records() {
        match result {
            Ok(fields) => {
                let line = fields.position().map(|p| p.line()).unwrap_or(0);
                set.rows.push(RawRow { line, fields });
            }
            Err(e) => {
                log::warn!("Skipping unreadable row in {}: {}", path.display(), e);
                set.skipped += 1;
            }
        }
    }

    Ok(set)
}

/// Whether a non-empty file is missing its final line terminator
fn lacks_trailing_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Append rows to the end of the file, writing the header first if the file
/// is missing or empty
///
/// A file whose last line has no terminator gets one before the new rows, so
/// an appended row never joins the line before it.
pub fn append_rows<P, R>(path: P, header: &[&str], rows: &[R]) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    R: AsRef<[String]>,
{
    let path = path.as_ref();
    ensure_parent(path)?;

    let needs_header = is_missing_or_empty(path);

    let mut file = OpenOptions::new()
        .read(true)
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let unterminated = lacks_trailing_newline(&mut file)
        .map_err(|e| LedgerError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    if unterminated {
        file.write_all(b"\n")
            .map_err(|e| LedgerError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    }

    let mut writer = writer_builder().from_writer(file);
    if needs_header {
        writer.write_record(header)?;
    }
    for row in rows {
        writer.write_record(row.as_ref())?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;

    Ok(())
}

/// Replace the whole file with the header followed by `rows`
pub fn rewrite_atomic<P, R>(path: P, header: &[&str], rows: &[R]) -> Result<(), LedgerError>
where
    P: AsRef<Path>,
    R: AsRef<[String]>,
{
    let path = path.as_ref();

    let mut buffer = writer_builder().from_writer(Vec::new());
    buffer.write_record(header)?;
    for row in rows {
        buffer.write_record(row.as_ref())?;
    }
    let bytes = buffer
        .into_inner()
        .map_err(|e| LedgerError::Io(format!("Failed to encode rows: {}", e)))?;

    write_bytes_atomic(path, &bytes)
}

/// Write a small text file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), LedgerError> {
    write_bytes_atomic(path.as_ref(), contents.as_bytes())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<(), LedgerError> {
    ensure_parent(path)?;

    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| LedgerError::Io(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Io(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
