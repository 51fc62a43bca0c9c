//! CSV-file tabular store
//!
//! One `<table>.csv` per table inside a data directory, header on the first
//! line. Appends open the file in append mode; cell updates rewrite the
//! whole file through a temp file and a rename so a crash never leaves a
//! half-written table behind.

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Cell, Row, Table, TabularStore};
use crate::config::paths::BunkerPaths;
use crate::error::{BunkerError, BunkerResult};

/// Tabular store backed by a directory of CSV files
#[derive(Debug, Clone)]
pub struct CsvStore {
    paths: BunkerPaths,
}

impl CsvStore {
    /// Create a store over the data directory of `paths`
    pub fn new(paths: BunkerPaths) -> BunkerResult<Self> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BunkerPaths {
        &self.paths
    }

    /// Create every missing table file with its header row
    ///
    /// Returns the tables that were created. Existing files are left alone.
    pub fn initialize(&self) -> BunkerResult<Vec<Table>> {
        let mut created = Vec::new();
        for table in Table::all() {
            let path = self.paths.table_file(table);
            if !path.exists() {
                let header: Vec<String> = table.headers().iter().map(|h| h.to_string()).collect();
                write_csv_atomic(&path, &[header])?;
                created.push(table);
            }
        }
        Ok(created)
    }

    /// Read the header and all records of a table file as raw strings
    fn read_records(&self, table: Table) -> BunkerResult<Option<Vec<Vec<String>>>> {
        let path = self.paths.table_file(table);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)
            .map_err(|e| {
                BunkerError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect());
        }
        Ok(Some(records))
    }
}

impl TabularStore for CsvStore {
    fn read_table(&self, table: Table) -> BunkerResult<Vec<Row>> {
        let records = match self.read_records(table)? {
            Some(records) => records,
            None if table.is_optional() => return Ok(Vec::new()),
            None => return Err(BunkerError::table_not_found(table.name())),
        };

        let rows: Vec<Row> = records
            .into_iter()
            .skip(1)
            .map(|fields| fields.iter().map(|f| Cell::from_raw(f)).collect())
            .collect();

        debug!(table = %table, rows = rows.len(), "read table");
        Ok(rows)
    }

    fn update_cell(
        &self,
        table: Table,
        row: usize,
        column: usize,
        value: Cell,
    ) -> BunkerResult<()> {
        let mut records = self
            .read_records(table)?
            .ok_or_else(|| BunkerError::table_not_found(table.name()))?;

        // Record 0 is the header
        let record = records.get_mut(row + 1).ok_or_else(|| {
            BunkerError::Storage(format!("Row {} out of range in {}", row, table))
        })?;
        if record.len() <= column {
            record.resize(column + 1, String::new());
        }
        record[column] = value.to_raw();

        write_csv_atomic(&self.paths.table_file(table), &records)
    }

    fn append_row(&self, table: Table, row: Row) -> BunkerResult<()> {
        let path = self.paths.table_file(table);
        if !path.exists() {
            if !table.is_optional() {
                return Err(BunkerError::table_not_found(table.name()));
            }
            let header: Vec<String> = table.headers().iter().map(|h| h.to_string()).collect();
            write_csv_atomic(&path, &[header])?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                BunkerError::Storage(format!("Failed to open {}: {}", path.display(), e))
            })?;

        // A hand-edited table may lack the final line break
        if !ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        writer.write_record(row.iter().map(Cell::to_raw))?;
        writer
            .flush()
            .map_err(|e| BunkerError::Storage(format!("Failed to flush {}: {}", table, e)))?;

        debug!(table = %table, "appended row");
        Ok(())
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

/// Write records to a CSV file atomically (write to temp, then rename)
pub fn write_csv_atomic<P: AsRef<Path>>(path: P, records: &[Vec<String>]) -> BunkerResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BunkerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file in the same directory so the rename stays on one filesystem
    let temp_path: PathBuf = path.with_extension("csv.tmp");

    {
        let file = File::create(&temp_path)
            .map_err(|e| BunkerError::Storage(format!("Failed to create temp file: {}", e)))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(file);
        for record in records {
            writer.write_record(record)?;
        }
        let mut file = writer
            .into_inner()
            .map_err(|e| BunkerError::Storage(format!("Failed to flush data: {}", e)))?;
        file.flush()
            .map_err(|e| BunkerError::Storage(format!("Failed to flush data: {}", e)))?;
        file.sync_all()
            .map_err(|e| BunkerError::Storage(format!("Failed to sync data: {}", e)))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BunkerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
