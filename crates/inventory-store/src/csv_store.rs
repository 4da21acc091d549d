//! CSV-backed store implementation
//!
//! The store file is opened, used and closed within each operation; no
//! handle outlives a call. Every query is a full scan.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use inventory_util::{IdPolicy, ItemId};
use serde::Serialize;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{
    Added, CorruptRow, FIELDS, Health, ListFilter, LockError, NewItem, Record, Store, StoreError,
    StoreLockGuard, StoreResult, Summary, allocate_id, lock_exclusive, lock_shared, search_records,
    summarize_records,
};

/// Options for opening a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub id_policy: IdPolicy,

    /// Take advisory locks around each operation. Without them the caller
    /// must guarantee a single writer and no reads during writes.
    pub lock: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            id_policy: IdPolicy::Sequential,
            lock: true,
        }
    }
}

/// CSV-backed store
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    options: StoreOptions,
}

impl CsvStore {
    /// Open or create a store at the given path with default options
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Open or create a store at the given path.
    ///
    /// A new file gets the header line. An existing file is trusted as-is,
    /// except that a zero-length file is given a header.
    pub fn open_with(path: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            options,
        };
        store.ensure_file()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    fn ensure_file(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(StoreError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory {} does not exist", parent.display()),
            )));
        }

        let _guard = self.write_lock()?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                write_durably(&mut file, &encode_row(&FIELDS)?)?;
                info!(path = %self.path.display(), "Store created");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let file = File::open(&self.path).map_err(|e| self.open_error(e))?;
                let meta = file.metadata()?;
                if !meta.is_file() {
                    return Err(StoreError::Io(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("{} is not a regular file", self.path.display()),
                    )));
                }
                drop(file);

                if meta.len() == 0 {
                    let mut file = OpenOptions::new()
                        .append(true)
                        .open(&self.path)
                        .map_err(|e| self.open_error(e))?;
                    write_durably(&mut file, &encode_row(&FIELDS)?)?;
                    warn!(path = %self.path.display(), "Store file was empty, header written");
                } else {
                    debug!(path = %self.path.display(), bytes = meta.len(), "Using existing store");
                }
                Ok(())
            }
            Err(e) => Err(self.open_error(e)),
        }
    }

    fn open_error(&self, e: io::Error) -> StoreError {
        if e.kind() == io::ErrorKind::PermissionDenied {
            StoreError::PermissionDenied(self.path.clone())
        } else {
            StoreError::Io(e)
        }
    }

    fn lock_error(&self, e: LockError) -> StoreError {
        match e {
            LockError::CreateFailed { path, source }
                if source.kind() == io::ErrorKind::PermissionDenied =>
            {
                StoreError::PermissionDenied(path)
            }
            other => StoreError::Lock(other),
        }
    }

    fn read_lock(&self) -> StoreResult<Option<StoreLockGuard>> {
        if !self.options.lock {
            return Ok(None);
        }
        lock_shared(&self.path)
            .map(Some)
            .map_err(|e| self.lock_error(e))
    }

    fn write_lock(&self) -> StoreResult<Option<StoreLockGuard>> {
        if !self.options.lock {
            return Ok(None);
        }
        lock_exclusive(&self.path)
            .map(Some)
            .map_err(|e| self.lock_error(e))
    }

    /// Parse every row, handing each to `visit` in file order.
    ///
    /// Rows that fail to parse are passed as `Err`; `visit` decides whether
    /// that ends the scan. I/O failures always end it. Takes no lock.
    fn scan<F>(&self, mut visit: F) -> StoreResult<()>
    where
        F: FnMut(Result<Record, CorruptRow>) -> StoreResult<()>,
    {
        let file = File::open(&self.path).map_err(|e| self.open_error(e))?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let headers = reader.headers()?.clone();
        let mut row = StringRecord::new();

        loop {
            match reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    let parsed = row
                        .deserialize::<Record>(Some(&headers))
                        .map_err(|e| CorruptRow {
                            line,
                            reason: describe_csv_error(&e),
                        });
                    visit(parsed)?;
                }
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or_default();
                    let message = e.to_string();
                    match e.into_kind() {
                        csv::ErrorKind::Io(io) => return Err(StoreError::Io(io)),
                        csv::ErrorKind::UnequalLengths {
                            expected_len, len, ..
                        } => visit(Err(CorruptRow {
                            line,
                            reason: format!("expected {} fields, found {}", expected_len, len),
                        }))?,
                        csv::ErrorKind::Utf8 { err, .. } => visit(Err(CorruptRow {
                            line,
                            reason: format!("invalid UTF-8: {}", err),
                        }))?,
                        _ => return Err(StoreError::Csv(message)),
                    }
                }
            }
        }

        Ok(())
    }

    /// All records, failing on the first corrupt row
    fn records(&self) -> StoreResult<Vec<Record>> {
        let _guard = self.read_lock()?;

        let mut records = Vec::new();
        self.scan(|row| match row {
            Ok(record) => {
                records.push(record);
                Ok(())
            }
            Err(bad) => Err(StoreError::CorruptRecord {
                line: bad.line,
                reason: bad.reason,
            }),
        })?;

        debug!(path = %self.path.display(), count = records.len(), "Store scanned");
        Ok(records)
    }

    /// Every id in the `id` column that parses, whether or not the rest of
    /// its row does. Takes no lock.
    fn existing_ids(&self) -> StoreResult<HashSet<ItemId>> {
        let file = File::open(&self.path).map_err(|e| self.open_error(e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);
        let id_column = reader
            .byte_headers()?
            .iter()
            .position(|h| h == FIELDS[0].as_bytes())
            .unwrap_or(0);

        let mut ids = HashSet::new();
        for row in reader.byte_records() {
            let row = match row {
                Ok(row) => row,
                Err(e) => match e.into_kind() {
                    csv::ErrorKind::Io(io) => return Err(StoreError::Io(io)),
                    _ => continue,
                },
            };

            if let Some(id) = row
                .get(id_column)
                .and_then(|f| std::str::from_utf8(f).ok())
                .and_then(|s| s.parse::<ItemId>().ok())
            {
                ids.insert(id);
            }
        }

        Ok(ids)
    }

    /// Append one encoded row. On failure the file is cut back to its
    /// previous length.
    fn append(&self, row: &[u8]) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.open_error(e))?;

        let original_len = file.metadata()?.len();
        let mut buf = Vec::with_capacity(row.len() + 1);
        if original_len > 0 && !ends_with_newline(&mut file)? {
            buf.push(b'\n');
        }
        buf.extend_from_slice(row);

        if let Err(e) = write_durably(&mut file, &buf) {
            if let Err(rollback) = file.set_len(original_len) {
                warn!(
                    path = %self.path.display(),
                    error = %rollback,
                    "Failed to roll back partial append"
                );
            }
            return Err(e.into());
        }

        Ok(())
    }
}

impl Store for CsvStore {
    fn add(&self, item: NewItem) -> StoreResult<Added> {
        let quantity = item.validate()?;

        // Held across the id scan and the append
        let _guard = self.write_lock()?;

        let existing = self.existing_ids()?;
        let id = allocate_id(self.options.id_policy, &existing, &mut rand::thread_rng())?;
        let record = item.into_record(id, quantity, inventory_util::now());

        self.append(&encode_row(&record)?)?;

        debug!(
            item_id = %id,
            name = %record.name,
            category = %record.category,
            quantity = record.quantity,
            "Item appended"
        );

        Ok(Added {
            id,
            name: record.name,
        })
    }

    fn list(&self, filter: &ListFilter) -> StoreResult<Vec<Record>> {
        Ok(filter.apply(self.records()?))
    }

    fn search(&self, query: &str) -> StoreResult<Vec<Record>> {
        Ok(search_records(self.records()?, query))
    }

    fn summarize(&self) -> StoreResult<Summary> {
        Ok(summarize_records(self.records()?))
    }

    fn verify(&self) -> StoreResult<Health> {
        let _guard = self.read_lock()?;

        let mut health = Health::default();
        let mut seen = HashSet::new();
        self.scan(|row| {
            match row {
                Ok(record) => {
                    health.records += 1;
                    if !seen.insert(record.id) && !health.duplicate_ids.contains(&record.id) {
                        health.duplicate_ids.push(record.id);
                    }
                }
                Err(bad) => {
                    warn!(line = bad.line, reason = %bad.reason, "Corrupt row");
                    health.corrupt.push(bad);
                }
            }
            Ok(())
        })?;

        info!(
            path = %self.path.display(),
            records = health.records,
            corrupt = health.corrupt.len(),
            duplicate_ids = health.duplicate_ids.len(),
            "Store verified"
        );
        Ok(health)
    }
}

/// Encode one CSV row (header or record) with standard quoting
fn encode_row<S: Serialize>(row: &S) -> StoreResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.serialize(row)?;
    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}

fn write_durably(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_data()
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn describe_csv_error(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => e.to_string(),
    }
}
