use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::path::PathBuf;

use anyhow::Context;

use crate::codec::TableRecord;

/// Append-only row store over one backing CSV file.
///
/// Every call opens and closes its own file handle; nothing is held between
/// requests, and the two record kinds get fully independent stores.
#[derive(Clone, Debug)]
pub struct RowStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: TableRecord> RowStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RowStore {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Appends one record, writing the header row first if the file is empty.
    ///
    /// The writer is flexible so wrong-width rows (e.g. a survey with fewer
    /// than 10 responses) are still recorded rather than rejected.
    pub fn append(&self, record: &R) -> anyhow::Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("could not open {}", self.path.display()))?;
        let is_empty = file
            .metadata()
            .with_context(|| format!("could not stat {}", self.path.display()))?
            .len()
            == 0;

        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);
        if is_empty {
            writer
                .write_record(R::HEADER)
                .context("failed to write header row")?;
        }
        writer
            .write_record(record.to_row())
            .context("failed to write record row")?;
        writer.flush().context("failed to flush record row")?;

        Ok(())
    }

    /// Reads every record in append order, skipping the header and any
    /// malformed rows. A missing file is an empty result set, not an error.
    pub fn read_all(&self) -> Vec<R> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
        reader
            .records()
            .filter_map(|row| match row {
                Ok(row) => R::from_row(&row),
                Err(e) => {
                    tracing::warn!(error = %e, path = %self.path.display(), "skipping unreadable row");
                    None
                }
            })
            .collect()
    }
}
