//! Accumulate-and-flush loop shared by every dataset.
//!
//! Rows are built into an in-memory batch; once it holds `batch_size`
//! records it is handed to the builder's `persist`. Whatever remains at
//! end of file is flushed as a final partial batch. Flushes run one after
//! another in file order, and the first failing flush aborts the dataset.

use crate::builders::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::reader::{DatasetReader, count_rows};
use crate::store::Store;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Rows per flush unless configured otherwise
pub const BATCH_SIZE: usize = 1000;

/// Largest batch size a `LoaderConfig` accepts
pub const MAX_BATCH_SIZE: usize = 1_000_000;

/// Outcome of loading one dataset file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub dataset: Dataset,
    pub rows_read: u64,
    /// Rows the builder could not turn into a record
    pub rows_skipped: u64,
    pub records_written: u64,
    pub associations_written: u64,
    /// Number of records in each flush, in order
    pub flush_sizes: Vec<u64>,
}

impl DatasetReport {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            rows_read: 0,
            rows_skipped: 0,
            records_written: 0,
            associations_written: 0,
            flush_sizes: Vec::new(),
        }
    }
}

/// Observer for load progress.
///
/// The library never draws anything itself; the CLI plugs in a progress
/// bar, tests and quiet runs use [`NoProgress`].
pub trait Progress {
    /// Whether `start` should receive a real row count. Counting means
    /// decompressing the whole file once more, so reporters that ignore
    /// the total can opt out.
    fn wants_total(&self) -> bool {
        true
    }

    fn start(&mut self, dataset: Dataset, total_rows: Option<u64>);

    fn advance(&mut self, rows: u64);

    fn finish(&mut self, report: &DatasetReport);
}

/// Progress reporter that ignores everything
pub struct NoProgress;

impl Progress for NoProgress {
    fn wants_total(&self) -> bool {
        false
    }

    fn start(&mut self, _dataset: Dataset, _total_rows: Option<u64>) {}

    fn advance(&mut self, _rows: u64) {}

    fn finish(&mut self, _report: &DatasetReport) {}
}

/// Load one dataset file through `builder` into `store`
pub fn run_dataset<B, S, P>(
    path: &Path,
    builder: &B,
    store: &mut S,
    batch_size: usize,
    progress: &mut P,
) -> Result<DatasetReport>
where
    B: BatchBuilder,
    S: Store + ?Sized,
    P: Progress + ?Sized,
{
    let dataset = builder.dataset();
    info!("Loading {} from {}", dataset, path.display());

    let total_rows = if progress.wants_total() {
        Some(count_rows(path)?)
    } else {
        None
    };
    let reader = DatasetReader::open(path)?;
    reader.require(builder.columns())?;
    progress.start(dataset, total_rows);

    let mut report = DatasetReport::new(dataset);
    // batch_size comes from the user; only reserve what a default batch needs
    let mut batch = Batch::with_capacity(batch_size.min(BATCH_SIZE));

    for row in reader {
        let row = row?;
        report.rows_read += 1;
        match builder.build(&row) {
            Some((record, pending)) => batch.push(record, pending),
            None => {
                debug!("Skipped {} row at line {}", dataset, row.line());
                report.rows_skipped += 1;
            }
        }
        progress.advance(1);

        if batch.len() >= batch_size {
            batch.flush(builder, store, &mut report)?;
        }
    }
    if !batch.is_empty() {
        batch.flush(builder, store, &mut report)?;
    }

    info!(
        "Loaded {}: {} rows read, {} skipped, {} records and {} associations written in {} flushes",
        dataset,
        report.rows_read,
        report.rows_skipped,
        report.records_written,
        report.associations_written,
        report.flush_sizes.len()
    );
    progress.finish(&report);
    Ok(report)
}

/// Index-aligned records and pending associations awaiting a flush
struct Batch<R, P> {
    records: Vec<R>,
    pending: Vec<P>,
    capacity: usize,
}

impl<R, P> Batch<R, P> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            pending: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, record: R, pending: P) {
        self.records.push(record);
        self.pending.push(pending);
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn flush<B, S>(&mut self, builder: &B, store: &mut S, report: &mut DatasetReport) -> Result<()>
    where
        B: BatchBuilder<Record = R, Pending = P>,
        S: Store + ?Sized,
    {
        let records = std::mem::replace(&mut self.records, Vec::with_capacity(self.capacity));
        let pending = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
        let size = records.len() as u64;

        let Flushed {
            records: written,
            associations,
        } = builder.persist(store, records, pending)?;

        debug!(
            "Flushed {} batch #{}: {} records, {} associations",
            report.dataset,
            report.flush_sizes.len() + 1,
            written,
            associations
        );
        report.flush_sizes.push(size);
        report.records_written += written as u64;
        report.associations_written += associations as u64;
        Ok(())
    }
}
