//! Terminal progress bar for load runs

use colored::Colorize;
use data_loader::{Dataset, DatasetReport, Progress};
use indicatif::{ProgressBar, ProgressStyle};

/// One indicatif bar per dataset, sized by the pre-scanned row count
pub struct BarProgress {
    bar: Option<ProgressBar>,
}

impl BarProgress {
    pub fn new() -> Self {
        Self { bar: None }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn start(&mut self, dataset: Dataset, total_rows: Option<u64>) {
        let bar = match total_rows {
            Some(total) => ProgressBar::new(total),
            None => ProgressBar::new_spinner(),
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {prefix:>10} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_prefix(dataset.name());
        self.bar = Some(bar);
    }

    fn advance(&mut self, rows: u64) {
        if let Some(ref bar) = self.bar {
            bar.inc(rows);
        }
    }

    fn finish(&mut self, report: &DatasetReport) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        println!(
            "{} {}: {} records, {} associations in {} flushes{}",
            "✓".green(),
            report.dataset.name().bold(),
            report.records_written,
            report.associations_written,
            report.flush_sizes.len(),
            if report.rows_skipped > 0 {
                format!(" ({} rows skipped)", report.rows_skipped).yellow().to_string()
            } else {
                String::new()
            }
        );
    }
}
