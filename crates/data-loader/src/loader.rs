//! Load orchestration across the dataset files.
//!
//! The default run loads movies, persons, ratings and crew, strictly in
//! that order and each to completion. Alternate titles, episodes and
//! principals have working loaders but only run when asked for.
//! There is no checkpointing: a failed run has to start over, and since
//! nothing is upserted it has to start over against an empty store.

use crate::batch::{BATCH_SIZE, DatasetReport, MAX_BATCH_SIZE, Progress, run_dataset};
use crate::builders::*;
use crate::error::{DataLoadError, Result};
use crate::lookup::Lookups;
use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::info;

/// The dataset files of an IMDb dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Movies,
    Persons,
    Ratings,
    Crew,
    Akas,
    Episodes,
    Principals,
}

impl Dataset {
    /// Run by every load, in this order
    pub const DEFAULT_RUN: [Dataset; 4] = [
        Dataset::Movies,
        Dataset::Persons,
        Dataset::Ratings,
        Dataset::Crew,
    ];

    /// Only run on request, after the default ones and in this order
    pub const OPTIONAL: [Dataset; 3] = [Dataset::Akas, Dataset::Episodes, Dataset::Principals];

    /// File name inside the dataset directory
    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::Movies => "title.basics.tsv.gz",
            Dataset::Persons => "name.basics.tsv.gz",
            Dataset::Ratings => "title.ratings.tsv.gz",
            Dataset::Crew => "title.crew.tsv.gz",
            Dataset::Akas => "title.akas.tsv.gz",
            Dataset::Episodes => "title.episode.tsv.gz",
            Dataset::Principals => "title.principals.tsv.gz",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Movies => "movies",
            Dataset::Persons => "persons",
            Dataset::Ratings => "ratings",
            Dataset::Crew => "crew",
            Dataset::Akas => "akas",
            Dataset::Episodes => "episodes",
            Dataset::Principals => "principals",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = DataLoadError;

    fn from_str(s: &str) -> Result<Self> {
        Dataset::DEFAULT_RUN
            .iter()
            .chain(Dataset::OPTIONAL.iter())
            .copied()
            .find(|d| d.name() == s)
            .ok_or_else(|| DataLoadError::InvalidConfig(format!("unknown dataset '{s}'")))
    }
}

/// Knobs for a load run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Records per flush
    pub batch_size: usize,
    /// Optional datasets to load after the default ones
    pub extra: Vec<Dataset>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            extra: Vec::new(),
        }
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.batch_size) {
            return Err(DataLoadError::InvalidConfig(format!(
                "batch size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }
        if let Some(d) = self.extra.iter().find(|d| !Dataset::OPTIONAL.contains(*d)) {
            return Err(DataLoadError::InvalidConfig(format!(
                "{d} is always loaded and cannot be requested as an extra dataset"
            )));
        }
        Ok(())
    }

    /// Datasets this configuration loads, in execution order
    pub fn plan(&self) -> Vec<Dataset> {
        Dataset::DEFAULT_RUN
            .iter()
            .chain(Dataset::OPTIONAL.iter().filter(|d| self.extra.contains(*d)))
            .copied()
            .collect()
    }
}

/// Outcome of a whole load run
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub datasets: Vec<DatasetReport>,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn records_written(&self) -> u64 {
        self.datasets.iter().map(|d| d.records_written).sum()
    }
}

/// Runs dataset loads against a store
pub struct ImdbLoader {
    config: LoaderConfig,
    lookups: Lookups,
}

impl ImdbLoader {
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            lookups: Lookups::new(),
        })
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every planned dataset from `data_dir`.
    ///
    /// Stops at the first failing dataset; datasets and flushes completed
    /// before it stay in the store.
    pub fn load<S, P>(&self, data_dir: &Path, store: &mut S, progress: &mut P) -> Result<LoadReport>
    where
        S: Store + ?Sized,
        P: Progress + ?Sized,
    {
        let start = Instant::now();
        let plan = self.config.plan();
        info!(
            "Loading IMDb datasets from {} ({})",
            data_dir.display(),
            plan.iter().map(|d| d.name()).collect::<Vec<_>>().join(" -> ")
        );

        let mut datasets = Vec::with_capacity(plan.len());
        for dataset in plan {
            let path = data_dir.join(dataset.file_name());
            datasets.push(self.load_dataset(dataset, &path, store, progress)?);
        }

        let report = LoadReport {
            datasets,
            elapsed: start.elapsed(),
        };
        info!(
            "Load finished: {} records in {:?}",
            report.records_written(),
            report.elapsed
        );
        Ok(report)
    }

    /// Load a single dataset file, whether or not it is in the plan
    pub fn load_dataset<S, P>(
        &self,
        dataset: Dataset,
        path: &Path,
        store: &mut S,
        progress: &mut P,
    ) -> Result<DatasetReport>
    where
        S: Store + ?Sized,
        P: Progress + ?Sized,
    {
        let batch_size = self.config.batch_size;
        match dataset {
            Dataset::Movies => run_dataset(
                path,
                &MoviesBuilder::new(&self.lookups),
                store,
                batch_size,
                progress,
            ),
            Dataset::Persons => run_dataset(
                path,
                &PersonsBuilder::new(&self.lookups),
                store,
                batch_size,
                progress,
            ),
            Dataset::Ratings => run_dataset(path, &RatingsBuilder, store, batch_size, progress),
            Dataset::Crew => run_dataset(path, &CrewBuilder, store, batch_size, progress),
            Dataset::Akas => run_dataset(path, &AkasBuilder, store, batch_size, progress),
            Dataset::Episodes => run_dataset(path, &EpisodesBuilder, store, batch_size, progress),
            Dataset::Principals => {
                run_dataset(path, &PrincipalsBuilder, store, batch_size, progress)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plan() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert_eq!(
            config.plan(),
            vec![Dataset::Movies, Dataset::Persons, Dataset::Ratings, Dataset::Crew]
        );
    }

    #[test]
    fn test_extras_run_last_in_fixed_order() {
        let config = LoaderConfig {
            extra: vec![Dataset::Principals, Dataset::Akas],
            ..LoaderConfig::default()
        };
        assert_eq!(
            config.plan(),
            vec![
                Dataset::Movies,
                Dataset::Persons,
                Dataset::Ratings,
                Dataset::Crew,
                Dataset::Akas,
                Dataset::Principals,
            ]
        );
    }

    #[test]
    fn test_invalid_config() {
        let zero = LoaderConfig {
            batch_size: 0,
            ..LoaderConfig::default()
        };
        assert!(matches!(zero.validate(), Err(DataLoadError::InvalidConfig(_))));

        let huge = LoaderConfig {
            batch_size: usize::MAX,
            ..LoaderConfig::default()
        };
        assert!(matches!(ImdbLoader::new(huge), Err(DataLoadError::InvalidConfig(_))));

        let largest = LoaderConfig {
            batch_size: MAX_BATCH_SIZE,
            ..LoaderConfig::default()
        };
        assert!(largest.validate().is_ok());

        let default_as_extra = LoaderConfig {
            extra: vec![Dataset::Movies],
            ..LoaderConfig::default()
        };
        assert!(ImdbLoader::new(default_as_extra).is_err());
    }

    #[test]
    fn test_dataset_names() {
        assert_eq!("akas".parse::<Dataset>().unwrap(), Dataset::Akas);
        assert_eq!(Dataset::Episodes.file_name(), "title.episode.tsv.gz");
        assert_eq!(Dataset::Crew.to_string(), "crew");
        assert!("reviews".parse::<Dataset>().is_err());
    }
}
