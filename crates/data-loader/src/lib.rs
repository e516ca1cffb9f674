//! # Data Loader Crate
//!
//! Imports IMDb's public dataset dumps (gzip-compressed TSV files) into a
//! relational store.
//!
//! ## Main Components
//!
//! - **types**: Entity rows and the reference enums (Genre, Profession, MovieType)
//! - **lookup**: Code → variant tables built once per run
//! - **parser**: Field conversion rules for the `\N` sentinel, flags and lists
//! - **reader**: Streaming gzip TSV reader
//! - **builders**: One row → entity builder per dataset file
//! - **batch**: Accumulate-and-flush loop
//! - **store**: `Store` trait and its SQLite implementation
//! - **loader**: Dataset order and the `ImdbLoader` entry point
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{ImdbLoader, LoaderConfig, NoProgress, SqliteStore};
//! use std::path::Path;
//!
//! let mut store = SqliteStore::open(Path::new("imdb.sqlite3"))?;
//! let loader = ImdbLoader::new(LoaderConfig::default())?;
//! let report = loader.load(Path::new("datasets/imdb"), &mut store, &mut NoProgress)?;
//!
//! for dataset in &report.datasets {
//!     println!("{}: {} rows", dataset.dataset, dataset.records_written);
//! }
//! ```

pub mod batch;
pub mod builders;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod parser;
pub mod reader;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use batch::{BATCH_SIZE, DatasetReport, MAX_BATCH_SIZE, NoProgress, Progress, run_dataset};
pub use builders::{BatchBuilder, Flushed};
pub use error::{DataLoadError, Result};
pub use loader::{Dataset, ImdbLoader, LoadReport, LoaderConfig};
pub use lookup::Lookups;
pub use reader::{DatasetReader, Row, count_rows};
pub use store::{SqliteStore, Store};
pub use types::{
    // Type aliases
    CrewId,
    MovieId,
    PersonId,
    // Rows
    Akas,
    Crew,
    CrewMember,
    Episode,
    Movie,
    MovieGenre,
    Person,
    PersonKnownFor,
    PersonProfession,
    Principal,
    Rating,
    // Enums
    Genre,
    MovieType,
    Profession,
};
