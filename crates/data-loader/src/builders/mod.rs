//! Row → entity builders, one per dataset file.
//!
//! A builder turns a raw row into a primary record plus whatever it needs
//! to create association rows later (`Pending`). Associations are only
//! materialized in `persist`, after the store has handed back the keys of
//! the primary rows.

pub mod akas;
pub mod crew;
pub mod episodes;
pub mod movies;
pub mod persons;
pub mod principals;
pub mod ratings;

pub use akas::AkasBuilder;
pub use crew::CrewBuilder;
pub use episodes::EpisodesBuilder;
pub use movies::MoviesBuilder;
pub use persons::PersonsBuilder;
pub use principals::PrincipalsBuilder;
pub use ratings::RatingsBuilder;

use crate::error::Result;
use crate::loader::Dataset;
use crate::reader::Row;
use crate::store::Store;

/// What one flush wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flushed {
    pub records: usize,
    pub associations: usize,
}

/// Converts rows of one dataset and writes accumulated batches.
///
/// `build` does no I/O and never fails: values it cannot interpret are
/// normalized, and a row it cannot turn into a record yields `None`.
pub trait BatchBuilder {
    /// Primary entity written in phase one of a flush
    type Record;
    /// Raw association data kept until the record's key is known
    type Pending;

    fn dataset(&self) -> Dataset;

    /// Header columns `build` reads
    fn columns(&self) -> &'static [&'static str];

    fn build(&self, row: &Row) -> Option<(Self::Record, Self::Pending)>;

    /// Write one batch: records first, then associations keyed on what the
    /// store returned. `records` and `pending` are index-aligned.
    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Self::Record>,
        pending: Vec<Self::Pending>,
    ) -> Result<Flushed>;
}
