//! Builder for `title.ratings`.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::parser::{required, required_id};
use crate::reader::Row;
use crate::store::Store;
use crate::types::Rating;
use tracing::warn;

const COLUMNS: &[&str] = &["tconst", "averageRating", "numVotes"];

/// Ratings have no associations
pub struct RatingsBuilder;

impl BatchBuilder for RatingsBuilder {
    type Record = Rating;
    type Pending = ();

    fn dataset(&self) -> Dataset {
        Dataset::Ratings
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Rating, ())> {
        let movie_id = required_id(row.field("tconst"))?;
        let (Some(average_rating), Some(num_votes)) = (
            required::<f64>(row.field("averageRating")),
            required::<i64>(row.field("numVotes")),
        ) else {
            warn!(
                "Skipping rating for {} at line {}: averageRating={:?} numVotes={:?}",
                movie_id,
                row.line(),
                row.field("averageRating"),
                row.field("numVotes")
            );
            return None;
        };
        Some((
            Rating {
                movie_id,
                average_rating,
                num_votes,
            },
            (),
        ))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Rating>,
        _pending: Vec<()>,
    ) -> Result<Flushed> {
        Ok(Flushed {
            records: store.insert_ratings(&records)?,
            associations: 0,
        })
    }
}
