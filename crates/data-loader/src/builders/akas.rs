//! Builder for `title.akas`. Not part of the default run.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::parser::{flag, optional_text, required, required_id, truncate_chars};
use crate::reader::Row;
use crate::store::Store;
use crate::types::Akas;
use tracing::warn;

/// Longest alternate title kept; longer ones are cut
pub const MAX_TITLE_LEN: usize = 512;

const COLUMNS: &[&str] = &[
    "titleId",
    "ordering",
    "title",
    "region",
    "language",
    "types",
    "attributes",
    "isOriginalTitle",
];

pub struct AkasBuilder;

impl BatchBuilder for AkasBuilder {
    type Record = Akas;
    type Pending = ();

    fn dataset(&self) -> Dataset {
        Dataset::Akas
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Akas, ())> {
        let movie_id = required_id(row.field("titleId"))?;
        let Some(ordering) = required::<i32>(row.field("ordering")) else {
            warn!(
                "Skipping alternate title of {} at line {}: ordering={:?}",
                movie_id,
                row.line(),
                row.field("ordering")
            );
            return None;
        };
        let akas = Akas {
            movie_id,
            ordering,
            title: truncate_chars(row.get("title")?, MAX_TITLE_LEN),
            region: optional_text(row.field("region")),
            language: optional_text(row.field("language")),
            types: optional_text(row.field("types")),
            attributes: optional_text(row.field("attributes")),
            is_original_title: flag(row.field("isOriginalTitle")),
        };
        Some((akas, ()))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Akas>,
        _pending: Vec<()>,
    ) -> Result<Flushed> {
        Ok(Flushed {
            records: store.insert_akas(&records)?,
            associations: 0,
        })
    }
}
