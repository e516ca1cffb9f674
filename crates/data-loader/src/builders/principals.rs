//! Builder for `title.principals`. Not part of the default run.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::parser::{required, required_id, text_or_empty};
use crate::reader::Row;
use crate::store::Store;
use crate::types::Principal;
use tracing::warn;

const COLUMNS: &[&str] = &["tconst", "ordering", "nconst", "category", "job", "characters"];

pub struct PrincipalsBuilder;

impl BatchBuilder for PrincipalsBuilder {
    type Record = Principal;
    type Pending = ();

    fn dataset(&self) -> Dataset {
        Dataset::Principals
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Principal, ())> {
        let movie_id = required_id(row.field("tconst"))?;
        let person_id = required_id(row.field("nconst"))?;
        let Some(ordering) = required::<i32>(row.field("ordering")) else {
            warn!(
                "Skipping principal {} of {} at line {}: ordering={:?}",
                person_id,
                movie_id,
                row.line(),
                row.field("ordering")
            );
            return None;
        };
        let principal = Principal {
            movie_id,
            ordering,
            person_id,
            category: row.get("category")?.to_string(),
            job: text_or_empty(row.field("job")),
            characters: text_or_empty(row.field("characters")),
        };
        Some((principal, ()))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Principal>,
        _pending: Vec<()>,
    ) -> Result<Flushed> {
        Ok(Flushed {
            records: store.insert_principals(&records)?,
            associations: 0,
        })
    }
}
