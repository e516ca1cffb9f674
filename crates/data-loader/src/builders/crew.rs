//! Builder for `title.crew`: one crew row per title with directors and
//! writers linked through the key the store assigns to the crew.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::parser::{required_id, split_ids};
use crate::reader::Row;
use crate::store::Store;
use crate::types::{Crew, CrewMember, PersonId};

const COLUMNS: &[&str] = &["tconst", "directors", "writers"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrewLinks {
    pub directors: Vec<PersonId>,
    pub writers: Vec<PersonId>,
}

pub struct CrewBuilder;

impl BatchBuilder for CrewBuilder {
    type Record = Crew;
    type Pending = CrewLinks;

    fn dataset(&self) -> Dataset {
        Dataset::Crew
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Crew, CrewLinks)> {
        let crew = Crew {
            movie_id: required_id(row.field("tconst"))?,
        };
        let links = CrewLinks {
            directors: split_ids(row.field("directors")),
            writers: split_ids(row.field("writers")),
        };
        Some((crew, links))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Crew>,
        pending: Vec<CrewLinks>,
    ) -> Result<Flushed> {
        let crew_ids = store.insert_crews(&records)?;

        let mut directors = Vec::new();
        let mut writers = Vec::new();
        for (&crew_id, links) in crew_ids.iter().zip(pending) {
            directors.extend(
                links
                    .directors
                    .into_iter()
                    .map(|person_id| CrewMember { crew_id, person_id }),
            );
            writers.extend(
                links
                    .writers
                    .into_iter()
                    .map(|person_id| CrewMember { crew_id, person_id }),
            );
        }

        let associations =
            store.insert_crew_directors(&directors)? + store.insert_crew_writers(&writers)?;

        Ok(Flushed {
            records: crew_ids.len(),
            associations,
        })
    }
}
