//! Builder for `title.episode`. Not part of the default run.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::parser::{optional_int, required_id};
use crate::reader::Row;
use crate::store::Store;
use crate::types::Episode;

const COLUMNS: &[&str] = &["tconst", "parentTconst", "seasonNumber", "episodeNumber"];

pub struct EpisodesBuilder;

impl BatchBuilder for EpisodesBuilder {
    type Record = Episode;
    type Pending = ();

    fn dataset(&self) -> Dataset {
        Dataset::Episodes
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Episode, ())> {
        let episode = Episode {
            movie_id: required_id(row.field("tconst"))?,
            parent_id: required_id(row.field("parentTconst"))?,
            season_number: optional_int(row.field("seasonNumber")),
            episode_number: optional_int(row.field("episodeNumber")),
        };
        Some((episode, ()))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Episode>,
        _pending: Vec<()>,
    ) -> Result<Flushed> {
        Ok(Flushed {
            records: store.insert_episodes(&records)?,
            associations: 0,
        })
    }
}
