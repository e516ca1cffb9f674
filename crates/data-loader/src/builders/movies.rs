//! Builder for `title.basics`: movies and their genres.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::lookup::Lookups;
use crate::parser::{flag, optional_int, required_id, split_codes};
use crate::reader::Row;
use crate::store::Store;
use crate::types::{Genre, Movie, MovieGenre};

const COLUMNS: &[&str] = &[
    "tconst",
    "titleType",
    "primaryTitle",
    "originalTitle",
    "isAdult",
    "startYear",
    "endYear",
    "runtimeMinutes",
    "genres",
];

pub struct MoviesBuilder<'a> {
    lookups: &'a Lookups,
}

impl<'a> MoviesBuilder<'a> {
    pub fn new(lookups: &'a Lookups) -> Self {
        Self { lookups }
    }
}

impl BatchBuilder for MoviesBuilder<'_> {
    type Record = Movie;
    type Pending = Vec<Genre>;

    fn dataset(&self) -> Dataset {
        Dataset::Movies
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Movie, Vec<Genre>)> {
        let movie = Movie {
            id: required_id(row.field("tconst"))?,
            movie_type: self.lookups.movie_type(row.field("titleType")),
            title: row.get("primaryTitle")?.to_string(),
            original_title: row.get("originalTitle")?.to_string(),
            is_adult: flag(row.field("isAdult")),
            year: optional_int(row.field("startYear")),
            end_year: optional_int(row.field("endYear")),
            runtime_minutes: optional_int(row.field("runtimeMinutes")),
        };
        let genres = split_codes(row.field("genres"), |code| self.lookups.genre(code));
        Some((movie, genres))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Movie>,
        pending: Vec<Vec<Genre>>,
    ) -> Result<Flushed> {
        let keys = store.insert_movies(&records)?;

        let links: Vec<MovieGenre> = keys
            .iter()
            .zip(pending)
            .flat_map(|(movie_id, genres)| {
                genres.into_iter().map(move |genre| MovieGenre {
                    movie_id: movie_id.clone(),
                    genre,
                })
            })
            .collect();
        let associations = store.insert_movie_genres(&links)?;

        Ok(Flushed {
            records: keys.len(),
            associations,
        })
    }
}
