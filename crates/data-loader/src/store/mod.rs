//! Persistence seam for the loader.
//!
//! A flush always happens in two phases: primary rows first, then the
//! association rows built from the keys the first phase returned. Stores
//! that assign keys on insert (crew rows here) report them back in input
//! order.

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Bulk writer for every entity and association the loader produces.
///
/// Each call is one bulk operation covering the whole slice. Inserting
/// rows whose key already exists is an error; there is no upsert.
pub trait Store {
    /// Insert movies, returning their keys in input order
    fn insert_movies(&mut self, movies: &[Movie]) -> Result<Vec<MovieId>>;
    fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> Result<usize>;

    /// Insert persons, returning their keys in input order
    fn insert_persons(&mut self, persons: &[Person]) -> Result<Vec<PersonId>>;
    fn insert_person_professions(&mut self, links: &[PersonProfession]) -> Result<usize>;
    fn insert_person_known_for(&mut self, links: &[PersonKnownFor]) -> Result<usize>;

    fn insert_ratings(&mut self, ratings: &[Rating]) -> Result<usize>;

    /// Insert crews, returning the keys the store assigned in input order
    fn insert_crews(&mut self, crews: &[Crew]) -> Result<Vec<CrewId>>;
    fn insert_crew_directors(&mut self, links: &[CrewMember]) -> Result<usize>;
    fn insert_crew_writers(&mut self, links: &[CrewMember]) -> Result<usize>;

    fn insert_akas(&mut self, akas: &[Akas]) -> Result<usize>;
    fn insert_episodes(&mut self, episodes: &[Episode]) -> Result<usize>;
    fn insert_principals(&mut self, principals: &[Principal]) -> Result<usize>;
}
