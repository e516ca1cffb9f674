//! SQLite implementation of [`Store`].
//!
//! Every bulk call runs in its own transaction with one cached prepared
//! statement, so a failed flush leaves the earlier flushes committed.

use super::Store;
use super::schema::{self, TABLES};
use crate::error::Result;
use crate::types::*;
use rusqlite::{Connection, Statement, params};
use std::path::Path;
use tracing::debug;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        // journal_mode reports the mode it switched to, hence the check variant
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::from_connection(conn)
    }

    /// Throwaway in-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Wrap an existing connection. Foreign keys are switched off whatever
    /// the SQLite build defaults to; see [`SqliteStore::set_foreign_keys`].
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", false)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Toggle SQLite's foreign key enforcement (off unless asked for)
    pub fn set_foreign_keys(&self, enabled: bool) -> Result<()> {
        self.conn.pragma_update(None, "foreign_keys", enabled)?;
        Ok(())
    }

    /// Direct access for read queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Row count of every table, in schema order
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        TABLES
            .iter()
            .map(|&table| {
                let count = self.conn.query_row(
                    &format!("SELECT COUNT(*) FROM {table}"),
                    [],
                    |row| row.get(0),
                )?;
                Ok((table, count))
            })
            .collect()
    }

    /// Run `bind` for every row inside one transaction
    fn bulk_insert<T, F>(&mut self, sql: &str, rows: &[T], mut bind: F) -> Result<usize>
    where
        F: FnMut(&mut Statement<'_>, &T) -> rusqlite::Result<usize>,
    {
        if rows.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(sql)?;
            for row in rows {
                bind(&mut stmt, row)?;
            }
        }
        tx.commit()?;
        debug!("Inserted {} rows: {}", rows.len(), sql);
        Ok(rows.len())
    }
}

impl Store for SqliteStore {
    fn insert_movies(&mut self, movies: &[Movie]) -> Result<Vec<MovieId>> {
        self.bulk_insert(
            "INSERT INTO movies (id, movie_type_id, title, original_title, is_adult, year, end_year, runtime_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            movies,
            |stmt, m| {
                stmt.execute(params![
                    m.id,
                    m.movie_type.id(),
                    m.title,
                    m.original_title,
                    m.is_adult,
                    m.year,
                    m.end_year,
                    m.runtime_minutes,
                ])
            },
        )?;
        Ok(movies.iter().map(|m| m.id.clone()).collect())
    }

    fn insert_movie_genres(&mut self, links: &[MovieGenre]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO movie_genres (movie_id, genre_id) VALUES (?1, ?2)",
            links,
            |stmt, l| stmt.execute(params![l.movie_id, l.genre.id()]),
        )
    }

    fn insert_persons(&mut self, persons: &[Person]) -> Result<Vec<PersonId>> {
        self.bulk_insert(
            "INSERT INTO persons (id, name, birth_year, death_year) VALUES (?1, ?2, ?3, ?4)",
            persons,
            |stmt, p| stmt.execute(params![p.id, p.name, p.birth_year, p.death_year]),
        )?;
        Ok(persons.iter().map(|p| p.id.clone()).collect())
    }

    fn insert_person_professions(&mut self, links: &[PersonProfession]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO person_professions (person_id, profession_id) VALUES (?1, ?2)",
            links,
            |stmt, l| stmt.execute(params![l.person_id, l.profession.id()]),
        )
    }

    fn insert_person_known_for(&mut self, links: &[PersonKnownFor]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO person_known_for (person_id, movie_id) VALUES (?1, ?2)",
            links,
            |stmt, l| stmt.execute(params![l.person_id, l.movie_id]),
        )
    }

    fn insert_ratings(&mut self, ratings: &[Rating]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO ratings (movie_id, average_rating, num_votes) VALUES (?1, ?2, ?3)",
            ratings,
            |stmt, r| stmt.execute(params![r.movie_id, r.average_rating, r.num_votes]),
        )
    }

    fn insert_crews(&mut self, crews: &[Crew]) -> Result<Vec<CrewId>> {
        let mut ids = Vec::with_capacity(crews.len());
        if crews.is_empty() {
            return Ok(ids);
        }
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO crews (movie_id) VALUES (?1)")?;
            for crew in crews {
                ids.push(stmt.insert(params![crew.movie_id])?);
            }
        }
        tx.commit()?;
        debug!("Inserted {} crews", crews.len());
        Ok(ids)
    }

    fn insert_crew_directors(&mut self, links: &[CrewMember]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO crew_directors (crew_id, person_id) VALUES (?1, ?2)",
            links,
            |stmt, l| stmt.execute(params![l.crew_id, l.person_id]),
        )
    }

    fn insert_crew_writers(&mut self, links: &[CrewMember]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO crew_writers (crew_id, person_id) VALUES (?1, ?2)",
            links,
            |stmt, l| stmt.execute(params![l.crew_id, l.person_id]),
        )
    }

    fn insert_akas(&mut self, akas: &[Akas]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO akas (movie_id, ordering, title, region, language, types, attributes, is_original_title)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            akas,
            |stmt, a| {
                stmt.execute(params![
                    a.movie_id,
                    a.ordering,
                    a.title,
                    a.region,
                    a.language,
                    a.types,
                    a.attributes,
                    a.is_original_title,
                ])
            },
        )
    }

    fn insert_episodes(&mut self, episodes: &[Episode]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO episodes (movie_id, parent_id, season_number, episode_number)
             VALUES (?1, ?2, ?3, ?4)",
            episodes,
            |stmt, e| {
                stmt.execute(params![
                    e.movie_id,
                    e.parent_id,
                    e.season_number,
                    e.episode_number,
                ])
            },
        )
    }

    fn insert_principals(&mut self, principals: &[Principal]) -> Result<usize> {
        self.bulk_insert(
            "INSERT INTO principals (movie_id, ordering, person_id, category, job, characters)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            principals,
            |stmt, p| {
                stmt.execute(params![
                    p.movie_id,
                    p.ordering,
                    p.person_id,
                    p.category,
                    p.job,
                    p.characters,
                ])
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;

    fn movie(id: &str) -> Movie {
        Movie {
            id: id.to_string(),
            movie_type: MovieType::Movie,
            title: "Title".to_string(),
            original_title: "Original".to_string(),
            is_adult: false,
            year: Some(1999),
            end_year: None,
            runtime_minutes: None,
        }
    }

    #[test]
    fn test_reference_tables_seeded() {
        let store = SqliteStore::open_in_memory().unwrap();
        let counts = store.table_counts().unwrap();

        assert_eq!(counts[0], ("genres", Genre::ALL.len() as i64));
        assert_eq!(counts[1], ("professions", Profession::ALL.len() as i64));
        assert_eq!(counts[2], ("movie_types", MovieType::ALL.len() as i64));
        assert!(counts[3..].iter().all(|(_, n)| *n == 0));

        let code: String = store
            .connection()
            .query_row("SELECT code FROM genres WHERE id = ?1", [Genre::SciFi.id()], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(code, "Sci-Fi");
    }

    #[test]
    fn test_migrate_is_repeatable() {
        let store = SqliteStore::open_in_memory().unwrap();
        schema::migrate(store.connection()).unwrap();
        let counts = store.table_counts().unwrap();
        assert_eq!(counts[0].1, Genre::ALL.len() as i64);
    }

    #[test]
    fn test_insert_movies_returns_keys() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let keys = store.insert_movies(&[movie("tt1"), movie("tt2")]).unwrap();
        assert_eq!(keys, vec!["tt1", "tt2"]);

        let end_year: Option<i32> = store
            .connection()
            .query_row("SELECT end_year FROM movies WHERE id = 'tt1'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(end_year, None);
    }

    #[test]
    fn test_duplicate_movie_is_unique_violation() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert_movies(&[movie("tt1")]).unwrap();

        let err = store.insert_movies(&[movie("tt1")]).unwrap_err();
        assert!(err.is_unique_violation(), "unexpected error: {err}");
    }

    #[test]
    fn test_failed_batch_rolls_back_only_itself() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.insert_movies(&[movie("tt1")]).unwrap();
        assert!(store.insert_movies(&[movie("tt2"), movie("tt1")]).is_err());

        let count: i64 = store
            .connection()
            .query_row("SELECT COUNT(*) FROM movies", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_foreign_keys_off_by_default() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let enforced: bool = store
            .connection()
            .query_row("PRAGMA foreign_keys", [], |r| r.get(0))
            .unwrap();
        assert!(!enforced);

        // links to rows that were never loaded are kept as they are
        let rating = Rating {
            movie_id: "tt9999999".to_string(),
            average_rating: 5.7,
            num_votes: 10,
        };
        assert_eq!(store.insert_ratings(&[rating]).unwrap(), 1);
        let link = PersonKnownFor {
            person_id: "nm404".to_string(),
            movie_id: "tt404".to_string(),
        };
        assert_eq!(store.insert_person_known_for(&[link]).unwrap(), 1);
    }

    #[test]
    fn test_file_store_has_foreign_keys_off() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SqliteStore::open(&dir.path().join("imdb.sqlite3")).unwrap();
        let crews = vec![Crew { movie_id: "tt404".to_string() }];
        let ids = store.insert_crews(&crews).unwrap();
        let member = CrewMember {
            crew_id: ids[0],
            person_id: "nm404".to_string(),
        };
        assert_eq!(store.insert_crew_directors(&[member]).unwrap(), 1);
    }

    #[test]
    fn test_crew_keys_are_assigned_in_order() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let crews = vec![
            Crew { movie_id: "tt1".to_string() },
            Crew { movie_id: "tt2".to_string() },
        ];
        let ids = store.insert_crews(&crews).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] < ids[1]);

        let movie_id: String = store
            .connection()
            .query_row("SELECT movie_id FROM crews WHERE id = ?1", [ids[1]], |r| r.get(0))
            .unwrap();
        assert_eq!(movie_id, "tt2");
    }

    #[test]
    fn test_foreign_keys_when_enabled() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let rating = Rating {
            movie_id: "tt404".to_string(),
            average_rating: 7.1,
            num_votes: 10,
        };

        // off by default: ratings load without their movie
        assert_eq!(store.insert_ratings(&[rating.clone()]).unwrap(), 1);

        store.set_foreign_keys(true).unwrap();
        let other = Rating {
            movie_id: "tt405".to_string(),
            ..rating
        };
        assert!(matches!(
            store.insert_ratings(&[other]),
            Err(DataLoadError::DatabaseError(_))
        ));
    }
}
