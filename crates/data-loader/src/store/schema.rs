//! Relational schema and reference data.
//!
//! `migrate` is idempotent: tables are created if missing and the lookup
//! tables are seeded with `INSERT OR IGNORE`, so it runs before every load
//! without touching previously loaded rows.

use crate::error::Result;
use crate::types::{Genre, MovieType, Profession};
use rusqlite::{Connection, params};

/// Every table, reference tables first
pub const TABLES: [&str; 15] = [
    "genres",
    "professions",
    "movie_types",
    "movies",
    "movie_genres",
    "persons",
    "person_professions",
    "person_known_for",
    "ratings",
    "crews",
    "crew_directors",
    "crew_writers",
    "akas",
    "episodes",
    "principals",
];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS genres (
    id      INTEGER PRIMARY KEY,
    code    TEXT NOT NULL UNIQUE,
    title   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS professions (
    id      INTEGER PRIMARY KEY,
    code    TEXT NOT NULL UNIQUE,
    title   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS movie_types (
    id      INTEGER PRIMARY KEY,
    code    TEXT NOT NULL UNIQUE,
    title   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS movies (
    id              TEXT PRIMARY KEY,
    movie_type_id   INTEGER NOT NULL REFERENCES movie_types(id),
    title           TEXT NOT NULL,
    original_title  TEXT NOT NULL,
    is_adult        INTEGER NOT NULL DEFAULT 0,
    year            INTEGER,
    end_year        INTEGER,
    runtime_minutes INTEGER
);

CREATE TABLE IF NOT EXISTS movie_genres (
    movie_id    TEXT NOT NULL REFERENCES movies(id),
    genre_id    INTEGER NOT NULL REFERENCES genres(id),
    PRIMARY KEY (movie_id, genre_id)
);

CREATE TABLE IF NOT EXISTS persons (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    birth_year  INTEGER,
    death_year  INTEGER
);

CREATE TABLE IF NOT EXISTS person_professions (
    person_id       TEXT NOT NULL REFERENCES persons(id),
    profession_id   INTEGER NOT NULL REFERENCES professions(id),
    PRIMARY KEY (person_id, profession_id)
);

CREATE TABLE IF NOT EXISTS person_known_for (
    person_id   TEXT NOT NULL REFERENCES persons(id),
    movie_id    TEXT NOT NULL REFERENCES movies(id),
    PRIMARY KEY (person_id, movie_id)
);

CREATE TABLE IF NOT EXISTS ratings (
    movie_id        TEXT PRIMARY KEY REFERENCES movies(id),
    average_rating  REAL NOT NULL,
    num_votes       INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS crews (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id    TEXT NOT NULL UNIQUE REFERENCES movies(id)
);

CREATE TABLE IF NOT EXISTS crew_directors (
    crew_id     INTEGER NOT NULL REFERENCES crews(id),
    person_id   TEXT NOT NULL REFERENCES persons(id),
    PRIMARY KEY (crew_id, person_id)
);

CREATE TABLE IF NOT EXISTS crew_writers (
    crew_id     INTEGER NOT NULL REFERENCES crews(id),
    person_id   TEXT NOT NULL REFERENCES persons(id),
    PRIMARY KEY (crew_id, person_id)
);

CREATE TABLE IF NOT EXISTS akas (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id            TEXT NOT NULL REFERENCES movies(id),
    ordering            INTEGER NOT NULL,
    title               TEXT NOT NULL,
    region              TEXT,
    language            TEXT,
    types               TEXT,
    attributes          TEXT,
    is_original_title   INTEGER NOT NULL DEFAULT 0,
    UNIQUE (movie_id, ordering)
);

CREATE TABLE IF NOT EXISTS episodes (
    movie_id        TEXT PRIMARY KEY REFERENCES movies(id),
    parent_id       TEXT NOT NULL REFERENCES movies(id),
    season_number   INTEGER,
    episode_number  INTEGER
);

CREATE TABLE IF NOT EXISTS principals (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    movie_id    TEXT NOT NULL REFERENCES movies(id),
    ordering    INTEGER NOT NULL,
    person_id   TEXT NOT NULL REFERENCES persons(id),
    category    TEXT NOT NULL,
    job         TEXT NOT NULL,
    characters  TEXT NOT NULL,
    UNIQUE (movie_id, ordering)
);
";

/// Create all tables and seed the reference tables
pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    seed_reference_tables(conn)?;
    Ok(())
}

fn seed_reference_tables(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO genres (id, code, title) VALUES (?1, ?2, ?3)")?;
    for genre in Genre::ALL {
        stmt.execute(params![genre.id(), genre.code(), genre.title()])?;
    }

    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO professions (id, code, title) VALUES (?1, ?2, ?3)")?;
    for profession in Profession::ALL {
        stmt.execute(params![profession.id(), profession.code(), profession.title()])?;
    }

    let mut stmt =
        conn.prepare("INSERT OR IGNORE INTO movie_types (id, code, title) VALUES (?1, ?2, ?3)")?;
    for movie_type in MovieType::ALL {
        stmt.execute(params![movie_type.id(), movie_type.code(), movie_type.title()])?;
    }

    Ok(())
}
