//! Code → variant tables for the reference enums.
//!
//! Built once when a load starts and handed to the builders by reference.

use crate::types::{Genre, MovieType, Profession};
use std::collections::HashMap;

/// Resolves dataset codes ("Drama", "actor", "tvSeries") to enum variants
#[derive(Debug, Clone)]
pub struct Lookups {
    genres: HashMap<&'static str, Genre>,
    professions: HashMap<&'static str, Profession>,
    movie_types: HashMap<&'static str, MovieType>,
}

impl Lookups {
    pub fn new() -> Self {
        Self {
            genres: Genre::ALL.iter().map(|&g| (g.code(), g)).collect(),
            professions: Profession::ALL.iter().map(|&p| (p.code(), p)).collect(),
            movie_types: MovieType::ALL.iter().map(|&t| (t.code(), t)).collect(),
        }
    }

    pub fn genre(&self, code: &str) -> Option<Genre> {
        self.genres.get(code).copied()
    }

    pub fn profession(&self, code: &str) -> Option<Profession> {
        self.professions.get(code).copied()
    }

    /// Unknown title types fall back to `MovieType::NoType`
    pub fn movie_type(&self, code: &str) -> MovieType {
        self.movie_types.get(code).copied().unwrap_or_default()
    }
}

impl Default for Lookups {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_codes() {
        let lookups = Lookups::new();
        assert_eq!(lookups.genre("Drama"), Some(Genre::Drama));
        assert_eq!(lookups.genre("Sci-Fi"), Some(Genre::SciFi));
        assert_eq!(lookups.profession("actor"), Some(Profession::Actor));
        assert_eq!(lookups.profession("make_up_department"), Some(Profession::MakeUpDepartment));
        assert_eq!(lookups.movie_type("tvSeries"), MovieType::TvSeries);
    }

    #[test]
    fn test_unknown_codes() {
        let lookups = Lookups::new();
        assert_eq!(lookups.genre("drama"), None);
        assert_eq!(lookups.genre("\\N"), None);
        assert_eq!(lookups.profession(""), None);
        assert_eq!(lookups.movie_type("radioPlay"), MovieType::NoType);
    }
}
