//! Builder for `name.basics`: persons, their professions and the titles
//! they are known for.

use super::{BatchBuilder, Flushed};
use crate::error::Result;
use crate::loader::Dataset;
use crate::lookup::Lookups;
use crate::parser::{optional_int, required_id, split_codes, split_ids};
use crate::reader::Row;
use crate::store::Store;
use crate::types::{MovieId, Person, PersonKnownFor, PersonProfession, Profession};

const COLUMNS: &[&str] = &[
    "nconst",
    "primaryName",
    "birthYear",
    "deathYear",
    "primaryProfession",
    "knownForTitles",
];

/// Professions and known-for titles of one person
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonLinks {
    pub professions: Vec<Profession>,
    pub known_for: Vec<MovieId>,
}

pub struct PersonsBuilder<'a> {
    lookups: &'a Lookups,
}

impl<'a> PersonsBuilder<'a> {
    pub fn new(lookups: &'a Lookups) -> Self {
        Self { lookups }
    }
}

impl BatchBuilder for PersonsBuilder<'_> {
    type Record = Person;
    type Pending = PersonLinks;

    fn dataset(&self) -> Dataset {
        Dataset::Persons
    }

    fn columns(&self) -> &'static [&'static str] {
        COLUMNS
    }

    fn build(&self, row: &Row) -> Option<(Person, PersonLinks)> {
        let person = Person {
            id: required_id(row.field("nconst"))?,
            name: row.get("primaryName")?.to_string(),
            birth_year: optional_int(row.field("birthYear")),
            death_year: optional_int(row.field("deathYear")),
        };
        let links = PersonLinks {
            professions: split_codes(row.field("primaryProfession"), |code| {
                self.lookups.profession(code)
            }),
            known_for: split_ids(row.field("knownForTitles")),
        };
        Some((person, links))
    }

    fn persist<S: Store + ?Sized>(
        &self,
        store: &mut S,
        records: Vec<Person>,
        pending: Vec<PersonLinks>,
    ) -> Result<Flushed> {
        let keys = store.insert_persons(&records)?;

        let mut professions = Vec::new();
        let mut known_for = Vec::new();
        for (person_id, links) in keys.iter().zip(pending) {
            professions.extend(links.professions.into_iter().map(|profession| {
                PersonProfession {
                    person_id: person_id.clone(),
                    profession,
                }
            }));
            known_for.extend(links.known_for.into_iter().map(|movie_id| PersonKnownFor {
                person_id: person_id.clone(),
                movie_id,
            }));
        }

        let associations = store.insert_person_professions(&professions)?
            + store.insert_person_known_for(&known_for)?;

        Ok(Flushed {
            records: keys.len(),
            associations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_person() {
        let lookups = Lookups::new();
        let builder = PersonsBuilder::new(&lookups);
        let row = Row::from_fields(
            COLUMNS,
            &[
                "nm0000001",
                "Fred Astaire",
                "1899",
                "1987",
                "actor,miscellaneous,producer",
                "tt0072308,tt0050419",
            ],
        );

        let (person, links) = builder.build(&row).unwrap();
        assert_eq!(person.id, "nm0000001");
        assert_eq!(person.name, "Fred Astaire");
        assert_eq!(person.birth_year, Some(1899));
        assert_eq!(person.death_year, Some(1987));
        assert_eq!(
            links.professions,
            vec![Profession::Actor, Profession::Miscellaneous, Profession::Producer]
        );
        assert_eq!(links.known_for, vec!["tt0072308", "tt0050419"]);
    }

    #[test]
    fn test_unknown_professions_dropped() {
        let lookups = Lookups::new();
        let builder = PersonsBuilder::new(&lookups);
        let row = Row::from_fields(
            COLUMNS,
            &["nm0000002", "Nobody", "\\N", "\\N", "juggler,\\N", "\\N"],
        );

        let (person, links) = builder.build(&row).unwrap();
        assert_eq!(person.birth_year, None);
        assert_eq!(person.death_year, None);
        assert_eq!(links, PersonLinks::default());
    }
}
