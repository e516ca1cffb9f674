//! Core domain types for the IMDb datasets.
//!
//! Two families of types live here:
//! - reference enums (`Genre`, `Profession`, `MovieType`) mirroring the
//!   seeded lookup tables, each variant carrying a stable integer id, the
//!   code used in the dataset files and a display title
//! - row types produced by the builders and written by a `Store`

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// External title identifier, e.g. "tt0000001"
pub type MovieId = String;

/// External person identifier, e.g. "nm0000001"
pub type PersonId = String;

/// Key assigned by the store when a crew row is inserted
pub type CrewId = i64;

// =============================================================================
// Reference Enums
// =============================================================================

/// Movie genres as they appear in `title.basics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action = 1,
    Adult,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Family,
    Fantasy,
    FilmNoir,
    GameShow,
    History,
    Horror,
    Music,
    Musical,
    Mystery,
    News,
    RealityTv,
    Romance,
    SciFi,
    Short,
    Sport,
    TalkShow,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 28] = [
        Genre::Action,
        Genre::Adult,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Family,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::GameShow,
        Genre::History,
        Genre::Horror,
        Genre::Music,
        Genre::Musical,
        Genre::Mystery,
        Genre::News,
        Genre::RealityTv,
        Genre::Romance,
        Genre::SciFi,
        Genre::Short,
        Genre::Sport,
        Genre::TalkShow,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Primary key in the `genres` table
    pub fn id(self) -> i64 {
        self as i64
    }

    /// Code used in the dataset files
    pub fn code(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adult => "Adult",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Family => "Family",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::GameShow => "Game-Show",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Music => "Music",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::News => "News",
            Genre::RealityTv => "Reality-TV",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Short => "Short",
            Genre::Sport => "Sport",
            Genre::TalkShow => "Talk-Show",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Display title; dataset codes already read well as titles
    pub fn title(self) -> &'static str {
        self.code()
    }
}

/// Primary professions as they appear in `name.basics`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Actor = 1,
    Actress,
    AnimationDepartment,
    ArchiveFootage,
    ArchiveSound,
    ArtDepartment,
    ArtDirector,
    Assistant,
    AssistantDirector,
    CameraDepartment,
    CastingDepartment,
    CastingDirector,
    Choreographer,
    Cinematographer,
    Composer,
    CostumeDepartment,
    CostumeDesigner,
    Director,
    Editor,
    EditorialDepartment,
    ElectricalDepartment,
    Executive,
    Legal,
    LocationManagement,
    MakeUpDepartment,
    Manager,
    Miscellaneous,
    MusicArtist,
    MusicDepartment,
    Podcaster,
    Producer,
    ProductionDepartment,
    ProductionDesigner,
    ProductionManager,
    Publicist,
    ScriptDepartment,
    SetDecorator,
    SoundDepartment,
    Soundtrack,
    SpecialEffects,
    Stunts,
    TalentAgent,
    TransportationDepartment,
    VisualEffects,
    Writer,
}

impl Profession {
    pub const ALL: [Profession; 45] = [
        Profession::Actor,
        Profession::Actress,
        Profession::AnimationDepartment,
        Profession::ArchiveFootage,
        Profession::ArchiveSound,
        Profession::ArtDepartment,
        Profession::ArtDirector,
        Profession::Assistant,
        Profession::AssistantDirector,
        Profession::CameraDepartment,
        Profession::CastingDepartment,
        Profession::CastingDirector,
        Profession::Choreographer,
        Profession::Cinematographer,
        Profession::Composer,
        Profession::CostumeDepartment,
        Profession::CostumeDesigner,
        Profession::Director,
        Profession::Editor,
        Profession::EditorialDepartment,
        Profession::ElectricalDepartment,
        Profession::Executive,
        Profession::Legal,
        Profession::LocationManagement,
        Profession::MakeUpDepartment,
        Profession::Manager,
        Profession::Miscellaneous,
        Profession::MusicArtist,
        Profession::MusicDepartment,
        Profession::Podcaster,
        Profession::Producer,
        Profession::ProductionDepartment,
        Profession::ProductionDesigner,
        Profession::ProductionManager,
        Profession::Publicist,
        Profession::ScriptDepartment,
        Profession::SetDecorator,
        Profession::SoundDepartment,
        Profession::Soundtrack,
        Profession::SpecialEffects,
        Profession::Stunts,
        Profession::TalentAgent,
        Profession::TransportationDepartment,
        Profession::VisualEffects,
        Profession::Writer,
    ];

    /// Primary key in the `professions` table
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn code(self) -> &'static str {
        self.entry().0
    }

    pub fn title(self) -> &'static str {
        self.entry().1
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            Profession::Actor => ("actor", "Actor"),
            Profession::Actress => ("actress", "Actress"),
            Profession::AnimationDepartment => ("animation_department", "Animation Department"),
            Profession::ArchiveFootage => ("archive_footage", "Archive Footage"),
            Profession::ArchiveSound => ("archive_sound", "Archive Sound"),
            Profession::ArtDepartment => ("art_department", "Art Department"),
            Profession::ArtDirector => ("art_director", "Art Director"),
            Profession::Assistant => ("assistant", "Assistant"),
            Profession::AssistantDirector => ("assistant_director", "Assistant Director"),
            Profession::CameraDepartment => ("camera_department", "Camera Department"),
            Profession::CastingDepartment => ("casting_department", "Casting Department"),
            Profession::CastingDirector => ("casting_director", "Casting Director"),
            Profession::Choreographer => ("choreographer", "Choreographer"),
            Profession::Cinematographer => ("cinematographer", "Cinematographer"),
            Profession::Composer => ("composer", "Composer"),
            Profession::CostumeDepartment => ("costume_department", "Costume Department"),
            Profession::CostumeDesigner => ("costume_designer", "Costume Designer"),
            Profession::Director => ("director", "Director"),
            Profession::Editor => ("editor", "Editor"),
            Profession::EditorialDepartment => ("editorial_department", "Editorial Department"),
            Profession::ElectricalDepartment => ("electrical_department", "Electrical Department"),
            Profession::Executive => ("executive", "Executive"),
            Profession::Legal => ("legal", "Legal"),
            Profession::LocationManagement => ("location_management", "Location Management"),
            Profession::MakeUpDepartment => ("make_up_department", "Make-Up Department"),
            Profession::Manager => ("manager", "Manager"),
            Profession::Miscellaneous => ("miscellaneous", "Miscellaneous"),
            Profession::MusicArtist => ("music_artist", "Music Artist"),
            Profession::MusicDepartment => ("music_department", "Music Department"),
            Profession::Podcaster => ("podcaster", "Podcaster"),
            Profession::Producer => ("producer", "Producer"),
            Profession::ProductionDepartment => ("production_department", "Production Department"),
            Profession::ProductionDesigner => ("production_designer", "Production Designer"),
            Profession::ProductionManager => ("production_manager", "Production Manager"),
            Profession::Publicist => ("publicist", "Publicist"),
            Profession::ScriptDepartment => ("script_department", "Script Department"),
            Profession::SetDecorator => ("set_decorator", "Set Decorator"),
            Profession::SoundDepartment => ("sound_department", "Sound Department"),
            Profession::Soundtrack => ("soundtrack", "Soundtrack"),
            Profession::SpecialEffects => ("special_effects", "Special Effects"),
            Profession::Stunts => ("stunts", "Stunts"),
            Profession::TalentAgent => ("talent_agent", "Talent Agent"),
            Profession::TransportationDepartment => {
                ("transportation_department", "Transportation Department")
            }
            Profession::VisualEffects => ("visual_effects", "Visual Effects"),
            Profession::Writer => ("writer", "Writer"),
        }
    }
}

/// Title types from `title.basics`.
///
/// `NoType` is what a movie gets when its `titleType` is not one of the
/// known codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovieType {
    #[default]
    NoType = 1,
    Movie,
    Short,
    TvEpisode,
    TvMiniSeries,
    TvMovie,
    TvPilot,
    TvSeries,
    TvShort,
    TvSpecial,
    Video,
    VideoGame,
}

impl MovieType {
    pub const ALL: [MovieType; 12] = [
        MovieType::NoType,
        MovieType::Movie,
        MovieType::Short,
        MovieType::TvEpisode,
        MovieType::TvMiniSeries,
        MovieType::TvMovie,
        MovieType::TvPilot,
        MovieType::TvSeries,
        MovieType::TvShort,
        MovieType::TvSpecial,
        MovieType::Video,
        MovieType::VideoGame,
    ];

    /// Primary key in the `movie_types` table
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn code(self) -> &'static str {
        self.entry().0
    }

    pub fn title(self) -> &'static str {
        self.entry().1
    }

    fn entry(self) -> (&'static str, &'static str) {
        match self {
            MovieType::NoType => ("no_type", "No Type"),
            MovieType::Movie => ("movie", "Movie"),
            MovieType::Short => ("short", "Short"),
            MovieType::TvEpisode => ("tvEpisode", "TV Episode"),
            MovieType::TvMiniSeries => ("tvMiniSeries", "TV Mini Series"),
            MovieType::TvMovie => ("tvMovie", "TV Movie"),
            MovieType::TvPilot => ("tvPilot", "TV Pilot"),
            MovieType::TvSeries => ("tvSeries", "TV Series"),
            MovieType::TvShort => ("tvShort", "TV Short"),
            MovieType::TvSpecial => ("tvSpecial", "TV Special"),
            MovieType::Video => ("video", "Video"),
            MovieType::VideoGame => ("videoGame", "Video Game"),
        }
    }
}

// =============================================================================
// Primary Rows
// =============================================================================

/// A title from `title.basics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub movie_type: MovieType,
    pub title: String,
    pub original_title: String,
    pub is_adult: bool,
    /// `startYear` in the dataset
    pub year: Option<i32>,
    /// Only set for series
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
}

/// A person from `name.basics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// Aggregate rating of a title, one per movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub movie_id: MovieId,
    pub average_rating: f64,
    pub num_votes: i64,
}

/// Crew of a title. Directors and writers hang off the key the store
/// assigns to this row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crew {
    pub movie_id: MovieId,
}

/// Alternate title from `title.akas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Akas {
    pub movie_id: MovieId,
    pub ordering: i32,
    pub title: String,
    pub region: Option<String>,
    pub language: Option<String>,
    pub types: Option<String>,
    pub attributes: Option<String>,
    pub is_original_title: bool,
}

/// Episode of a series from `title.episode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub movie_id: MovieId,
    pub parent_id: MovieId,
    pub season_number: Option<i32>,
    pub episode_number: Option<i32>,
}

/// Principal cast or crew member from `title.principals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub movie_id: MovieId,
    pub ordering: i32,
    pub person_id: PersonId,
    pub category: String,
    pub job: String,
    pub characters: String,
}

// =============================================================================
// Association Rows
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieGenre {
    pub movie_id: MovieId,
    pub genre: Genre,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfession {
    pub person_id: PersonId,
    pub profession: Profession,
}

/// "Known for" link; the movie is not required to exist in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonKnownFor {
    pub person_id: PersonId,
    pub movie_id: MovieId,
}

/// Director or writer of a crew
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub crew_id: CrewId,
    pub person_id: PersonId,
}
