// 🎬 Movie Entity - Descriptive value + rentable copy
//
// "Movie is a VALUE (never changes), DistributionMovie is an IDENTITY (id + availability)"
//
// - Movie: title, year, genre, FSK rating, director, three actors
// - DistributionMovie: one rentable copy of a Movie, identified by a catalog-issued id
// - Copying a DistributionMovie copies the Movie, never the id or availability

use crate::entities::person::Person;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// MOVIE (descriptive value)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub genre: String,

    /// Minimum age required to rent (FSK rating)
    pub fsk: u32,

    pub director: Person,
    pub actors: [Person; 3],
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        fsk: u32,
        director: Person,
        actors: [Person; 3],
    ) -> Self {
        Movie {
            title: title.into(),
            year,
            genre: genre.into(),
            fsk,
            director,
            actors,
        }
    }

    /// Case-insensitive substring match on the genre
    pub fn genre_contains(&self, needle: &str) -> bool {
        self.genre.to_lowercase().contains(&needle.to_lowercase())
    }

    /// True if the director or any actor has `needle` in their name
    pub fn features_name(&self, needle: &str) -> bool {
        self.director.name_contains(needle) || self.actors.iter().any(|a| a.name_contains(needle))
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.title, self.year)?;
        writeln!(f, "Genre: {}", self.genre)?;
        writeln!(f, "FSK: {}", self.fsk)?;
        writeln!(f, "Director: {}", self.director)?;
        writeln!(
            f,
            "Actor: {}, {}, {}",
            self.actors[0], self.actors[1], self.actors[2]
        )
    }
}

// ============================================================================
// DISTRIBUTION MOVIE (rentable copy)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionMovie {
    /// Catalog-issued id, assigned once, never reused
    id: u32,

    available: bool,

    #[serde(flatten)]
    movie: Movie,
}

impl DistributionMovie {
    /// Only the catalog mints ids, see `Catalog::create_movie`
    pub(crate) fn new(id: u32, movie: Movie) -> Self {
        DistributionMovie {
            id,
            available: true,
            movie,
        }
    }

    /// New copy of `other` under a fresh id; availability starts over
    pub(crate) fn copy_of(id: u32, other: &DistributionMovie) -> Self {
        DistributionMovie::new(id, other.movie.clone())
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn mark_rented(&mut self) {
        self.available = false;
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn title(&self) -> &str {
        &self.movie.title
    }

    pub fn fsk(&self) -> u32 {
        self.movie.fsk
    }
}

impl fmt::Display for DistributionMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.available { "" } else { " is rented" };
        writeln!(f, "ID: {}{}", self.id, status)?;
        write!(f, "{}", self.movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn terminal() -> Movie {
        Movie::new(
            "The Terminal",
            2004,
            "Drama",
            0,
            Person::new("Steven", "Spielberg"),
            [
                Person::new("Tom", "Hanks"),
                Person::new("Chi", "McBride"),
                Person::new("Stanley", "Tucci"),
            ],
        )
    }

    #[test]
    fn test_movie_block_format() {
        let mut copy = DistributionMovie::new(1, terminal());

        assert_eq!(
            copy.to_string(),
            "ID: 1\n\
             The Terminal (2004)\n\
             Genre: Drama\n\
             FSK: 0\n\
             Director: Steven Spielberg\n\
             Actor: Tom Hanks, Chi McBride, Stanley Tucci\n"
        );

        copy.mark_rented();
        assert!(copy.to_string().starts_with("ID: 1 is rented\n"));
    }

    #[test]
    fn test_copy_resets_identity_and_availability() {
        let mut original = DistributionMovie::new(1, terminal());
        original.mark_rented();

        let copy = DistributionMovie::copy_of(9, &original);

        assert_eq!(copy.id(), 9);
        assert!(copy.is_available());
        assert_eq!(copy.movie(), original.movie());
    }

    #[test]
    fn test_name_search_covers_director_and_cast() {
        let movie = terminal();

        assert!(movie.features_name("spielberg"));
        assert!(movie.features_name("TUCCI"));
        assert!(!movie.features_name("Tarantino"));
    }
}
