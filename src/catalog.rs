// 📼 Catalog - Movies, users and the rental rules between them
//
// The catalog is the single source of truth:
// - Owns every DistributionMovie and User (insertion order, never removed)
// - Issues ids from its own counters (movies and users count separately)
// - Decides eligibility: quota AND age AND availability
// - Executes rentals and answers filtered queries
//
// All lookups are linear scans over the insertion-ordered collections.

use crate::entities::{DistributionMovie, Movie, Person, User, UserKind};
use crate::error::{CatalogError, Result};
use chrono::{Datelike, Local};
use tracing::{debug, info, warn};

// ============================================================================
// CLOCK
// ============================================================================

/// Source of the "current year" used to derive user ages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Wall-clock year, read on every query
    #[default]
    Live,

    /// Fixed as-of year (reproducible runs and tests)
    Fixed(i32),
}

impl Clock {
    pub fn current_year(&self) -> i32 {
        match self {
            Clock::Live => Local::now().year(),
            Clock::Fixed(year) => *year,
        }
    }
}

// ============================================================================
// ELIGIBILITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    QuotaReached,
    TooYoung,
    Unavailable,
}

impl DenialReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::QuotaReached => "rental quota reached",
            DenialReason::TooYoung => "user is younger than the FSK rating",
            DenialReason::Unavailable => "movie is already rented",
        }
    }
}

/// The three rental predicates, each evaluated independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    pub within_quota: bool,
    pub old_enough: bool,
    pub available: bool,
}

impl Eligibility {
    pub fn is_allowed(&self) -> bool {
        self.within_quota && self.old_enough && self.available
    }

    /// Failed predicates, in evaluation order
    pub fn reasons(&self) -> Vec<DenialReason> {
        let mut reasons = Vec::new();
        if !self.within_quota {
            reasons.push(DenialReason::QuotaReached);
        }
        if !self.old_enough {
            reasons.push(DenialReason::TooYoung);
        }
        if !self.available {
            reasons.push(DenialReason::Unavailable);
        }
        reasons
    }
}

/// Log line for a refused rental
pub fn denial_message(user: &User, movie: &DistributionMovie) -> String {
    format!(
        "User {} is not allowed to rent the movie '{}' with Movie-ID {}",
        user.name(),
        movie.title(),
        movie.id()
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum RentalOutcome {
    /// Rental executed at the given price
    Rented { price: f64 },

    /// Rental refused; catalog state unchanged
    Denied { reasons: Vec<DenialReason> },
}

impl RentalOutcome {
    pub fn is_rented(&self) -> bool {
        matches!(self, RentalOutcome::Rented { .. })
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug)]
pub struct Catalog {
    movies: Vec<DistributionMovie>,
    users: Vec<User>,
    next_movie_id: u32,
    next_user_id: u32,
    clock: Clock,
}

impl Catalog {
    /// Empty catalog using the wall-clock year
    pub fn new() -> Self {
        Catalog::with_clock(Clock::Live)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Catalog {
            movies: Vec::new(),
            users: Vec::new(),
            next_movie_id: 1,
            next_user_id: 1,
            clock,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.clock.current_year()
    }

    pub fn movies(&self) -> &[DistributionMovie] {
        &self.movies
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    // ------------------------------------------------------------------------
    // Insertion
    // ------------------------------------------------------------------------

    /// Wrap a movie into a rentable copy with the next movie id.
    /// The copy is not inserted; see `insert_movie`.
    pub fn create_movie(&mut self, movie: Movie) -> DistributionMovie {
        let id = self.mint_movie_id();
        DistributionMovie::new(id, movie)
    }

    /// Append a movie (no dedup, no validation)
    pub fn insert_movie(&mut self, movie: DistributionMovie) {
        debug!(movie_id = movie.id(), title = movie.title(), "movie inserted");
        self.movies.push(movie);
    }

    /// Create + insert, returns the new id
    pub fn add_movie(&mut self, movie: Movie) -> u32 {
        let copy = self.create_movie(movie);
        let id = copy.id();
        self.insert_movie(copy);
        id
    }

    pub fn insert_user(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_year: i32,
        kind: UserKind,
    ) -> u32 {
        let id = self.next_user_id;
        self.next_user_id += 1;

        let user = User::new(id, Person::new(first_name, last_name), birth_year, kind);
        debug!(user_id = id, kind = kind.as_str(), "user inserted");
        self.users.push(user);
        id
    }

    /// Insert by numeric type code (1 = Standard, 2 = Premium).
    /// Unknown codes insert nothing.
    pub fn insert_user_code(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_year: i32,
        code: u8,
    ) -> Result<u32> {
        let kind = UserKind::from_code(code)?;
        Ok(self.insert_user(first_name, last_name, birth_year, kind))
    }

    fn mint_movie_id(&mut self) -> u32 {
        let id = self.next_movie_id;
        self.next_movie_id += 1;
        id
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id() == id)
    }

    pub fn movie(&self, id: u32) -> Option<&DistributionMovie> {
        self.movies.iter().find(|m| m.id() == id)
    }

    pub fn require_user(&self, id: u32) -> Result<&User> {
        self.user(id).ok_or(CatalogError::UserNotFound(id))
    }

    pub fn require_movie(&self, id: u32) -> Result<&DistributionMovie> {
        self.movie(id).ok_or(CatalogError::MovieNotFound(id))
    }

    fn user_index(&self, id: u32) -> Result<usize> {
        self.users
            .iter()
            .position(|u| u.id() == id)
            .ok_or(CatalogError::UserNotFound(id))
    }

    fn movie_index(&self, id: u32) -> Result<usize> {
        self.movies
            .iter()
            .position(|m| m.id() == id)
            .ok_or(CatalogError::MovieNotFound(id))
    }

    pub fn user_age(&self, user_id: u32) -> Result<i32> {
        Ok(self.require_user(user_id)?.age(self.current_year()))
    }

    pub fn price_for_next_movie(&self, user_id: u32) -> Result<f64> {
        Ok(self.require_user(user_id)?.price_for_next_movie())
    }

    /// Movies currently held by a user, in rental order
    pub fn rented_movies(&self, user_id: u32) -> Result<Vec<&DistributionMovie>> {
        let user = self.require_user(user_id)?;
        user.rented_movie_ids()
            .iter()
            .map(|id| self.require_movie(*id))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Rental
    // ------------------------------------------------------------------------

    /// Evaluate all three predicates for a user/movie pair
    pub fn check_rental(&self, user_id: u32, movie_id: u32) -> Result<Eligibility> {
        let user = self.require_user(user_id)?;
        let movie = self.require_movie(movie_id)?;

        Ok(Eligibility {
            within_quota: user.can_rent_another(),
            old_enough: user.is_old_enough(self.current_year(), movie.fsk()),
            available: movie.is_available(),
        })
    }

    pub fn is_allowed_to_rent(&self, user_id: u32, movie_id: u32) -> Result<bool> {
        Ok(self.check_rental(user_id, movie_id)?.is_allowed())
    }

    /// Rent a movie if eligible. A refusal is logged and reported in the
    /// outcome; only unknown ids are errors.
    pub fn rent_movie(&mut self, user_id: u32, movie_id: u32) -> Result<RentalOutcome> {
        let eligibility = self.check_rental(user_id, movie_id)?;
        let user_idx = self.user_index(user_id)?;
        let movie_idx = self.movie_index(movie_id)?;

        if !eligibility.is_allowed() {
            warn!(
                user_id,
                movie_id,
                "{}",
                denial_message(&self.users[user_idx], &self.movies[movie_idx])
            );
            return Ok(RentalOutcome::Denied {
                reasons: eligibility.reasons(),
            });
        }

        let user = &mut self.users[user_idx];
        let price = user.price_for_next_movie();
        user.rent(movie_id);
        self.movies[movie_idx].mark_rented();

        info!(user_id, movie_id, price, "movie rented");
        Ok(RentalOutcome::Rented { price })
    }

    /// New rentable copy of an existing movie under a fresh id.
    /// The copy is available regardless of the source and is not inserted.
    pub fn duplicate_movie(&mut self, id: u32) -> Result<DistributionMovie> {
        let idx = self.movie_index(id)?;
        let new_id = self.mint_movie_id();
        Ok(DistributionMovie::copy_of(new_id, &self.movies[idx]))
    }

    // ------------------------------------------------------------------------
    // Queries (catalog order)
    // ------------------------------------------------------------------------

    /// Movies with `low <= fsk <= high`
    pub fn search_fsk(&self, low: u32, high: u32) -> Vec<&DistributionMovie> {
        self.movies
            .iter()
            .filter(|m| (low..=high).contains(&m.fsk()))
            .collect()
    }

    pub fn search_genre(&self, genre: &str) -> Vec<&DistributionMovie> {
        self.movies
            .iter()
            .filter(|m| m.movie().genre_contains(genre))
            .collect()
    }

    /// Movies whose director or any actor has `name` in their name
    pub fn search_name(&self, name: &str) -> Vec<&DistributionMovie> {
        self.movies
            .iter()
            .filter(|m| m.movie().features_name(name))
            .collect()
    }

    /// Available movies the user is old enough for
    pub fn available_movies_for(&self, user_id: u32) -> Result<Vec<&DistributionMovie>> {
        let user = self.require_user(user_id)?;
        let year = self.current_year();

        Ok(self
            .movies
            .iter()
            .filter(|m| m.is_available() && user.is_old_enough(year, m.fsk()))
            .collect())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
