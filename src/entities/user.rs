// 🧑 User Entity - Renter with quota and pricing policy
//
// Two kinds of users share the same shape and differ only in policy:
// - Standard: 5 movies, each next movie costs 0.5 more than the previous one
// - Premium: 100 movies, every movie costs 0.5
//
// Price is always for the NEXT rental. Infinity means "quota reached", it is
// never charged.

use crate::entities::person::Person;
use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};

/// Base price unit for one rental
pub const BASE_PRICE: f64 = 0.5;

// ============================================================================
// USER KIND
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserKind {
    Standard,
    Premium,
}

impl UserKind {
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(UserKind::Standard),
            2 => Ok(UserKind::Premium),
            other => Err(CatalogError::UnknownUserType(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Standard => "Standard",
            UserKind::Premium => "Premium",
        }
    }

    /// Maximum number of movies a user of this kind may rent
    pub fn quota(&self) -> usize {
        match self {
            UserKind::Standard => 5,
            UserKind::Premium => 100,
        }
    }

    /// Price of the next rental given how many movies are already rented
    pub fn price_for_next_movie(&self, rented: usize) -> f64 {
        if rented >= self.quota() {
            return f64::INFINITY;
        }

        match self {
            UserKind::Standard => BASE_PRICE * (rented + 1) as f64,
            UserKind::Premium => BASE_PRICE,
        }
    }
}

// ============================================================================
// USER ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Catalog-issued id, independent of movie ids
    id: u32,

    #[serde(flatten)]
    person: Person,

    birth_year: i32,
    kind: UserKind,

    /// Ids of rented movies; the catalog owns the movies themselves
    rented: Vec<u32>,
}

impl User {
    pub(crate) fn new(id: u32, person: Person, birth_year: i32, kind: UserKind) -> Self {
        User {
            id,
            person,
            birth_year,
            kind,
            rented: Vec::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> String {
        self.person.name()
    }

    pub fn kind(&self) -> UserKind {
        self.kind
    }

    /// Age in the given calendar year
    pub fn age(&self, year: i32) -> i32 {
        year - self.birth_year
    }

    /// Age check against an FSK rating, compared without narrowing
    pub fn is_old_enough(&self, year: i32, fsk: u32) -> bool {
        i64::from(self.age(year)) >= i64::from(fsk)
    }

    pub fn quota(&self) -> usize {
        self.kind.quota()
    }

    pub fn rented_count(&self) -> usize {
        self.rented.len()
    }

    pub fn rented_movie_ids(&self) -> &[u32] {
        &self.rented
    }

    pub fn can_rent_another(&self) -> bool {
        self.rented_count() < self.quota()
    }

    pub fn has_rented(&self, movie_id: u32) -> bool {
        self.rented.contains(&movie_id)
    }

    /// Unconditional append; the catalog checks eligibility first
    pub(crate) fn rent(&mut self, movie_id: u32) {
        self.rented.push(movie_id);
    }

    pub fn price_for_next_movie(&self) -> f64 {
        self.kind.price_for_next_movie(self.rented_count())
    }

    /// One-line summary used by the database dump
    pub fn describe(&self, year: i32) -> String {
        format!(
            "{}: {} (Age={}) has rented {} of {} movies.",
            self.id,
            self.name(),
            self.age(year),
            self.rented_count(),
            self.quota()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(kind: UserKind) -> User {
        User::new(1, Person::new("Max", "Mustermann"), 1990, kind)
    }

    #[test]
    fn test_standard_price_increases_until_quota() {
        let mut max = user(UserKind::Standard);
        let mut prices = Vec::new();

        for movie_id in 1..=5 {
            prices.push(max.price_for_next_movie());
            max.rent(movie_id);
        }

        assert_eq!(prices, vec![0.5, 1.0, 1.5, 2.0, 2.5]);
        assert!(!max.can_rent_another());
        assert_eq!(max.price_for_next_movie(), f64::INFINITY);
    }

    #[test]
    fn test_premium_price_is_flat() {
        let kind = UserKind::Premium;

        for rented in 0..100 {
            assert_eq!(kind.price_for_next_movie(rented), 0.5);
        }
        assert_eq!(kind.price_for_next_movie(100), f64::INFINITY);
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(UserKind::from_code(1).unwrap(), UserKind::Standard);
        assert_eq!(UserKind::from_code(2).unwrap(), UserKind::Premium);
        assert!(matches!(
            UserKind::from_code(3),
            Err(CatalogError::UnknownUserType(3))
        ));
    }

    #[test]
    fn test_age_and_summary() {
        let mut max = user(UserKind::Standard);
        max.rent(4);

        assert_eq!(max.age(2026), 36);
        assert!(max.is_old_enough(2026, 18));
        assert!(!max.is_old_enough(2026, 37));
        assert!(!max.is_old_enough(2026, u32::MAX));
        assert!(max.has_rented(4));
        assert!(!max.has_rented(5));
        assert_eq!(
            max.describe(2026),
            "1: Max Mustermann (Age=36) has rented 1 of 5 movies."
        );
    }
}
