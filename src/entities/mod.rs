// Entity Models
//
// - Person: name value shared by directors, actors and users
// - Movie / DistributionMovie: descriptive value + rentable copy with catalog id
// - User / UserKind: renter with quota and pricing policy

pub mod person;
pub mod movie;
pub mod user;

pub use person::Person;
pub use movie::{Movie, DistributionMovie};
pub use user::{User, UserKind, BASE_PRICE};
