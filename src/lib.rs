// Film Distribution - Core Library
// Exposes all modules for use in the demo binary and tests

pub mod error;
pub mod entities;
pub mod catalog;
pub mod parser;
pub mod report;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use entities::{
    Person,
    Movie, DistributionMovie,
    User, UserKind, BASE_PRICE,
};
pub use catalog::{
    Catalog, Clock, Eligibility, DenialReason, RentalOutcome, denial_message,
};
pub use parser::{
    RecordParser, MovieRecordParser, UserRecordParser, UserRecord,
    LoadReport, SkippedRecord,
    read_records, load_movies, load_users,
};
pub use report::{
    format_movie_list, format_database, database_json,
    write_movie_list, write_database, write_database_json,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
