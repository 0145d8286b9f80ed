// 🏗️ Record Parsers - semicolon-delimited movie and user files
//
// Movie line: title;year;genre;fsk;First Last;First Last,First Last,First Last
// User line:  First Last;birthYear;typeCode   (1 = Standard, 2 = Premium)
//
// A missing file fails the whole load. A malformed line is skipped, logged
// and reported, so one bad record does not hide the good ones.

use crate::catalog::Catalog;
use crate::entities::{Movie, Person, UserKind};
use crate::error::{CatalogError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// CORE TYPES
// ============================================================================

/// User line before the catalog assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub person: Person,
    pub birth_year: i32,
    pub kind: UserKind,
}

/// A line that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub line: usize,
    pub reason: String,
}

/// Result of loading one file into the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

// ============================================================================
// PARSER TRAIT
// ============================================================================

/// Turns one delimited line into a typed record
pub trait RecordParser {
    type Record;

    /// Human-readable record kind for logs ("movie", "user")
    fn kind(&self) -> &str;

    /// Parse one line; `line` is 1-based and only used for diagnostics
    fn parse_record(&self, record: &StringRecord, line: usize) -> Result<Self::Record>;
}

pub struct MovieRecordParser;

impl RecordParser for MovieRecordParser {
    type Record = Movie;

    fn kind(&self) -> &str {
        "movie"
    }

    fn parse_record(&self, record: &StringRecord, line: usize) -> Result<Movie> {
        expect_fields(record, 6, line)?;

        let title = field(record, 0);
        let year = parse_number::<i32>(field(record, 1), "year", line)?;
        let genre = field(record, 2);
        let fsk = parse_number::<u32>(field(record, 3), "FSK", line)?;
        let director = parse_person(field(record, 4), line)?;

        let actors: Vec<Person> = field(record, 5)
            .split(',')
            .map(|name| parse_person(name, line))
            .collect::<Result<_>>()?;
        let actors: [Person; 3] = actors.try_into().map_err(|found: Vec<Person>| {
            malformed(line, format!("expected 3 actors, found {}", found.len()))
        })?;

        Ok(Movie::new(title, year, genre, fsk, director, actors))
    }
}

pub struct UserRecordParser;

impl RecordParser for UserRecordParser {
    type Record = UserRecord;

    fn kind(&self) -> &str {
        "user"
    }

    fn parse_record(&self, record: &StringRecord, line: usize) -> Result<UserRecord> {
        expect_fields(record, 3, line)?;

        let person = parse_person(field(record, 0), line)?;
        let birth_year = parse_number::<i32>(field(record, 1), "birth year", line)?;
        let code = parse_number::<u8>(field(record, 2), "user type", line)?;
        let kind = UserKind::from_code(code)?;

        Ok(UserRecord {
            person,
            birth_year,
            kind,
        })
    }
}

// ============================================================================
// READING
// ============================================================================

/// Parse every line from a reader, splitting good records from skipped ones
pub fn read_records<P, R>(parser: &P, reader: R) -> (Vec<P::Record>, Vec<SkippedRecord>)
where
    P: RecordParser,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let fallback_line = index + 1;
        let outcome = match result {
            Ok(record) => {
                let line = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line);
                parser.parse_record(&record, line).map_err(|e| (line, e))
            }
            Err(e) => Err((fallback_line, CatalogError::from(e))),
        };

        match outcome {
            Ok(record) => records.push(record),
            Err((line, error)) => {
                let reason = match error {
                    CatalogError::MalformedRecord { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(line, "Skipping {} record: {}", parser.kind(), reason);
                skipped.push(SkippedRecord { line, reason });
            }
        }
    }

    (records, skipped)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound(path.to_path_buf()),
        _ => CatalogError::Io(e),
    })
}

/// Load a movie file; each movie gets the next catalog id
pub fn load_movies(catalog: &mut Catalog, path: &Path) -> Result<LoadReport> {
    let file = open_input(path)?;
    let (movies, skipped) = read_records(&MovieRecordParser, file);

    let loaded = movies.len();
    for movie in movies {
        catalog.add_movie(movie);
    }

    info!(
        "Loaded {} movies from {} ({} skipped)",
        loaded,
        path.display(),
        skipped.len()
    );
    Ok(LoadReport { loaded, skipped })
}

/// Load a user file; each user gets the next catalog id
pub fn load_users(catalog: &mut Catalog, path: &Path) -> Result<LoadReport> {
    let file = open_input(path)?;
    let (users, skipped) = read_records(&UserRecordParser, file);

    let loaded = users.len();
    for user in users {
        let UserRecord {
            person,
            birth_year,
            kind,
        } = user;
        catalog.insert_user(person.first_name, person.last_name, birth_year, kind);
    }

    info!(
        "Loaded {} users from {} ({} skipped)",
        loaded,
        path.display(),
        skipped.len()
    );
    Ok(LoadReport { loaded, skipped })
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

fn malformed(line: usize, reason: impl Into<String>) -> CatalogError {
    CatalogError::MalformedRecord {
        line,
        reason: reason.into(),
    }
}

fn field(record: &StringRecord, index: usize) -> &str {
    record.get(index).unwrap_or("")
}

fn expect_fields(record: &StringRecord, expected: usize, line: usize) -> Result<()> {
    if record.len() != expected {
        return Err(malformed(
            line,
            format!("expected {} fields, found {}", expected, record.len()),
        ));
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str, line: usize) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| malformed(line, format!("invalid {}: '{}'", what, value)))
}

/// "First Last" → Person. Anything after the first word is the last name.
fn parse_person(value: &str, line: usize) -> Result<Person> {
    let value = value.trim();
    match value.split_once(char::is_whitespace) {
        Some((first, last)) if !last.trim().is_empty() => Ok(Person::new(first, last.trim())),
        _ => Err(malformed(line, format!("expected 'First Last', found '{}'", value))),
    }
}
