// 📝 Reports - plain-text movie lists and database dumps
//
// Movie list: one block per movie, each followed by an empty line.
// Database:   "Movie:" + movie blocks, then "User:" + one summary line per user
//             (user lines back to back, no blank line between them).
// JSON:       snapshot of the whole catalog for tooling.

use crate::catalog::Catalog;
use crate::entities::{DistributionMovie, User};
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

// ============================================================================
// TEXT FORMATTING
// ============================================================================

pub fn format_movie_list(movies: &[&DistributionMovie]) -> String {
    let mut out = String::new();
    for movie in movies {
        let _ = writeln!(out, "{}", movie);
    }
    out
}

pub fn format_database(catalog: &Catalog) -> String {
    let year = catalog.current_year();
    let mut out = String::from("Movie:\n");

    for movie in catalog.movies() {
        let _ = writeln!(out, "{}", movie);
    }

    out.push_str("User:\n");
    for user in catalog.users() {
        let _ = writeln!(out, "{}", user.describe(year));
    }

    out
}

// ============================================================================
// FILE OUTPUT
// ============================================================================

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write movies in the given order
pub fn write_movie_list(movies: &[&DistributionMovie], path: &Path) -> Result<()> {
    write_text(path, &format_movie_list(movies))?;
    info!("Wrote {} movies to {}", movies.len(), path.display());
    Ok(())
}

/// Write every movie and every user
pub fn write_database(catalog: &Catalog, path: &Path) -> Result<()> {
    write_text(path, &format_database(catalog))?;
    info!(
        "Wrote database ({} movies, {} users) to {}",
        catalog.movies().len(),
        catalog.users().len(),
        path.display()
    );
    Ok(())
}

// ============================================================================
// JSON SNAPSHOT
// ============================================================================

#[derive(Serialize)]
struct UserView<'a> {
    #[serde(flatten)]
    user: &'a User,
    age: i32,
    quota: usize,

    /// None once the quota is reached
    price_for_next_movie: Option<f64>,
}

#[derive(Serialize)]
struct CatalogSnapshot<'a> {
    as_of_year: i32,
    movies: &'a [DistributionMovie],
    users: Vec<UserView<'a>>,
}

pub fn database_json(catalog: &Catalog) -> Result<String> {
    let year = catalog.current_year();
    let users = catalog
        .users()
        .iter()
        .map(|user| {
            let price = user.price_for_next_movie();
            UserView {
                user,
                age: user.age(year),
                quota: user.quota(),
                price_for_next_movie: price.is_finite().then_some(price),
            }
        })
        .collect();

    let snapshot = CatalogSnapshot {
        as_of_year: year,
        movies: catalog.movies(),
        users,
    };

    Ok(serde_json::to_string_pretty(&snapshot)?)
}

pub fn write_database_json(catalog: &Catalog, path: &Path) -> Result<()> {
    write_text(path, &database_json(catalog)?)?;
    info!("Wrote JSON snapshot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Clock;
    use crate::entities::{Movie, Person, UserKind};
    use pretty_assertions::assert_eq;

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::with_clock(Clock::Fixed(2026));
        catalog.add_movie(Movie::new(
            "Saw",
            2004,
            "Horror",
            18,
            Person::new("James", "Wan"),
            [
                Person::new("Cary", "Elwes"),
                Person::new("Leigh", "Whannell"),
                Person::new("Danny", "Glover"),
            ],
        ));
        catalog.insert_user("Max", "Mustermann", 1990, UserKind::Standard);
        catalog.insert_user("Laura", "Meier", 2012, UserKind::Premium);
        catalog
    }

    #[test]
    fn test_database_dump_format() {
        let mut catalog = create_test_catalog();
        catalog.rent_movie(1, 1).unwrap();

        assert_eq!(
            format_database(&catalog),
            "Movie:\n\
             ID: 1 is rented\n\
             Saw (2004)\n\
             Genre: Horror\n\
             FSK: 18\n\
             Director: James Wan\n\
             Actor: Cary Elwes, Leigh Whannell, Danny Glover\n\
             \n\
             User:\n\
             1: Max Mustermann (Age=36) has rented 1 of 5 movies.\n\
             2: Laura Meier (Age=14) has rented 0 of 100 movies.\n"
        );
    }

    #[test]
    fn test_empty_movie_list_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("none.txt");

        write_movie_list(&[], &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_movie_list_file_keeps_order() {
        let mut catalog = create_test_catalog();
        let copy = catalog.duplicate_movie(1).unwrap();
        catalog.insert_movie(copy);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        let movies: Vec<&DistributionMovie> = catalog.movies().iter().rev().collect();
        write_movie_list(&movies, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ID: 2\nSaw (2004)\n"));
        assert!(text.contains("\n\nID: 1\n"));
    }

    #[test]
    fn test_json_snapshot() {
        let catalog = create_test_catalog();

        let value: serde_json::Value =
            serde_json::from_str(&database_json(&catalog).unwrap()).unwrap();

        assert_eq!(value["as_of_year"], 2026);
        assert_eq!(value["movies"][0]["title"], "Saw");
        assert_eq!(value["movies"][0]["available"], true);
        assert_eq!(value["users"][1]["first_name"], "Laura");
        assert_eq!(value["users"][1]["kind"], "Premium");
        assert_eq!(value["users"][1]["price_for_next_movie"], 0.5);
    }
}
