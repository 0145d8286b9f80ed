// End-to-end run of the demo rental script against the bundled data files

use film_distribution::{
    format_database, load_movies, load_users, Catalog, Clock, DenialReason, DistributionMovie,
    RentalOutcome, UserKind,
};
use std::path::PathBuf;

fn data_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

fn ids(movies: Vec<&DistributionMovie>) -> Vec<u32> {
    movies.iter().map(|m| m.id()).collect()
}

fn load_demo_catalog() -> Catalog {
    let mut catalog = Catalog::with_clock(Clock::Fixed(2026));

    let movies = load_movies(&mut catalog, &data_file("Input_movies.txt")).unwrap();
    let users = load_users(&mut catalog, &data_file("Input_users.txt")).unwrap();

    assert_eq!(movies.loaded, 8);
    assert!(movies.is_clean());
    assert_eq!(users.loaded, 5);
    assert!(users.is_clean());

    catalog
}

#[test]
fn test_demo_script() {
    let mut catalog = load_demo_catalog();

    assert_eq!(catalog.movie(1).unwrap().title(), "The Terminal");
    assert_eq!(catalog.movie(3).unwrap().title(), "The Greatest Showman");
    assert_eq!(catalog.user(2).unwrap().name(), "Erika Mustermann");
    assert!(catalog.user_age(2).unwrap() < 6);
    assert_eq!(catalog.user(4).unwrap().kind(), UserKind::Premium);

    // Copy of movie 1 becomes movie 9
    let copy = catalog.duplicate_movie(1).unwrap();
    assert_eq!(copy.id(), 9);
    catalog.insert_movie(copy);

    // Erika: copy ok, Greatest Showman too old for her
    assert!(catalog.rent_movie(2, 9).unwrap().is_rented());
    assert_eq!(
        catalog.rent_movie(2, 3).unwrap(),
        RentalOutcome::Denied {
            reasons: vec![DenialReason::TooYoung]
        }
    );

    // Max: Erika's copy is gone, then five rentals at rising prices
    assert_eq!(catalog.price_for_next_movie(1).unwrap(), 0.5);
    assert!(!catalog.rent_movie(1, 9).unwrap().is_rented());

    let mut prices = Vec::new();
    for movie_id in 1..=5 {
        if let RentalOutcome::Rented { price } = catalog.rent_movie(1, movie_id).unwrap() {
            prices.push(price);
        }
    }
    assert_eq!(prices, vec![0.5, 1.0, 1.5, 2.0, 2.5]);

    assert_eq!(
        catalog.rent_movie(1, 6).unwrap(),
        RentalOutcome::Denied {
            reasons: vec![DenialReason::QuotaReached]
        }
    );
    assert_eq!(catalog.user(1).unwrap().rented_count(), 5);
    assert_eq!(catalog.price_for_next_movie(1).unwrap(), f64::INFINITY);

    // Laura: flat premium price
    assert_eq!(catalog.rent_movie(4, 8).unwrap(), RentalOutcome::Rented { price: 0.5 });
    assert_eq!(catalog.price_for_next_movie(4).unwrap(), 0.5);

    // Reports
    assert_eq!(ids(catalog.available_movies_for(1).unwrap()), vec![6, 7]);
    assert!(catalog.available_movies_for(2).unwrap().is_empty());
    assert_eq!(ids(catalog.available_movies_for(3).unwrap()), vec![6]);
    assert!(catalog.available_movies_for(4).unwrap().is_empty());
    assert!(catalog.available_movies_for(5).unwrap().is_empty());

    assert_eq!(ids(catalog.search_genre("Crime")), vec![5, 6]);
    assert_eq!(ids(catalog.search_fsk(8, 17)), vec![4, 5, 6, 8]);
    assert_eq!(ids(catalog.search_name("Tom")), vec![1, 2, 4, 8, 9]);
    assert_eq!(ids(catalog.search_name("Tarantino")), vec![6]);
    assert!(catalog.search_name("Zeta").is_empty());

    let dump = format_database(&catalog);
    assert_eq!(dump.matches("ID: ").count(), 9);
    assert_eq!(dump.matches(" is rented").count(), 7);
    assert!(dump.contains("1: Max Mustermann (Age=36) has rented 5 of 5 movies."));
    assert!(dump.contains("4: Laura Meier (Age=14) has rented 1 of 100 movies."));
}
