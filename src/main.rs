use anyhow::{Context, Result};
use clap::Parser;
use film_distribution::{
    load_movies, load_users, write_database, write_database_json, write_movie_list, Catalog,
    Clock, LoadReport, RentalOutcome,
};
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Film distribution demo: loads movies and users, runs a fixed rental
/// script and writes the reports.
#[derive(Parser, Debug)]
#[command(name = "film-distribution", version)]
struct Args {
    /// Movie input file
    #[arg(long, default_value = "data/Input_movies.txt")]
    movies: PathBuf,

    /// User input file
    #[arg(long, default_value = "data/Input_users.txt")]
    users: PathBuf,

    /// Directory for the generated reports
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Compute ages as of this year instead of the current year
    #[arg(long)]
    year: Option<i32>,

    /// Also write a JSON snapshot of the database
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let clock = args.year.map(Clock::Fixed).unwrap_or_default();
    let mut catalog = Catalog::with_clock(clock);

    println!("🎬 Film Distribution - rental demo");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Load input
    println!("\n📂 Loading input...");
    report_load("movies", &args.movies, load_movies(&mut catalog, &args.movies));
    report_load("users", &args.users, load_users(&mut catalog, &args.users));

    // 2. Rentals
    println!("\n📼 Renting...");
    run_rentals(&mut catalog);

    // 3. Reports
    println!("\n💾 Writing reports to {}...", args.output_dir.display());
    write_reports(&catalog, &args.output_dir)?;

    if args.json {
        let path = args.output_dir.join("Output_Database.json");
        write_database_json(&catalog, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ {}", path.display());
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "✅ Done: {} movies, {} users",
        catalog.movies().len(),
        catalog.users().len()
    );

    Ok(())
}

/// A failed load is reported and the run continues with what is loaded
fn report_load(what: &str, path: &Path, result: film_distribution::Result<LoadReport>) {
    match result {
        Ok(report) => {
            println!("✓ Loaded {} {} from {}", report.loaded, what, path.display());
            for skipped in &report.skipped {
                println!("  ⚠️  line {} skipped: {}", skipped.line, skipped.reason);
            }
        }
        Err(e) => {
            warn!("Could not load {}: {}", what, e);
            println!("❌ {} not loaded: {}", what, e);
        }
    }
}

fn run_rentals(catalog: &mut Catalog) {
    // Movie 1 (The Terminal) is added again as movie 9
    match catalog.duplicate_movie(1) {
        Ok(copy) => catalog.insert_movie(copy),
        Err(e) => warn!("Could not copy movie 1: {}", e),
    }

    // Erika (2) rents the copy, then is too young for movie 3 (FSK 6)
    rent(catalog, 2, 9);
    rent(catalog, 2, 3);

    // Max (1, standard) tries Erika's copy, then rents five movies and hits his quota
    print_price(catalog, 1);
    rent(catalog, 1, 9);
    for movie_id in 1..=6 {
        print_price(catalog, 1);
        rent(catalog, 1, movie_id);
    }
    print_price(catalog, 1);

    // Laura (4, premium) pays the flat price
    print_price(catalog, 4);
    rent(catalog, 4, 8);
    print_price(catalog, 4);
}

fn rent(catalog: &mut Catalog, user_id: u32, movie_id: u32) {
    match catalog.rent_movie(user_id, movie_id) {
        Ok(RentalOutcome::Rented { price }) => {
            println!("✓ User {} rented movie {} for {}", user_id, movie_id, price);
        }
        Ok(RentalOutcome::Denied { reasons }) => {
            let reasons: Vec<&str> = reasons.iter().map(|r| r.as_str()).collect();
            println!(
                "✗ User {} may not rent movie {} ({})",
                user_id,
                movie_id,
                reasons.join(", ")
            );
        }
        Err(e) => warn!("Rental rejected: {}", e),
    }
}

fn print_price(catalog: &Catalog, user_id: u32) {
    match catalog.require_user(user_id) {
        Ok(user) => println!(
            "The {}. movie for {} costs {}",
            user.rented_count() + 1,
            user.name(),
            user.price_for_next_movie()
        ),
        Err(e) => warn!("No price: {}", e),
    }
}

fn write_reports(catalog: &Catalog, dir: &Path) -> Result<()> {
    let write = |movies: Vec<_>, name: &str| -> Result<()> {
        let path = dir.join(name);
        write_movie_list(&movies, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✓ {}", path.display());
        Ok(())
    };

    for user in catalog.users() {
        let movies = catalog.available_movies_for(user.id())?;
        write(movies, &format!("Movies_available_for_{}.txt", user.id()))?;
    }

    write(catalog.search_genre("Crime"), "Movies_with_Crime.txt")?;
    write(catalog.search_fsk(8, 17), "Movies_with_FSK_8_17.txt")?;
    write(catalog.search_name("Tom"), "Movies_with_Tom.txt")?;
    write(catalog.search_name("Tarantino"), "Movies_with_Tarantino.txt")?;
    write(catalog.search_name("Zeta"), "Movies_with_Zeta.txt")?;

    let path = dir.join("Output_Database.txt");
    write_database(catalog, &path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("✓ {}", path.display());

    Ok(())
}
