use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CatalogHandle, CatalogStore, MovieId};
use poster_client::PosterClient;
use recommender::Recommender;
use server::{build_state, serve, Config, RecommendationOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Movie recommender over a precomputed similarity matrix
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Find movies similar to one you like", long_about = None)]
struct Cli {
    /// Directory holding movie_dict.json and similarity.json
    #[arg(short, long, env = "DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the five movies most similar to a title
    Recommend {
        /// Exact, case-sensitive catalog title
        #[arg(long)]
        title: String,

        /// Skip poster lookups and show similarity scores only
        #[arg(long)]
        no_posters: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Resolve the poster URL for a movie id
    Poster {
        #[arg(long)]
        movie_id: MovieId,
    },

    /// Time the similarity lookup over random catalog titles
    Benchmark {
        /// Number of lookups to run
        #[arg(long, default_value = "1000")]
        requests: usize,
    },

    /// Run the web front end
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    config.data_dir = cli.data_dir;

    run(cli.command, &config).await
}

/// Dispatch a subcommand. The catalog is only read by commands that need it.
async fn run(command: Commands, config: &Config) -> Result<()> {
    let handle = CatalogHandle::new(&config.data_dir);

    match command {
        Commands::Recommend { title, no_posters } => {
            handle_recommend(config, load(&handle)?, &title, no_posters).await?
        }
        Commands::Search { title } => handle_search(&*load(&handle)?, &title),
        Commands::Poster { movie_id } => handle_poster(config, movie_id).await?,
        Commands::Benchmark { requests } => handle_benchmark(load(&handle)?, requests)?,
        Commands::Serve => serve(config, build_state(config, load(&handle)?)?).await?,
    }

    Ok(())
}

/// Load data through the handle (this may take a moment)
fn load(handle: &CatalogHandle) -> Result<Arc<CatalogStore>> {
    println!("Loading movie catalog from {}...", handle.data_dir().display());
    let start = Instant::now();
    let store = handle
        .get()
        .context("Could not load movie data. Please check if the data files are present")?;
    info!("Catalog ready: {} movies", store.len());
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        store.len(),
        start.elapsed()
    );
    Ok(store)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    config: &Config,
    store: Arc<CatalogStore>,
    title: &str,
    no_posters: bool,
) -> Result<()> {
    if no_posters {
        match Recommender::new(store).recommend(title) {
            Ok(result) => {
                println!(
                    "{}",
                    format!("Here are {} movies similar to '{}':", result.len(), title)
                        .bold()
                        .blue()
                );
                for (rank, rec) in result.items.iter().enumerate() {
                    println!(
                        "{}. {} (id {}) - Score: {:.4}",
                        (rank + 1).to_string().green(),
                        rec.title,
                        rec.movie_id,
                        rec.score
                    );
                }
            }
            Err(e) => print_failure(&e.to_string()),
        }
        return Ok(());
    }

    let state = build_state(config, store)?;
    let outcome = state.orchestrator.recommend_or_empty(title).await;
    print_outcome(&outcome);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(store: &CatalogStore, title: &str) {
    let title_lower = title.to_lowercase();

    // (rank, catalog index): exact matches first, then substring matches
    let mut matches: Vec<(u8, usize)> = store
        .movies()
        .iter()
        .enumerate()
        .filter_map(|(index, movie)| {
            let movie_title_lower = movie.title.to_lowercase();
            if movie_title_lower == title_lower {
                Some((0, index))
            } else if movie_title_lower.contains(&title_lower) {
                Some((1, index))
            } else {
                None
            }
        })
        .collect();
    matches.sort();

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
        return;
    }
    for (_, index) in matches.iter().take(20) {
        if let Some(movie) = store.get(*index) {
            println!("{}: {}", movie.id, movie.title);
        }
    }
}

/// Handle the 'poster' command
async fn handle_poster(config: &Config, movie_id: MovieId) -> Result<()> {
    debug!("Resolving poster for movie {}", movie_id);
    let client = PosterClient::new(config.poster_config()).context("Failed to build poster client")?;
    println!("{}", client.fetch_poster(movie_id).await);
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(store: Arc<CatalogStore>, requests: usize) -> Result<()> {
    if requests == 0 {
        println!("Nothing to do for 0 requests");
        return Ok(());
    }

    let recommender = Recommender::new(store.clone());

    // Pick random catalog titles up front so lookup timing excludes it
    let titles: Vec<&str> = (0..requests)
        .filter_map(|_| {
            let index = rand::random::<u64>() as usize % store.len();
            store.get(index).map(|m| m.title.as_str())
        })
        .collect();

    let mut timings: Vec<Duration> = Vec::with_capacity(titles.len());
    for title in &titles {
        let start = Instant::now();
        recommender
            .recommend(title)
            .with_context(|| format!("Lookup failed for '{}'", title))?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f64 / total_time.as_secs_f64();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_outcome(outcome: &RecommendationOutcome) {
    if !outcome.is_success() {
        print_failure(outcome.error.as_deref().unwrap_or("no recommendations"));
        return;
    }

    println!(
        "{}",
        format!(
            "Here are {} movies similar to '{}':",
            outcome.recommendations.len(),
            outcome.query
        )
        .bold()
        .blue()
    );
    for (rank, rec) in outcome.recommendations.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), rec.title);
        println!("   {}", rec.poster_url.dimmed());
    }
}

fn print_failure(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
    eprintln!("Could not generate recommendations. Please try again.");
}
