use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, CatalogSchema, ContentIndex, Item};
use rand::seq::IndexedRandom;
use server::{MoodQuery, RecommendationEngine, ColdStartRecommender, FeedRecommender};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// feed-recs - Feed recommendation engine
#[derive(Parser)]
#[command(name = "feed-recs")]
#[command(about = "Content-based feed recommendations with a mood-driven cold start", long_about = None)]
struct Cli {
    /// Warm catalog with view history
    #[arg(long, default_value = "./CONTENT_based_filtering.csv")]
    catalog: PathBuf,

    /// Item-to-item similarity matrix (.npy or headerless .csv)
    #[arg(long, default_value = "./similarity_matrix.npy")]
    similarity: PathBuf,

    /// Cold-start catalog with mood labels
    #[arg(long, default_value = "./completed_data_for_cold_start.csv")]
    cold_start: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get feed recommendations for a user with view history
    Recommend {
        #[arg(long)]
        username: String,

        /// Category id, e.g. 2 for Vible
        #[arg(long)]
        category_id: Option<String>,

        /// Comma-separated moods to keep
        #[arg(long)]
        mood: Option<String>,
    },

    /// Get mood-based recommendations for a new user
    Coldstart {
        /// Comma-separated moods, e.g. "happy,excited"
        #[arg(long)]
        mood: String,
    },

    /// Show a user's view history
    User {
        #[arg(long)]
        username: String,
    },

    /// Search for posts by title
    Search {
        /// Case-insensitive substring of the title
        #[arg(long)]
        title: String,
    },

    /// Run recommendations for random known users and report latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            username,
            category_id,
            mood,
        } => {
            let content = load_content(&cli.catalog, &cli.similarity)?;
            handle_recommend(content, &username, category_id.as_deref(), mood)?
        }
        Commands::Coldstart { mood } => {
            let catalog = load_catalog(&cli.cold_start, CatalogSchema::ColdStart)?;
            handle_coldstart(catalog, mood)?
        }
        Commands::User { username } => {
            let catalog = load_catalog(&cli.catalog, CatalogSchema::Content)?;
            handle_user(&catalog, &username)?
        }
        Commands::Search { title } => {
            let catalog = load_catalog(&cli.catalog, CatalogSchema::Content)?;
            handle_search(&catalog, &title)
        }
        Commands::Benchmark { requests } => {
            let content = load_content(&cli.catalog, &cli.similarity)?;
            let cold_start = load_catalog(&cli.cold_start, CatalogSchema::ColdStart)?;
            let engine = Arc::new(RecommendationEngine::new(content, cold_start));
            handle_benchmark(engine, requests).await?
        }
    }

    Ok(())
}

fn load_content(catalog: &Path, similarity: &Path) -> Result<Arc<ContentIndex>> {
    println!(
        "Loading {} and {}...",
        catalog.display(),
        similarity.display()
    );
    let start = Instant::now();
    let content = ContentIndex::load_from_files(catalog, similarity)
        .context("Failed to load warm catalog and similarity matrix")?;
    println!("{} Loaded {} posts in {:?}", "✓".green(), content.catalog().len(), start.elapsed());
    Ok(Arc::new(content))
}

fn load_catalog(path: &Path, schema: CatalogSchema) -> Result<Arc<Catalog>> {
    println!("Loading {}...", path.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_file(path, schema)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    println!("{} Loaded {} rows in {:?}", "✓".green(), catalog.len(), start.elapsed());
    Ok(Arc::new(catalog))
}

/// Handle the 'recommend' command
fn handle_recommend(
    content: Arc<ContentIndex>,
    username: &str,
    category_id: Option<&str>,
    mood: Option<String>,
) -> Result<()> {
    if content.catalog().view_indices(username).is_empty() {
        println!(
            "{} '{}' has no view history, try the coldstart command",
            "!".yellow(),
            username
        );
    }

    let recommender = FeedRecommender::new(content);
    let posts = recommender.recommend(username, category_id, mood.map(MoodQuery::from))?;

    print_posts(&format!("Feed for {}:", username), &posts);
    Ok(())
}

/// Handle the 'coldstart' command
fn handle_coldstart(catalog: Arc<Catalog>, mood: String) -> Result<()> {
    let recommender = ColdStartRecommender::new(catalog);
    let posts = recommender.recommend_by_mood(mood.as_str())?;

    print_posts(&format!("Posts for mood '{}':", mood), &posts);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(catalog: &Catalog, username: &str) -> Result<()> {
    let views = catalog.get_user_views(username);
    if views.is_empty() {
        bail!("User '{}' has no view history", username);
    }

    println!("{}", format!("User: {}", username).bold().blue());
    println!("{}Posts viewed: {}", "• ".cyan(), views.len());

    let rated: Vec<f64> = views.iter().filter_map(|item| item.rating_percent).collect();
    if !rated.is_empty() {
        let avg = rated.iter().sum::<f64>() / rated.len() as f64;
        println!("{}Average rating: {:.1}%", "• ".cyan(), avg);
    }

    // Category breakdown, most viewed first
    let mut categories: Vec<(&str, usize)> = Vec::new();
    for item in &views {
        let category = item.category.as_deref().unwrap_or("(none)");
        match categories.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 += 1,
            None => categories.push((category, 1)),
        }
    }
    categories.sort_by(|a, b| b.1.cmp(&a.1));

    println!("Categories:");
    for (category, count) in categories {
        println!("  - {}: {} views", category, count);
    }

    println!("History:");
    for item in views {
        println!("  - {} [{}]", item.title, item.moods.join(", "));
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    let matches = catalog.search_titles(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no matching titles");
        return;
    }
    for item in matches.iter().take(20) {
        println!(
            "{}: {} [{}] {}",
            item.index,
            item.title,
            item.category.as_deref().unwrap_or("-"),
            format_rating(item.rating_percent)
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(engine: Arc<RecommendationEngine>, requests: usize) -> Result<()> {
    let usernames: Vec<String> = engine
        .feed()
        .content()
        .catalog()
        .usernames()
        .into_iter()
        .map(str::to_string)
        .collect();
    if usernames.is_empty() || requests == 0 {
        bail!("Nothing to benchmark: the catalog has no viewers or no requests were asked for");
    }

    let mut rng = rand::rng();
    let picked: Vec<String> = (0..requests)
        .filter_map(|_| usernames.choose(&mut rng).cloned())
        .collect();

    info!("Benchmarking {} requests over {} users", picked.len(), usernames.len());

    let wall = Instant::now();
    let mut handles = Vec::with_capacity(picked.len());
    for username in picked {
        let engine = engine.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            engine.recommend(&username, None, None)?;
            Ok::<_, anyhow::Error>(start.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(handles.len());
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall = wall.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg = total / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall);
    println!("Average latency: {:?}", avg);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        timings.len() as f64 / wall.as_secs_f64()
    );

    Ok(())
}

fn format_rating(rating: Option<f64>) -> String {
    rating
        .map(|r| format!("{:.0}%", r))
        .unwrap_or_else(|| "unrated".to_string())
}

/// Print a ranked list of posts
fn print_posts(header: &str, posts: &[Item]) {
    println!("{}", header.bold().blue());
    if posts.is_empty() {
        println!("  no recommendations");
        return;
    }
    for (rank, post) in posts.iter().enumerate() {
        let by = post
            .username
            .as_deref()
            .map(|u| format!(" by {}", u))
            .unwrap_or_default();
        println!(
            "{}. {}{} [{}] ({}) - {}",
            (rank + 1).to_string().green(),
            post.title,
            by,
            post.category.as_deref().unwrap_or("-"),
            post.moods.join(", "),
            format_rating(post.rating_percent)
        );
    }
}
