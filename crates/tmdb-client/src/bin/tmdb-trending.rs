use clap::Parser;
use eyre::WrapErr;
use models::CatalogRoot;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tmdb-trending")]
#[command(about = "Print TMDb weekly trending movies and match them against a catalog export", long_about = None)]
struct Args {
    /// TMDb v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: String,

    /// TMDb API base URL
    #[arg(long, env = "TMDB_BASE_URL", default_value = tmdb_client::DEFAULT_BASE_URL)]
    base_url: String,

    /// Catalog export (JSON) to reconcile the feed against
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Number of catalog matches to report
    #[arg(short, long, default_value_t = models::config::DEFAULT_TOP_MOVIES_COUNT)]
    top: i32,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tmdb_client=info".into()),
        )
        .init();

    let args = Args::parse();

    let client = tmdb_client::TmdbClient::new(&args.api_key, &args.base_url)
        .wrap_err("failed to build TMDb client")?;

    tracing::info!("Fetching trending movies from {}", client.base_url());
    let trending = client
        .trending_movies()
        .await
        .wrap_err("failed to fetch trending movies")?;

    println!("# trending ({})", trending.len());
    for (rank, entry) in trending.iter().enumerate() {
        let year = match entry.release_year() {
            0 => "????".to_string(),
            year => year.to_string(),
        };
        println!("{:>3}. {} ({})", rank + 1, entry.title, year);
    }

    let Some(catalog_path) = args.catalog else {
        return Ok(());
    };

    let bytes = std::fs::read(&catalog_path)
        .wrap_err_with(|| format!("failed to read catalog: {}", catalog_path.display()))?;
    let root: CatalogRoot = serde_json::from_slice(&bytes).wrap_err("parse catalog json")?;
    let catalog = root.into_movies();
    tracing::info!("Loaded {} movies from {}", catalog.len(), catalog_path.display());

    let matched = trending_match::reconcile(&trending, &catalog, args.top);

    println!();
    println!("# in library ({} of top {})", matched.len(), args.top);
    for item in matched {
        let year = item
            .production_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "????".to_string());
        println!("  {} ({}) [{}]", item.name, year, item.id);
    }

    Ok(())
}
