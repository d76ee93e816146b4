mod logging;

use anyhow::Context;
use clap::Parser;
use ng_cache::InMemoryCache;
use ng_core::config::DEFAULT_BASE_URL;
use ng_core::NewsApiConfig;
use ng_newsapi::{NewsApiClient, NewsQueryPipeline};
use ng_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| format!("Duration too large: {}", s))?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A trailing bare number counts as seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| format!("Duration too large: {}", s))?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Cached UAE headlines from NewsAPI", long_about = None)]
struct Cli {
    /// NewsAPI key (required)
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// How long a fetched page is served from cache (e.g. 60s, 1m30s)
    #[arg(long, env = "NEWSGATE_CACHE_TTL", default_value = "60s")]
    cache_ttl: HumanDuration,
    /// Upstream request timeout
    #[arg(long, env = "NEWSGATE_TIMEOUT", default_value = "30s")]
    timeout: HumanDuration,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve GET /api/v1/news over HTTP
    Serve {
        #[arg(long, env = "NEWSGATE_BIND", default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
        /// Interval for purging expired cache entries, 0s disables the sweeper
        #[arg(long, default_value = "5m")]
        sweep_interval: HumanDuration,
    },
    /// Fetch a single page and print it as JSON
    Fetch {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

impl Cli {
    fn news_api_config(&self) -> NewsApiConfig {
        let mut config = NewsApiConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout.0)
            .with_cache_ttl(self.cache_ttl.0);
        config.api_key = self.api_key.clone();
        config
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = cli.news_api_config();
    config
        .validate()
        .context("News API configuration is incomplete")?;
    info!("⚙️ Using {:?}", config);

    let cache = Arc::new(InMemoryCache::new());
    let client = Arc::new(NewsApiClient::new(config.clone())?);
    let pipeline = Arc::new(NewsQueryPipeline::new(client, cache.clone()).with_ttl(config.cache_ttl));

    match cli.command {
        Commands::Serve { bind, sweep_interval } => {
            let sweeper = (!sweep_interval.0.is_zero()).then(|| cache.spawn_sweeper(sweep_interval.0));

            let listener = TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {}", bind))?;
            info!("🚀 Serving news on http://{}/api/v1/news", listener.local_addr()?);

            ng_web::serve(listener, AppState::new(pipeline), shutdown_signal()).await?;

            if let Some(sweeper) = sweeper {
                sweeper.abort();
            }
            info!("Server stopped");
        }
        Commands::Fetch { page } => {
            let result = pipeline.get_news(page).await?;
            println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        }
    }

    Ok(())
}
