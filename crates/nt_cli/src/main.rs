use clap::{ArgAction, Args, Parser, Subcommand};
use nt_core::config::{
    DEFAULT_MAX_RESULTS_PER_QUERY, DEFAULT_OPENAI_MODEL, DEFAULT_QUERY_LIMIT, DEFAULT_SUMMARY_MAX_TOKENS,
};
use nt_core::queries::build_all_queries;
use nt_core::{Config, Location, NewsProvider, UserPreferences};
use nt_web::{pipeline, AppState};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;
        let mut chars = s.trim().chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
                continue;
            }
            let num = current_number
                .parse::<u64>()
                .map_err(|_| format!("Invalid character in duration: {}", c))?;
            let unit_millis = match c {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                's' => 1_000,
                'm' => 60_000,
                'h' => 3_600_000,
                _ => return Err(format!("Invalid duration unit: {}", c)),
            };
            total_millis = add_millis(total_millis, num, unit_millis)?;
            current_number.clear();
            has_unit = true;
        }

        // A bare trailing number counts as seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis = add_millis(total_millis, num, 1_000)?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

fn add_millis(total: u64, num: u64, unit_millis: u64) -> std::result::Result<u64, String> {
    num.checked_mul(unit_millis)
        .and_then(|millis| total.checked_add(millis))
        .ok_or_else(|| "Duration is too large".to_string())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Personalized news aggregation backend", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct Settings {
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    /// Enables summaries when present
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
    /// News search provider: gnews or newsapi
    #[arg(long, env = "NEWS_PROVIDER", default_value = "gnews")]
    provider: String,
    #[arg(long, env = "NEWS_BASE_URL")]
    news_base_url: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,
    /// Maximum number of queries issued per request
    #[arg(long, env = "NEWS_QUERY_LIMIT", default_value_t = DEFAULT_QUERY_LIMIT)]
    query_limit: usize,
    #[arg(long, env = "NEWS_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS_PER_QUERY)]
    max_results: usize,
    #[arg(long, env = "ENABLE_SUMMARIZATION", default_value_t = true, action = ArgAction::Set)]
    summarize: bool,
    /// Per-request bound on news searches (e.g. 10s, 1m30s, 500ms)
    #[arg(long, env = "NEWS_FETCH_TIMEOUT", default_value = "10s")]
    fetch_timeout: HumanDuration,
    #[arg(long, env = "SUMMARY_MAX_TOKENS", default_value_t = DEFAULT_SUMMARY_MAX_TOKENS)]
    summary_max_tokens: u32,
}

impl Settings {
    fn into_config(self) -> nt_core::Result<Config> {
        Ok(Config {
            news_api_key: self.news_api_key,
            openai_api_key: self.openai_api_key,
            news_provider: self.provider.parse::<NewsProvider>()?,
            news_base_url: self.news_base_url,
            openai_base_url: self.openai_base_url,
            openai_model: self.openai_model,
            query_limit: self.query_limit,
            max_results_per_query: self.max_results,
            enable_summarization: self.summarize,
            fetch_timeout: self.fetch_timeout.0,
            summary_max_tokens: self.summary_max_tokens,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the news API over HTTP
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Fetch news once and print the response envelope
    Fetch(PreferenceArgs),
    /// Print the search queries the preferences produce
    Queries(PreferenceArgs),
}

#[derive(Args, Debug, Clone)]
struct PreferenceArgs {
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    country: Option<String>,
    /// Business interest, may be repeated
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long)]
    community: Option<String>,
}

impl From<PreferenceArgs> for UserPreferences {
    fn from(args: PreferenceArgs) -> Self {
        let location = Location {
            city: args.city,
            state: args.state,
            country: args.country,
        };
        UserPreferences {
            location: Some(location),
            business_interests: args.interests,
            community: args.community,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {}", e);
        }
    }

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.settings.into_config()?;
    info!(
        "⚙️ Provider {}, query limit {}, summaries {}",
        config.news_provider,
        config.query_limit,
        if config.enable_summarization && config.api_keys().openai_api_key.is_some() { "on" } else { "off" }
    );

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState::from_config(config)?;
            nt_web::serve(state, &bind).await?;
        }
        Commands::Fetch(args) => {
            let state = AppState::from_config(config)?;
            let payload = serde_json::to_value(UserPreferences::from(args))?;
            let (status, envelope) = pipeline::handle_payload(&state, payload).await;
            info!("Finished with status {}", status);
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        Commands::Queries(args) => {
            let preferences = UserPreferences::from(args);
            for query in build_all_queries(Some(&preferences)) {
                println!("{}", query);
            }
        }
    }

    Ok(())
}
