//! Command implementations.
//!
//! Every search surface is a subcommand. Given a query it fetches once and
//! prints the result; without one it reads queries line by line (see
//! [`live`]).

pub mod coins;
pub mod joke;
pub mod live;
pub mod pages;
pub mod surface;
pub mod users;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use searchdeck_sources::{
    CoinChart, CoinMarkets, CommentSearch, GithubProfiles, HttpClient, MovieFeed, MovieSearch,
    NewsCategory, NewsHeadlines, PagedPostSearch, PokemonLookup, PostSearch, RandomJoke,
    UserSearch, WeatherLookup, WordSuggest,
};

use crate::config::{self, Overrides, Settings};
use crate::logging;
use surface::{controller_for, InputMode, Plain};

/// Search public REST APIs from the terminal.
#[derive(Parser, Debug)]
#[command(name = "searchdeck", version, about = "Search public REST APIs from the terminal")]
pub struct Args {
    /// Show debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: <config dir>/searchdeck/config.json).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Quiet time before a typed query is sent, in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Request timeout in seconds.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// OpenWeatherMap API key.
    #[arg(long, global = true, env = "SEARCHDECK_OPENWEATHER_KEY", hide_env_values = true)]
    pub openweather_key: Option<String>,

    /// TMDB API key.
    #[arg(long, global = true, env = "SEARCHDECK_TMDB_KEY", hide_env_values = true)]
    pub tmdb_key: Option<String>,

    /// NewsAPI key.
    #[arg(long, global = true, env = "SEARCHDECK_NEWSAPI_KEY", hide_env_values = true)]
    pub newsapi_key: Option<String>,

    /// Search surface.
    #[command(subcommand)]
    pub command: Command,
}

/// Search surfaces.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Search posts by title as you type.
    Posts {
        /// Title fragment; omit for live mode.
        query: Option<String>,
    },

    /// Full-text post search, ten posts per page.
    Pages {
        /// Search text; omit for live mode.
        query: Option<String>,

        /// Page to fetch first.
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Search users by name.
    Users {
        /// Name fragment; omit for live mode.
        query: Option<String>,

        /// Sort order.
        #[arg(long, value_enum, default_value_t)]
        sort: users::SortBy,
    },

    /// Find comments by author email.
    Comments {
        /// Email fragment; omit for live mode.
        email: Option<String>,
    },

    /// Suggest words for a prefix as you type.
    Words {
        /// Word prefix; omit for live mode.
        prefix: Option<String>,
    },

    /// Look up a GitHub profile and its recent repositories.
    Github {
        /// GitHub login; omit for live mode.
        login: Option<String>,
    },

    /// Top cryptocurrencies by market cap.
    Coins {
        /// Quote currency.
        #[arg(long, default_value = "usd")]
        currency: String,

        /// Show at most this many coins.
        #[arg(long)]
        limit: Option<usize>,

        /// Page of `--limit` coins to show.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// 30-day USD price chart for a coin.
    Chart {
        /// CoinGecko coin id, e.g. `bitcoin`.
        coin: String,
    },

    /// Current weather for a city.
    Weather {
        /// City name; omit for live mode.
        city: Option<String>,
    },

    /// Trending, top rated or searched movies.
    Movies {
        /// Listing to show.
        #[arg(long, value_enum, default_value_t)]
        feed: Feed,

        /// Title to search for with `--feed search`; omit for live mode.
        query: Option<String>,
    },

    /// Random jokes, refreshed on a timer.
    Joke {
        /// Number of jokes to show.
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Seconds between jokes.
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
        period: u64,
    },

    /// Look up a Pokemon by name.
    Pokemon {
        /// Pokemon name; omit for live mode.
        name: Option<String>,
    },

    /// US top headlines for a category.
    News {
        /// business, entertainment, general or health.
        category: NewsCategory,
    },
}

/// Movie listing accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    /// Trending this week.
    #[default]
    Trending,
    /// Highest rated.
    TopRated,
    /// Title search.
    Search,
}

impl From<Feed> for MovieFeed {
    fn from(feed: Feed) -> Self {
        match feed {
            Feed::Trending => Self::Trending,
            Feed::TopRated => Self::TopRated,
            Feed::Search => Self::Search,
        }
    }
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            debounce_ms: self.debounce_ms,
            timeout_secs: self.timeout,
            openweather_key: self.openweather_key.clone(),
            tmdb_key: self.tmdb_key.clone(),
            newsapi_key: self.newsapi_key.clone(),
        }
    }
}

/// Main entry point.
pub fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Resolve settings and run the chosen surface.
///
/// Returns `false` if the surface ended on a failed fetch.
pub fn run(args: &Args) -> Result<bool> {
    let file = config::load(args.config.as_deref())?;
    let settings = config::resolve(file, args.overrides());
    tracing::debug!(debounce = ?settings.controller.debounce, "resolved settings");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(dispatch(&args.command, &settings))
}

async fn dispatch(command: &Command, settings: &Settings) -> Result<bool> {
    let sources = &settings.sources;
    let http = HttpClient::new(sources);
    let controller_config = settings.controller;

    match command {
        Command::Posts { query } => {
            let source = Arc::new(PostSearch::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, query.clone(), InputMode::Debounced, Plain).await
        }
        Command::Pages { query, page } => {
            let source = Arc::new(PagedPostSearch::new(http, sources));
            source.set_page(*page);
            let controller = controller_for(Arc::clone(&source), controller_config);
            let pager = pages::Pager::new(source);
            surface::run(controller, query.clone(), InputMode::Debounced, pager).await
        }
        Command::Users { query, sort } => {
            let source = Arc::new(UserSearch::new(http, sources));
            let controller = controller_for(source, controller_config);
            let sorted = users::SortedUsers::new(*sort);
            surface::run(controller, query.clone(), InputMode::Debounced, sorted).await
        }
        Command::Comments { email } => {
            let source = Arc::new(CommentSearch::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, email.clone(), InputMode::Debounced, Plain).await
        }
        Command::Words { prefix } => {
            let source = Arc::new(WordSuggest::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, prefix.clone(), InputMode::Debounced, Plain).await
        }
        Command::Github { login } => {
            let source = Arc::new(GithubProfiles::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, login.clone(), InputMode::Submit, Plain).await
        }
        Command::Coins {
            currency,
            limit,
            page,
        } => {
            let source = Arc::new(CoinMarkets::new(http, sources));
            let controller = controller_for(source, controller_config);
            let top = coins::TopCoins::new(*limit, *page);
            surface::run(controller, Some(currency.clone()), InputMode::Submit, top).await
        }
        Command::Chart { coin } => {
            let source = Arc::new(CoinChart::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, Some(coin.clone()), InputMode::Submit, Plain).await
        }
        Command::Weather { city } => {
            let source = Arc::new(WeatherLookup::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, city.clone(), InputMode::Submit, Plain).await
        }
        Command::Movies { feed, query } => {
            let source = Arc::new(MovieSearch::new(http, sources, MovieFeed::from(*feed)));
            // Listing feeds take no query; the feed name labels the result.
            let query = match source.feed() {
                MovieFeed::Search => query.clone(),
                listing @ (MovieFeed::Trending | MovieFeed::TopRated) => Some(listing.to_string()),
            };
            let controller = controller_for(source, controller_config);
            surface::run(controller, query, InputMode::Submit, Plain).await
        }
        Command::Joke { count, period } => {
            let source = Arc::new(RandomJoke::new(http, sources));
            let controller = controller_for(source, controller_config);
            joke::run(controller, (*count).max(1), Duration::from_secs(*period)).await
        }
        Command::Pokemon { name } => {
            let source = Arc::new(PokemonLookup::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, name.clone(), InputMode::Submit, Plain).await
        }
        Command::News { category } => {
            let source = Arc::new(NewsHeadlines::new(http, sources));
            let controller = controller_for(source, controller_config);
            surface::run(controller, Some(category.to_string()), InputMode::Submit, Plain).await
        }
    }
}
