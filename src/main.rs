use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tmdb_persist::{
    ClientMode, Config, Credits, MovieCreditsRequest, MovieDetailRequest, PersistentConfig,
    SearchMovieRequest, SearchTvRequest, TmdbApi, TmdbClient, TmdbError, TvCreditsRequest,
    TvDetailRequest, TvEpisodeRequest, TvSeasonRequest, connect,
};
use tracing_subscriber::EnvFilter;

/// Look up movies and TV shows on The Movie Database
#[derive(Parser, Debug)]
#[command(name = "tmdb")]
#[command(version)]
#[command(about = "Query The Movie Database, caching every response on disk")]
struct Cli {
    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// TMDB v4 read access token
    #[arg(long, env = "TMDB_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Override the API base URL
    #[arg(long, env = "TMDB_API_URL")]
    api_url: Option<String>,

    /// Override the image host prefix
    #[arg(long, env = "TMDB_IMAGE_URL")]
    image_url: Option<String>,

    /// Directory for cached responses (defaults to <config dir>/tmdb)
    #[arg(long, env = "TMDB_CACHE_DIR", value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Bypass the cache and always ask the API
    #[arg(long)]
    no_cache: bool,

    /// Log requests and cache activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the configured credentials
    Auth,
    #[command(flatten)]
    Lookup(Lookup),
}

/// Subcommands that read from the API, through the cache unless disabled
#[derive(Subcommand, Debug)]
enum Lookup {
    /// Search movies by title
    SearchMovie {
        query: String,
        /// Result page, starting at 1
        #[arg(long)]
        page: Option<u32>,
        /// Release year
        #[arg(long)]
        year: Option<u16>,
        /// Response language, e.g. en-US
        #[arg(long)]
        language: Option<String>,
    },
    /// Show the details of a movie
    Movie {
        id: u64,
        #[arg(long)]
        language: Option<String>,
    },
    /// List the cast of a movie
    MovieCredits { id: u64 },
    /// Search TV shows by name
    SearchTv {
        query: String,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show the details of a TV show
    Tv {
        id: u64,
        #[arg(long)]
        language: Option<String>,
    },
    /// List the cast of a TV show
    TvCredits { id: u64 },
    /// List the episodes of a season
    Season {
        id: u64,
        season: u32,
        #[arg(long)]
        language: Option<String>,
    },
    /// Show the details of an episode
    Episode {
        id: u64,
        season: u32,
        episode: u32,
        #[arg(long)]
        language: Option<String>,
    },
    /// Run a short tour: search, a season listing and a movie lookup
    Demo,
}

impl Cli {
    fn config(&self) -> PersistentConfig {
        PersistentConfig {
            client: Config {
                api_url: self.api_url.clone(),
                api_key: self.api_key.clone(),
                access_token: self.access_token.clone(),
                image_url: self.image_url.clone(),
            },
            cache_dir: self.cache_dir.clone(),
        }
    }

    fn mode(&self) -> ClientMode {
        if self.no_cache {
            ClientMode::Plain
        } else {
            ClientMode::Persistent
        }
    }
}

fn print_credits(client: &dyn TmdbApi, credits: &Credits) {
    for cast in &credits.cast {
        let profile = cast.profile_path.as_deref().unwrap_or_default();
        println!(
            "{} => {} {}",
            cast.name,
            cast.character,
            client.image_url(profile, None)
        );
    }
}

fn demo(client: &dyn TmdbApi) -> Result<(), TmdbError> {
    let search = client.search_movie("The Matrix", &SearchMovieRequest::default())?;
    for movie in &search.results {
        println!("{} {}", movie.id, movie.title);
    }

    let season = client.tv_season(1399, 1, &TvSeasonRequest::default())?;
    println!("{}", season.name);
    for episode in &season.episodes {
        println!("{}", episode.name);
    }

    let movie = client.movie_detail(603, &MovieDetailRequest::default())?;
    println!("{}", movie.title);

    Ok(())
}

fn lookup(client: &dyn TmdbApi, command: Lookup) -> Result<(), TmdbError> {
    match command {
        Lookup::SearchMovie {
            query,
            page,
            year,
            language,
        } => {
            let opts = SearchMovieRequest {
                page,
                year,
                language,
                ..Default::default()
            };
            let result = client.search_movie(&query, &opts)?;
            for movie in &result.results {
                println!("{} {} ({})", movie.id, movie.title, movie.release_date);
            }
            println!("Page {}/{}", result.page, result.total_pages);
        }
        Lookup::Movie { id, language } => {
            let opts = MovieDetailRequest {
                language,
                ..Default::default()
            };
            let movie = client.movie_detail(id, &opts)?;
            println!("{} ({})", movie.title, movie.release_date);
            if let Some(tagline) = movie.tagline.as_deref().filter(|t| !t.is_empty()) {
                println!("  {}", tagline);
            }
            if let Some(runtime) = movie.runtime {
                println!("  Runtime: {} min", runtime);
            }
            let poster = movie.poster_path.as_deref().unwrap_or_default();
            println!("  Poster: {}", client.image_url(poster, Some("w500")));
        }
        Lookup::MovieCredits { id } => {
            let credits = client.movie_credits(id, &MovieCreditsRequest::default())?;
            print_credits(client, &credits);
        }
        Lookup::SearchTv {
            query,
            page,
            language,
        } => {
            let opts = SearchTvRequest {
                page,
                language,
                ..Default::default()
            };
            let result = client.search_tv(&query, &opts)?;
            for show in &result.results {
                println!("{} {}", show.id, show.name);
            }
            println!("Page {}/{}", result.page, result.total_pages);
        }
        Lookup::Tv { id, language } => {
            let show = client.tv_detail(id, &TvDetailRequest { language })?;
            println!("{}", show.name);
            println!(
                "  {} season(s), {} episode(s), {}",
                show.number_of_seasons, show.number_of_episodes, show.status
            );
        }
        Lookup::TvCredits { id } => {
            let credits = client.tv_credits(id, &TvCreditsRequest::default())?;
            print_credits(client, &credits);
        }
        Lookup::Season {
            id,
            season,
            language,
        } => {
            let detail = client.tv_season(id, season, &TvSeasonRequest { language })?;
            println!("{}", detail.name);
            for episode in &detail.episodes {
                println!(
                    "  S{:02}E{:02} - {}",
                    episode.season_number, episode.episode_number, episode.name
                );
            }
        }
        Lookup::Episode {
            id,
            season,
            episode,
            language,
        } => {
            let detail = client.tv_episode(id, season, episode, &TvEpisodeRequest { language })?;
            println!(
                "S{:02}E{:02} - {}",
                detail.season_number, detail.episode_number, detail.name
            );
            if !detail.overview.is_empty() {
                println!("  {}", detail.overview);
            }
        }
        Lookup::Demo => demo(client)?,
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), TmdbError> {
    let config = cli.config();
    let mode = cli.mode();

    match cli.command.unwrap_or(Command::Lookup(Lookup::Demo)) {
        // Authentication never touches the cache
        Command::Auth => {
            let response = TmdbClient::new(config.client).authenticate()?;
            println!("{} ({})", response.status_message, response.status_code);
        }
        Command::Lookup(command) => {
            let client = connect(config, mode)?;
            lookup(client.as_ref(), command)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
