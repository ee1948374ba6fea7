/// Encore - simulated music playback from the command line
use clap::{Args, Parser, Subcommand};
use encore_catalog::StaticLyricsProvider;
use encore_cli::{
    config::CliConfig,
    display,
    session::{self, Selection, SessionOptions},
};
use encore_core::{AlbumId, CatalogProvider, HistoryPersistence, LyricsProvider, PlaylistId, TrackId};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "encore")]
#[command(about = "Encore music player engine", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a track, album, or playlist with the simulated clock
    Play(PlayArgs),
    /// Search the catalog
    Search {
        /// Search text
        query: String,
    },
    /// Show trending tracks
    Trending {
        /// Number of tracks
        #[arg(short, long, default_value_t = 6)]
        limit: usize,
    },
    /// Print timed lyrics for a track
    Lyrics {
        /// Track ID
        track: TrackId,
    },
    /// Show recently played tracks
    History {
        /// Number of entries (defaults to the configured listing size)
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Track ID to play on its own
    #[arg(long)]
    track: Option<TrackId>,

    /// Album ID to play from the start
    #[arg(long)]
    album: Option<AlbumId>,

    /// Playlist ID to play from the start
    #[arg(long)]
    playlist: Option<PlaylistId>,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Play full tracks instead of previews
    #[arg(short, long)]
    authenticated: bool,

    /// Transport intervals to run
    #[arg(short, long, default_value_t = 60)]
    ticks: u32,

    /// Enable shuffle before starting
    #[arg(long)]
    shuffle: bool,

    /// Open the lyrics panel
    #[arg(long)]
    lyrics: bool,
}

impl SelectionArgs {
    fn selection(&self) -> Option<Selection> {
        self.track
            .map(Selection::Track)
            .or_else(|| self.album.map(Selection::Album))
            .or_else(|| self.playlist.map(Selection::Playlist))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "encore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Play(args) => play(&config, args).await?,
        Commands::Search { query } => search(&config, &query).await?,
        Commands::Trending { limit } => trending(&config, limit).await?,
        Commands::Lyrics { track } => lyrics(track).await?,
        Commands::History { limit } => history(&config, limit).await?,
    }

    Ok(())
}

async fn play(config: &CliConfig, args: PlayArgs) -> anyhow::Result<()> {
    let selection = args
        .selection
        .selection()
        .ok_or_else(|| anyhow::anyhow!("one of --track, --album or --playlist is required"))?;

    let options = SessionOptions {
        selection,
        authenticated: args.authenticated,
        ticks: args.ticks,
        shuffle: args.shuffle,
        lyrics: args.lyrics,
    };

    let run = session::run_session(config, options);
    let snapshot = tokio::select! {
        result = run => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            return Ok(());
        }
    };

    println!();
    println!("Recently played:");
    for entry in snapshot.history.iter().take(5) {
        println!("  {}", display::track_line(&entry.track));
    }
    Ok(())
}

async fn search(config: &CliConfig, query: &str) -> anyhow::Result<()> {
    let catalog = session::load_catalog(config).await?;
    let results = catalog.search(query).await?;
    println!("{}", display::search_report(&results));
    Ok(())
}

async fn trending(config: &CliConfig, limit: usize) -> anyhow::Result<()> {
    let catalog = session::load_catalog(config).await?;
    for track in catalog.trending(limit).await? {
        println!("{}", display::track_line(&track));
    }
    Ok(())
}

async fn lyrics(track: TrackId) -> anyhow::Result<()> {
    let provider = StaticLyricsProvider::demo().with_delay(Duration::ZERO);
    match provider.get_lyrics(track).await? {
        Some(document) => println!("{}", display::lyrics_report(&document)),
        None => println!("{}", encore_core::LYRICS_UNAVAILABLE_TEXT),
    }
    Ok(())
}

async fn history(config: &CliConfig, limit: Option<usize>) -> anyhow::Result<()> {
    let store = session::open_history(config).await?;
    let limit = limit.unwrap_or(config.player.history_list_default);

    let entries = store.load_recent(limit).await?;
    if entries.is_empty() {
        println!("Nothing played yet");
    }
    for entry in entries {
        println!(
            "{}  {}",
            entry.played_at.format("%Y-%m-%d %H:%M"),
            display::track_line(&entry.track)
        );
    }
    Ok(())
}
