/// Groove - command-line player for the Groove backend
use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use groove_cli::{render, AccountDevice, GrooveConfig};
use groove_client::{AuthSession, ClientConfig, FileTokenStore, GrooveClient, TRACK_SEARCH_LIMIT};
use groove_core::{Collection, CollectionKind, Track};
use groove_playback::{track_rows, PlaybackBridge, PlayerController, QueueStore, Screen};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "groove")]
#[command(about = "Groove command-line player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GROOVE_CONFIG", default_value = "groove.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the provider sign-in URL
    Login,
    /// Finish sign-in with the code from the redirect
    Callback {
        /// Authorization code
        #[arg(short, long)]
        code: String,
    },
    /// Show the signed-in account
    Whoami,
    /// Sign out and forget stored tokens
    Logout,
    /// Search tracks, artists and playlists
    Search {
        /// Search text
        query: String,
    },
    /// List the account's playback devices
    Devices,
    /// Show what is playing
    Status,
    /// Play a track URI, or the results of a track search
    Play {
        /// Track URI or search text
        query: String,
    },
    /// Toggle between playing and paused
    Toggle,
    /// Pause playback
    Pause,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groove=info,groove_client=info,groove_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = GrooveConfig::load_from(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Login => login(&config).await?,
        Commands::Callback { code } => callback(&config, &code).await?,
        Commands::Whoami => whoami(&config).await?,
        Commands::Logout => logout(&config).await?,
        Commands::Search { query } => search(&config, &query).await?,
        Commands::Devices => devices(&config).await?,
        Commands::Status => status(&config).await?,
        Commands::Play { query } => play(&config, &query).await?,
        Commands::Toggle => toggle(&config).await?,
        Commands::Pause => pause(&config).await?,
    }

    Ok(())
}

fn session(config: &GrooveConfig) -> anyhow::Result<AuthSession> {
    let client = GrooveClient::new(ClientConfig::new(&config.backend.url))?;
    let store = Arc::new(FileTokenStore::new(&config.storage.token_file));
    Ok(AuthSession::new(client, store))
}

/// Restored session, failing when nobody is signed in
async fn signed_in(config: &GrooveConfig) -> anyhow::Result<AuthSession> {
    let mut session = session(config)?;
    if !session.restore().await? {
        bail!("Not signed in. Run `groove login` first.");
    }
    Ok(session)
}

/// Signed-in session allowed to stream
async fn premium(config: &GrooveConfig) -> anyhow::Result<AuthSession> {
    let session = signed_in(config).await?;
    match Screen::resolve(session.is_loading(), session.is_authenticated(), session.is_premium()) {
        Screen::Main => Ok(session),
        screen => bail!(render::account(session.user(), screen)),
    }
}

/// Player connected to an account device
async fn player(config: &GrooveConfig, session: &AuthSession) -> anyhow::Result<PlayerController> {
    let token = session
        .access_token()
        .ok_or_else(|| anyhow!("Not signed in. Run `groove login` first."))?;
    let client = session.client().clone();

    let mut bridge = PlaybackBridge::new(
        config.bridge_config(),
        Arc::new(AccountDevice::factory(client.clone())),
        Arc::new(client),
    );
    bridge
        .initialize(token)
        .await
        .context("Failed to connect to a playback device")?;

    let mut controller = PlayerController::new(bridge);
    controller.sync();
    Ok(controller)
}

async fn login(config: &GrooveConfig) -> anyhow::Result<()> {
    let session = session(config)?;
    let url = session.login_url().await?;

    println!("Open this URL to sign in:\n\n  {}\n", url);
    println!("Then run `groove callback --code <code>` with the code from the redirect.");
    Ok(())
}

async fn callback(config: &GrooveConfig, code: &str) -> anyhow::Result<()> {
    let mut session = session(config)?;
    session.complete_login(code).await?;

    let screen = Screen::resolve(false, session.is_authenticated(), session.is_premium());
    println!("{}", render::account(session.user(), screen));
    Ok(())
}

async fn whoami(config: &GrooveConfig) -> anyhow::Result<()> {
    let mut session = session(config)?;
    session.restore().await?;

    let screen = Screen::resolve(session.is_loading(), session.is_authenticated(), session.is_premium());
    println!("{}", render::account(session.user(), screen));
    Ok(())
}

async fn logout(config: &GrooveConfig) -> anyhow::Result<()> {
    let mut session = session(config)?;
    session.logout()?;
    println!("Signed out");
    Ok(())
}

async fn search(config: &GrooveConfig, query: &str) -> anyhow::Result<()> {
    let mut session = signed_in(config).await?;

    let results = session
        .with_auto_refresh(|client, token| async move {
            client.catalog(&token).search_all(query).await
        })
        .await?;

    if results.is_empty() {
        println!("No results for \"{}\"", query);
        return Ok(());
    }

    let tracks = results.track_collection(query);
    println!("Tracks\n{}", render::track_list(&track_rows(&tracks, &QueueStore::new())));
    if !results.artists.is_empty() {
        println!("\nArtists\n{}", render::artist_list(&results.artists));
    }
    if !results.playlists.is_empty() {
        println!("\nPlaylists\n{}", render::playlist_list(&results.playlists));
    }
    Ok(())
}

async fn devices(config: &GrooveConfig) -> anyhow::Result<()> {
    let mut session = signed_in(config).await?;

    let devices = session
        .with_auto_refresh(|client, token| async move { client.playback(&token).devices().await })
        .await?;

    println!("{}", render::device_list(&devices));
    Ok(())
}

async fn status(config: &GrooveConfig) -> anyhow::Result<()> {
    let session = signed_in(config).await?;
    let controller = player(config, &session).await?;

    println!("{}", render::player_bar(controller.display().as_ref()));
    if let Some(message) = controller.error_message() {
        println!("Error: {}", message);
    }
    Ok(())
}

async fn play(config: &GrooveConfig, query: &str) -> anyhow::Result<()> {
    let mut session = premium(config).await?;

    let collection = if query.starts_with("spotify:") {
        let track = Track::new(query, query, "", "", 0).with_source_uri(query);
        Collection::new(query, CollectionKind::Search, query).with_tracks(vec![track])
    } else {
        let tracks = session
            .with_auto_refresh(|client, token| async move {
                client
                    .catalog(&token)
                    .search_tracks(query, TRACK_SEARCH_LIMIT)
                    .await
            })
            .await?;
        Collection::new(format!("search:{}", query), CollectionKind::Search, query)
            .with_tracks(tracks)
    };

    if collection.is_empty() {
        bail!("No tracks found for \"{}\"", query);
    }

    let mut controller = player(config, &session).await?;
    controller
        .play_collection(&collection, None)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    println!("{}", render::track_list(&track_rows(&collection, controller.queue())));
    Ok(())
}

async fn toggle(config: &GrooveConfig) -> anyhow::Result<()> {
    let session = premium(config).await?;
    let mut controller = player(config, &session).await?;

    controller
        .toggle_play_pause()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    println!("{}", render::player_bar(controller.display().as_ref()));
    Ok(())
}

async fn pause(config: &GrooveConfig) -> anyhow::Result<()> {
    let session = premium(config).await?;
    let mut controller = player(config, &session).await?;

    controller
        .bridge_mut()
        .pause()
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    println!("Paused");
    Ok(())
}
