/// Podcastr Player - plays an episode catalog on a simulated audio device
use anyhow::Context;
use clap::{Parser, Subcommand};
use podcastr_audio::{AudioDriver, FailurePolicy, SessionPhase, SimulatedDevice};
use podcastr_player::{describe, load_catalog, PlayerConfig};
use podcastr_playback::{format_duration, PlaybackController};
use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr-player")]
#[command(about = "Podcast episode player driving a simulated audio device", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a catalog from the given episode
    Play {
        /// Catalog JSON file
        catalog: PathBuf,

        /// Episode to start from (zero-based)
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Pick the next episode at random
        #[arg(long)]
        shuffle: bool,

        /// Repeat the current episode
        #[arg(long = "loop")]
        looping: bool,

        /// Shuffle seed for reproducible runs
        #[arg(long, env = "PODCASTR_SEED")]
        seed: Option<u64>,

        /// What to do when an episode cannot be played (skip, stop)
        #[arg(long)]
        failure_policy: Option<String>,

        /// Episode seconds played per wall-clock second
        #[arg(long)]
        speed: Option<f64>,

        /// Wall-clock milliseconds between device advances
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Stop after this many seconds of episode time
        #[arg(long)]
        max_seconds: Option<u64>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the episodes in a catalog
    List {
        /// Catalog JSON file
        catalog: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "podcastr_player=info,podcastr_audio=info,podcastr_playback=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            catalog,
            index,
            shuffle,
            looping,
            seed,
            failure_policy,
            speed,
            tick_ms,
            max_seconds,
            config,
        } => {
            let mut config = PlayerConfig::load(config.as_deref())?;

            // Command-line flags win over file and environment
            if shuffle {
                config.playback.shuffle = true;
            }
            if looping {
                config.playback.looping = true;
            }
            if seed.is_some() {
                config.playback.shuffle_seed = seed;
            }
            if let Some(policy) = failure_policy {
                config.driver.failure_policy = parse_failure_policy(&policy)?;
            }
            if let Some(speed) = speed {
                config.simulation.speed = speed;
            }
            if let Some(tick_ms) = tick_ms {
                config.simulation.tick_ms = tick_ms;
            }
            config.validate()?;

            play(&catalog, index, &config, max_seconds)?;
        }
        Commands::List { catalog } => {
            list(&catalog)?;
        }
    }

    Ok(())
}

fn parse_failure_policy(value: &str) -> anyhow::Result<FailurePolicy> {
    match value.to_ascii_lowercase().as_str() {
        "skip" => Ok(FailurePolicy::Skip),
        "stop" => Ok(FailurePolicy::Stop),
        other => anyhow::bail!("unknown failure policy {:?} (expected skip or stop)", other),
    }
}

fn play(
    catalog: &Path,
    index: usize,
    config: &PlayerConfig,
    max_seconds: Option<u64>,
) -> anyhow::Result<()> {
    let episodes = load_catalog(catalog)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;

    let device = SimulatedDevice::from_episodes(&episodes);
    let controller = PlaybackController::new(config.playback.clone());
    let mut driver = AudioDriver::new(controller, device, config.driver.clone());
    let updates = driver.subscribe();

    tracing::info!(
        "Playing {} episodes at {}x (shuffle: {}, loop: {})",
        episodes.len(),
        config.simulation.speed,
        config.playback.shuffle,
        config.playback.looping
    );

    driver.try_play_list(episodes, index)?;

    let tick = config.simulation.tick();
    let step = config.simulation.step();
    let limit = max_seconds.map(Duration::from_secs);
    let mut elapsed = Duration::ZERO;

    loop {
        driver.process_pending();
        for update in updates.try_iter() {
            for line in describe(&update) {
                println!("{}", line);
            }
        }

        if driver.phase() == SessionPhase::NoEpisode {
            break;
        }

        if limit.is_some_and(|limit| elapsed >= limit) {
            tracing::info!("Time limit reached, stopping");
            driver.clear_player_state();
            continue;
        }

        thread::sleep(tick);
        driver.device_mut().advance(step);
        elapsed += step;
    }

    Ok(())
}

fn list(catalog: &Path) -> anyhow::Result<()> {
    let episodes = load_catalog(catalog)
        .with_context(|| format!("failed to load catalog {}", catalog.display()))?;

    println!("Episodes:");
    for (index, episode) in episodes.iter().enumerate() {
        println!(
            "  {:>3}  {}  {} - {}",
            index,
            format_duration(episode.duration_seconds),
            episode.title,
            episode.members
        );
    }

    Ok(())
}
