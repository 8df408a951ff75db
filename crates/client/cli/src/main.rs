//! Headless episode runner.
//!
//! Builds playgrounds from environment settings, lets seeded random walkers
//! play them out and optionally stores the final snapshot of each episode.
use anyhow::{Context, Result};
use playground_core::PlaygroundFactory;
use playground_runtime::{
    EpisodeSummary, FileSnapshotRepository, RandomWalkProvider, RuntimeConfig, SnapshotRepository,
    TurnExecutor,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = RuntimeConfig::from_env();
    tracing::info!(
        width = config.params.width,
        height = config.params.height,
        episodes = config.episodes,
        max_turns = config.max_turns,
        "starting run"
    );

    let repository = config
        .snapshot_dir
        .as_ref()
        .map(|dir| {
            FileSnapshotRepository::with_format(dir, config.snapshot_format)
                .with_context(|| format!("cannot open snapshot directory {}", dir.display()))
        })
        .transpose()?;

    let mut factory = PlaygroundFactory::new();
    let mut summaries = Vec::with_capacity(config.episodes as usize);

    for episode in 0..config.episodes {
        let params = config.episode_params(episode);
        let playground = factory
            .create(&params)
            .with_context(|| format!("episode {episode}: invalid playground parameters"))?;

        let hero = RandomWalkProvider::seeded(params.seed);
        let enemies = RandomWalkProvider::seeded(params.seed.wrapping_add(u64::MAX / 2));
        let mut executor = TurnExecutor::new(playground, hero, enemies);
        let summary = executor.run(config.max_turns)?;

        if let Some(repository) = &repository {
            let snapshot = executor.playground().snapshot();
            repository
                .save(&snapshot)
                .with_context(|| format!("episode {episode}: saving snapshot"))?;
        }

        summaries.push(summary);
    }

    report(&summaries);
    Ok(())
}

fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn report(summaries: &[EpisodeSummary]) {
    let escaped = summaries.iter().filter(|s| s.escaped()).count();
    let caught = summaries.iter().filter(|s| s.caught()).count();
    let undecided = summaries.len() - escaped - caught;

    for summary in summaries {
        let result = match summary.outcome {
            Some(_) if summary.escaped() => "escaped",
            Some(_) => "caught",
            None => "turn limit",
        };
        println!(
            "{}: {} after {} turns ({} applied, {} rejected)",
            summary.playground, result, summary.turns, summary.applied, summary.rejected
        );
    }

    tracing::info!(escaped, caught, undecided, "run finished");
}
