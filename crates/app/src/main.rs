use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use sort_visualiser_core::{
    random_bars, Algorithm, AppConfig, Collaborators, PlaybackSession, SortEngine, StepRenderer,
    TextRenderer, ThreadPacer, ToneSink, Voice,
};
use tracing_subscriber::EnvFilter;

fn main() -> sort_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_sort(args),
        Commands::List => {
            for algorithm in Algorithm::ALL {
                println!("{algorithm}");
            }
            Ok(())
        }
    }
}

fn run_sort(args: RunArgs) -> sort_visualiser_core::Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(method) = args.method {
        config.sort.method = method;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.sort.delay_ms = delay_ms;
    }
    if args.seed.is_some() {
        config.sort.seed = args.seed;
    }
    config.validate()?;

    let mut rng = match config.sort.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let count = args.count.unwrap_or_else(|| config.canvas.bar_count());
    let mut bars = random_bars(count, config.canvas.height, &mut rng);

    tracing::info!(
        method = %config.sort.method,
        bars = bars.len(),
        delay_ms = config.sort.delay_ms,
        "starting visualisation"
    );

    let mut renderer = TextRenderer::new(std::io::stdout().lock(), args.rows, config.canvas.height);
    if !args.plain {
        renderer = renderer.with_palette(config.palette.clone()).clearing();
    }
    if config.audio.enabled && !args.mute {
        let session = PlaybackSession::start(&config.audio, Box::new(TraceSink))?;
        renderer = renderer.with_session(session);
    }

    renderer.show(&bars)?;

    let engine = SortEngine::new(&config.sort);
    let mut pacer = ThreadPacer::new();
    let report = engine.run_sort(
        &mut bars,
        &config.sort.method,
        Collaborators::new(&mut renderer, &mut pacer, &mut rng),
    )?;

    tracing::info!(?report, "visualisation finished");
    Ok(())
}

/// Tone sink that only logs the voices it is handed.
struct TraceSink;

impl ToneSink for TraceSink {
    fn play(&mut self, voice: &Voice) -> sort_visualiser_core::Result<()> {
        tracing::trace!(rate = voice.rate, samples = voice.samples.len(), "tone");
        Ok(())
    }

    fn stop(&mut self) -> sort_visualiser_core::Result<()> {
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated, audible sorting algorithms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random bars and animate one algorithm sorting them.
    Run(RunArgs),
    /// Print the names of every available algorithm.
    List,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Algorithm to run; overrides the configuration file.
    #[arg(short, long)]
    method: Option<String>,
    /// Number of bars. Defaults to as many as fit on the configured canvas.
    #[arg(short = 'n', long)]
    count: Option<usize>,
    /// Seed for bar generation and bogo sort.
    #[arg(short, long)]
    seed: Option<u64>,
    /// Pause after every step, in milliseconds.
    #[arg(short, long)]
    delay_ms: Option<u64>,
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Terminal rows used for the tallest bar.
    #[arg(long, default_value_t = 16)]
    rows: usize,
    /// Skip the playback session.
    #[arg(long)]
    mute: bool,
    /// Draw without colours or screen clearing.
    #[arg(long)]
    plain: bool,
}
