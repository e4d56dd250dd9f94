use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "discogs-collage",
    version,
    about = "Generate a collage of album art from your Discogs collection"
)]
struct Cli {
    /// The Discogs username to create a collage from.
    #[arg(short, long)]
    username: String,

    /// Edge length in pixels of each square in the collage.
    #[arg(short = 's', long, default_value_t = 200)]
    square_size: u32,

    /// Sort the collection by artist (descending) before placing covers.
    #[arg(long, default_value_t = false)]
    sort: bool,

    /// Output PNG path.
    #[arg(short, long, default_value = ".out.png")]
    out: PathBuf,

    /// Download thumbnails one at a time on the main thread.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override download worker threads (defaults to available parallelism).
    #[arg(long)]
    threads: Option<usize>,

    /// Catalog API base URL.
    #[arg(long, default_value = collage::config::DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Resampling filter used to fit covers into their squares.
    #[arg(long, value_enum, default_value_t = FilterChoice::Lanczos3)]
    filter: FilterChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<FilterChoice> for collage::ResizeFilter {
    fn from(c: FilterChoice) -> Self {
        match c {
            FilterChoice::Nearest => Self::Nearest,
            FilterChoice::Triangle => Self::Triangle,
            FilterChoice::CatmullRom => Self::CatmullRom,
            FilterChoice::Gaussian => Self::Gaussian,
            FilterChoice::Lanczos3 => Self::Lanczos3,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    // Credential first: nothing touches the network without it.
    let config = collage::ClientConfig::from_env()?
        .with_api_base(&cli.api_base)
        .with_timeout(Duration::from_secs(cli.timeout_secs))
        .with_threads(cli.threads);
    let request = collage::CollageRequest {
        username: cli.username.clone(),
        cell: collage::CellSize::new(cli.square_size)?,
        sort: collage::SortOrder::from_flag(cli.sort),
    };

    let transport = collage::ReqwestTransport::new(&config)?;
    let pipeline = collage::CollagePipeline::new(config.clone(), transport)?
        .with_fetch_opts(collage::FetchOpts {
            parallel: !cli.sequential,
            threads: config.threads,
        })
        .with_composer(collage::GridComposer::new(cli.filter.into()));

    let canvas = pipeline
        .run(&request)
        .with_context(|| format!("build collage for '{}'", cli.username))?;
    collage::write_png(&canvas, &cli.out)?;

    eprintln!(
        "wrote {} ({}x{})",
        cli.out.display(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
