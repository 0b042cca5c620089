use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "slideglow", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one carousel from local images.
    Render(RenderArgs),
    /// Print the fitted font size and line breaks for a text.
    Fit(FitArgs),
    /// Render and upload one carousel per row of a JSON rows file.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// TrueType/OpenType font shared by every slide.
    #[arg(long)]
    font: PathBuf,

    /// Output directory for `slide{n}.jpg`.
    #[arg(long)]
    out: PathBuf,

    /// Carousel config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Slide background, once per slide.
    #[arg(long = "image", required = true)]
    images: Vec<PathBuf>,

    /// Slide text, in slide order. Missing trailing texts render no overlay.
    #[arg(long = "text")]
    texts: Vec<String>,

    /// Slide text color (`#RRGGBB`), in slide order.
    #[arg(long = "color")]
    colors: Vec<String>,

    /// Print the font family name and SHA-256 of the font bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct FitArgs {
    /// TrueType/OpenType font.
    #[arg(long)]
    font: PathBuf,

    /// Text to fit.
    #[arg(long)]
    text: String,

    /// Carousel config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of rows; the first row is a header.
    #[arg(long)]
    rows: PathBuf,

    /// TrueType/OpenType font shared by every slide.
    #[arg(long)]
    font: PathBuf,

    /// Root directory of the local blob store.
    #[arg(long)]
    store: PathBuf,

    /// Source image folder per slide position (relative to the store root).
    #[arg(long = "source", required = true)]
    sources: Vec<String>,

    /// Destination parent folder per carousel set (relative to the store root).
    #[arg(long = "dest", required = true)]
    dests: Vec<String>,

    /// Scratch directory for downloads and rendered slides.
    #[arg(long, default_value = "temp")]
    work: PathBuf,

    /// Render threads (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// Carousel config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Fit(args) => cmd_fit(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_config(path: Option<&Path>) -> anyhow::Result<slideglow::CarouselConfig> {
    let cfg = match path {
        Some(p) => slideglow::CarouselConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => slideglow::CarouselConfig::default(),
    };
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font = slideglow::FontSource::from_path(&args.font)?;
    if args.dump_font {
        eprintln!("font diagnostics:");
        eprintln!("  source: {}", args.font.display());
        eprintln!("  family: {}", font.family_name());
        eprintln!("  sha256: {}", sha256_hex(font.bytes()));
    }

    let mut compositor = slideglow::Compositor::new(config)?;
    let images: Vec<Option<PathBuf>> = args.images.into_iter().map(Some).collect();
    let written =
        compositor.composite_with_font(&images, &font, &args.colors, &args.texts, &args.out)?;

    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_fit(args: FitArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font = slideglow::FontSource::from_path(&args.font)?;
    let mut engine = slideglow::TextLayoutEngine::new(&font)?;

    let safe = config.safe_area()?;
    let start = slideglow::initial_font_size(args.text.chars().count(), config.font_size_hint());
    let params = config.fit_params(start, &safe);
    let Some(block) = slideglow::fit_text(&args.text, &mut engine, &params) else {
        println!("no text to fit");
        return Ok(());
    };

    println!("start_size:   {start}");
    println!("font_size:    {}", block.font_size);
    println!("line_height:  {:.1}", block.line_height);
    println!("total_height: {:.1} / {}", block.total_height, safe.height());
    println!("overflow:     {}", block.overflow);
    for (i, line) in block.lines.iter().enumerate() {
        println!("line {}: {line}", i + 1);
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let font = slideglow::FontSource::from_path(&args.font)?;
    let store = slideglow::LocalBlobStore::new(&args.store);
    let rows = slideglow::JsonRowSource::new(&args.rows);

    let runner =
        slideglow::BatchRunner::new(config, &store, args.sources, args.dests, &args.work)?
            .with_threads(args.threads)?;
    let reports = runner.run(&rows, &font)?;

    for report in &reports {
        for c in &report.carousels {
            eprintln!(
                "row {} set {}: {} slides -> {}",
                report.row + 1,
                c.set,
                c.uploaded.len(),
                c.folder
            );
        }
        for set in &report.failed_sets {
            eprintln!("row {} set {set}: failed", report.row + 1);
        }
    }
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
