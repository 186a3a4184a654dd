use anyhow::{Context, Result};
use clap::Parser;
use cloudthumb_io::read_point_cloud;
use cloudthumb_render::{FileSink, ImageSink, RenderConfig, ThumbnailRenderer};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

#[derive(Parser, Debug)]
#[command(name = "cloudthumb", version, about = "Render a thumbnail image for a point cloud file")]
struct Args {
    /// Point cloud file to render (PLY)
    input: PathBuf,

    /// Output image; the format follows the extension. Defaults to the input with `.png`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Thumbnail edge length in pixels
    #[arg(short, long, default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..))]
    size: u32,

    /// TOML file overriding camera and shading parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    let Some(path) = path else {
        return Ok(RenderConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: RenderConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = load_config(args.config.as_deref())?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("png"));

    let start = Instant::now();
    let cloud = read_point_cloud(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    info!("loaded {} points in {:?}", cloud.len(), start.elapsed());

    let renderer = ThumbnailRenderer::new(config);
    let (thumbnail, report) = renderer
        .render_with_report(&cloud, args.size)
        .with_context(|| format!("rendering {}", args.input.display()))?;
    if report.drawn == 0 {
        warn!("no point of {} landed inside the thumbnail", args.input.display());
    }

    let written = FileSink::new(&output)
        .accept(&thumbnail, thumbnail.background())
        .with_context(|| format!("writing {}", output.display()))?;
    info!("rendered in {:?}", start.elapsed());

    println!(
        "Wrote {} ({size}x{size}, {} points)",
        written.display(),
        report.points,
        size = args.size
    );
    Ok(())
}
