use std::{
    io::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut source videos into numbered frames (requires `ffmpeg` on PATH).
    Extract(ExtractArgs),
    /// Print sections, their frame ranges and the logo bands.
    Sections(SectionsArgs),
    /// Replay a timed input script against the engine and print each update as JSON.
    Simulate(SimulateArgs),
    /// Load every frame of a sequence and report failures.
    Preload(PreloadArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Manifest JSON written by `extract`.
    #[arg(long, conflicts_with = "preset")]
    manifest: Option<PathBuf>,

    /// Built-in frame layout, used when no manifest is given.
    #[arg(long, value_enum, default_value_t = PresetChoice::Extended)]
    preset: PresetChoice,

    /// Engine configuration JSON; unset fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Source videos in playback order.
    #[arg(long = "input", required = true)]
    inputs: Vec<PathBuf>,

    /// Frame directory (emptied first).
    #[arg(long)]
    out: PathBuf,

    /// Frames sampled per second of video.
    #[arg(long, default_value_t = scrollreel::manifest::model::SITE_FPS)]
    fps: u32,

    /// WebP quality, 0-100.
    #[arg(long, default_value_t = scrollreel::extract::run::DEFAULT_QUALITY)]
    quality: u8,

    /// Output width in pixels.
    #[arg(long, default_value_t = scrollreel::extract::run::DEFAULT_WIDTH)]
    width: u32,
}

#[derive(Parser, Debug)]
struct SectionsArgs {
    #[command(flatten)]
    source: ManifestArgs,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    source: ManifestArgs,

    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,
}

#[derive(Parser, Debug)]
struct PreloadArgs {
    #[command(flatten)]
    source: ManifestArgs,

    /// Directory holding the frames. Defaults to the manifest's directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Loader threads.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Compact,
    Extended,
}

impl From<PresetChoice> for scrollreel::Preset {
    fn from(c: PresetChoice) -> Self {
        match c {
            PresetChoice::Compact => Self::Compact,
            PresetChoice::Extended => Self::Extended,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Extract(args) => cmd_extract(args),
        Command::Sections(args) => cmd_sections(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preload(args) => cmd_preload(args),
    }
}

fn load_manifest(args: &ManifestArgs) -> anyhow::Result<scrollreel::FrameManifest> {
    match &args.manifest {
        Some(path) => Ok(scrollreel::FrameManifest::from_path(path)?),
        None => Ok(scrollreel::Preset::from(args.preset).manifest()),
    }
}

fn load_config(args: &ManifestArgs) -> anyhow::Result<scrollreel::EngineConfig> {
    match &args.config {
        Some(path) => Ok(scrollreel::EngineConfig::from_path(path)?),
        None => Ok(scrollreel::EngineConfig::default()),
    }
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    if !scrollreel::is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for frame extraction, but was not found on PATH");
    }

    let mut opts = scrollreel::ExtractOpts::new(args.inputs, &args.out);
    opts.fps = args.fps;
    opts.quality = args.quality;
    opts.width = args.width;
    opts.section_titles = scrollreel::manifest::model::SITE_SECTION_TITLES
        .iter()
        .map(|s| (*s).to_owned())
        .collect();

    let report = scrollreel::run_extraction(&opts, &scrollreel::FfmpegExtractor)?;
    for r in &report.inputs {
        eprintln!("{}: {:?}", r.input.display(), r.outcome);
    }

    let Some(m) = &report.manifest else {
        anyhow::bail!("no frames were extracted into '{}'", args.out.display());
    };
    let points = m
        .snap_points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("total frames: {}", m.total_frames);
    println!("snap points: [{points}]");
    eprintln!(
        "wrote {} ({} ok, {} skipped)",
        args.out.display(),
        report.succeeded(),
        report.failed()
    );
    Ok(())
}

fn cmd_sections(args: SectionsArgs) -> anyhow::Result<()> {
    let m = load_manifest(&args.source)?;
    let cfg = load_config(&args.source)?;
    let table = scrollreel::SectionTable::from_manifest(&m)?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{} frames, {} fps", m.total_frames, m.fps)?;
    for s in table.sections() {
        let last = s.range.last().unwrap_or(s.range.start);
        writeln!(out, "{}\t{}\t{}-{}", s.id.0, s.title, s.range.start, last)?;
    }
    for band in cfg.logo.bands(m.total_frames) {
        let variant = match band.variant {
            scrollreel::LogoVariant::Dark => "dark",
            scrollreel::LogoVariant::Light => "light",
        };
        writeln!(out, "logo {variant}\t{}-{}", band.first, band.last)?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let m = load_manifest(&args.source)?;
    let cfg = load_config(&args.source)?;
    let script = scrollreel::Script::from_path(&args.script)?;

    let events = scrollreel::replay(&m, cfg, &script)?;
    let mut out = std::io::stdout().lock();
    for ev in &events {
        let line = serde_json::to_string(ev).with_context(|| "encode replay event")?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cmd_preload(args: PreloadArgs) -> anyhow::Result<()> {
    let m = load_manifest(&args.source)?;
    let root = match (&args.root, &args.source.manifest) {
        (Some(root), _) => root.clone(),
        (None, Some(path)) => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
        (None, None) => anyhow::bail!("--root is required when no --manifest is given"),
    };
    if !root.is_dir() {
        anyhow::bail!("frame directory '{}' does not exist", root.display());
    }

    let source = Arc::new(scrollreel::FsFrameSource::new(&root, &m));
    let opts = scrollreel::PreloadOpts {
        threads: args.threads,
        priority: None,
    };
    let mut cache = scrollreel::FrameCache::new(m.total_frames);
    let mut handle = scrollreel::Preloader::start(&m, source, opts)?;
    let outcome = handle.wait(&mut cache);

    let progress = outcome.progress;
    println!(
        "{}",
        serde_json::to_string(&progress).with_context(|| "encode progress")?
    );
    eprintln!(
        "loaded {} of {} frames from '{}'",
        progress.attempted - progress.failed,
        progress.total,
        root.display()
    );
    Ok(())
}
