use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cutout", version, about = "Layered cutout-animation compositor")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single time sample as a PNG.
    Frame(FrameArgs),
    /// Render every frame as a numbered PNG sequence.
    Frames(FramesArgs),
    /// List the recognized parts, back to front.
    Catalog,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Directory holding `<part id>.png` images.
    #[arg(long)]
    parts_dir: Option<PathBuf>,

    /// Explicit part image as `id=path`; repeatable, overrides `--parts-dir`.
    #[arg(long = "part", value_parser = parse_part_arg)]
    parts: Vec<(String, PathBuf)>,

    /// Rig JSON. Without it the stock character rig is used.
    #[arg(long)]
    rig: Option<PathBuf>,

    /// Clip length in seconds (overrides the rig).
    #[arg(long)]
    duration: Option<f64>,

    /// Frames per second (overrides the rig).
    #[arg(long)]
    fps: Option<u32>,

    /// Give alpha-less images an opaque alpha channel instead of rejecting them.
    #[arg(long, default_value_t = false)]
    synthesize_alpha: bool,

    /// Drop optional parts whose image is unusable instead of failing.
    #[arg(long, default_value_t = false)]
    drop_invalid: bool,
}

#[derive(Args, Debug)]
struct RenderOptsArgs {
    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

impl RenderOptsArgs {
    fn to_opts(&self) -> cutout::RenderOpts {
        cutout::RenderOpts {
            parallel: self.parallel,
            threads: self.threads,
            chunk_size: self.chunk_size,
            ..cutout::RenderOpts::default()
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    render: RenderOptsArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = true)]
    overwrite: bool,

    /// Background color behind transparent pixels, as `RRGGBB` hex.
    #[arg(long, default_value = "ffffff", value_parser = parse_hex_rgb)]
    bg: [u8; 4],

    /// x264 constant rate factor.
    #[arg(long, default_value_t = 18)]
    crf: u8,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Time sample in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    render: RenderOptsArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Catalog => cmd_catalog(),
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

fn parse_part_arg(s: &str) -> Result<(String, PathBuf), String> {
    let (id, path) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `id=path`, got '{s}'"))?;
    if id.is_empty() || path.is_empty() {
        return Err(format!("expected `id=path`, got '{s}'"));
    }
    Ok((id.to_string(), PathBuf::from(path)))
}

fn parse_hex_rgb(s: &str) -> Result<[u8; 4], String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB hex color, got '{s}'"));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("bad color '{s}': {e}"))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?, 255])
}

fn load_rig(args: &SceneArgs) -> anyhow::Result<cutout::RigConfig> {
    let mut rig = match args.rig.as_deref() {
        Some(path) => cutout::RigConfig::from_path(path)?,
        None => cutout::RigConfig::character_default(
            args.duration.unwrap_or(5.0),
            cutout::Fps::whole(args.fps.unwrap_or(24))?,
        ),
    };
    if let Some(d) = args.duration {
        rig.duration_secs = d;
    }
    if let Some(n) = args.fps {
        rig.fps = cutout::Fps::whole(n)?;
    }
    if args.drop_invalid {
        rig.invalid_image_policy = cutout::InvalidImagePolicy::DropOptional;
    }
    Ok(rig)
}

fn load_images(
    args: &SceneArgs,
    catalog: &cutout::PartCatalog,
    policy: cutout::InvalidImagePolicy,
) -> anyhow::Result<BTreeMap<String, cutout::PartImage>> {
    let alpha = if args.synthesize_alpha {
        cutout::AlphaPolicy::Synthesize
    } else {
        cutout::AlphaPolicy::Require
    };

    let mut images = match args.parts_dir.as_deref() {
        Some(dir) => cutout::load_part_dir(dir, catalog, alpha, policy)
            .with_context(|| format!("load parts from '{}'", dir.display()))?,
        None => BTreeMap::new(),
    };

    let explicit = args
        .parts
        .iter()
        .map(|(id, path)| (id.clone(), cutout::load_part_image(id, path, alpha)));
    images.extend(cutout::admit_part_images(catalog, explicit, policy)?);

    if images.is_empty() {
        anyhow::bail!("no part images supplied (use --parts-dir or --part id=path)");
    }
    Ok(images)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let catalog = cutout::PartCatalog::character();
    let rig = load_rig(&args.scene)?;
    let images = load_images(&args.scene, &catalog, rig.invalid_image_policy)?;
    let spec = cutout::AnimationSpec::build(&catalog, &images, &rig)?;

    let mut sink = cutout::FfmpegSink::new(cutout::FfmpegSinkOpts {
        out_path: args.out.clone(),
        overwrite: args.overwrite,
        bg_rgba: args.bg,
        crf: args.crf,
    });
    let stats = cutout::render_to_sink(&spec, &args.render.to_opts(), &mut sink)?;

    eprintln!(
        "wrote {} ({} frames at {} fps)",
        args.out.display(),
        stats.frames_pushed,
        spec.fps()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let catalog = cutout::PartCatalog::character();
    let rig = load_rig(&args.scene)?;
    let images = load_images(&args.scene, &catalog, rig.invalid_image_policy)?;
    let spec = cutout::AnimationSpec::build(&catalog, &images, &rig)?;

    if !args.time.is_finite() || args.time < 0.0 {
        anyhow::bail!("--time must be a finite, non-negative number of seconds");
    }
    let frame = cutout::render_frame_at(&spec, args.time);
    write_frame_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_frame_png(out: &Path, frame: &cutout::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    cutout::write_png(out, frame)?;
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let catalog = cutout::PartCatalog::character();
    let rig = load_rig(&args.scene)?;
    let images = load_images(&args.scene, &catalog, rig.invalid_image_policy)?;
    let spec = cutout::AnimationSpec::build(&catalog, &images, &rig)?;

    let mut sink = cutout::PngSequenceSink::new(&args.out_dir);
    let stats = cutout::render_to_sink(&spec, &args.render.to_opts(), &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_pushed,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    let catalog = cutout::PartCatalog::character();
    for entry in catalog.entries() {
        let kind = if entry.is_base() {
            "base"
        } else if entry.required {
            "required"
        } else {
            "optional"
        };
        println!(
            "{:>2}  {:<12} {:<10} anchor=({:.2}, {:.2})  {}",
            entry.z_order,
            entry.id,
            kind,
            entry.default_anchor.x,
            entry.default_anchor.y,
            entry.label
        );
    }
    Ok(())
}
