use std::{
    fs::File,
    io::{BufReader, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use balloon_avatar::{
    Animation, AvatarConfig, AvatarOwner, ColorContext, MotionProfile, RenderOptions, SizeClass,
    Theme, legacy, render_config, render_gallery,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "balloon-avatar", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a stored avatar configuration.
    Render(RenderArgs),
    /// Print the motion profile for an animation tag as JSON.
    Motion(MotionArgs),
    /// Render every gallery preset as SVG files.
    Gallery(GalleryArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Configuration JSON. Reads stdin when omitted; malformed input renders the default avatar.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Render options JSON. Flags below override its values.
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long, value_enum)]
    theme: Option<Theme>,

    #[arg(long, value_enum)]
    size: Option<SizeClass>,

    /// Disable theme-aware color muting.
    #[arg(long)]
    no_theme: bool,

    /// Owner display name, used for the initials decoration.
    #[arg(long)]
    username: Option<String>,

    /// Owner title, scanned for the veteran marker.
    #[arg(long)]
    title: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Output path. Text formats go to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Svg,
    DataUri,
    Png,
}

#[derive(Parser, Debug)]
struct MotionArgs {
    /// Animation tag; unknown tags resolve to idle.
    animation: String,

    /// Also print the sampled transform at this many seconds.
    #[arg(long)]
    at: Option<f64>,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    theme: Theme,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Motion(args) => cmd_motion(args),
        Command::Gallery(args) => cmd_gallery(args),
    }
}

fn read_options(path: Option<&Path>) -> anyhow::Result<RenderOptions> {
    let Some(path) = path else {
        return Ok(RenderOptions::default());
    };
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    let options = serde_json::from_reader(BufReader::new(f)).with_context(|| "parse options JSON")?;
    Ok(options)
}

fn read_config(path: Option<&Path>) -> anyhow::Result<AvatarConfig> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read configuration '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_context(|| "read configuration from stdin")?;
            buf
        }
    };
    Ok(AvatarConfig::load_or_default(Some(&json)))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = read_config(args.in_path.as_deref())?;

    let mut options = read_options(args.options.as_deref())?;
    if let Some(theme) = args.theme {
        options.theme = theme;
    }
    if let Some(size) = args.size {
        options.size = size;
    }
    if args.no_theme {
        options.theme_aware = false;
    }

    let owner = args
        .username
        .map(|username| AvatarOwner::new(username, args.title));
    let frame = render_config(&config, owner.as_ref(), &options);

    match args.format {
        OutputFormat::Svg => write_text(args.out.as_deref(), &frame.to_svg()),
        OutputFormat::DataUri => write_text(args.out.as_deref(), &legacy::to_data_uri(&frame)),
        OutputFormat::Png => {
            let out = args.out.context("--out is required for png output")?;
            let png = frame.to_png()?;
            std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
            Ok(())
        }
    }
}

fn cmd_motion(args: MotionArgs) -> anyhow::Result<()> {
    let profile = MotionProfile::for_animation(&Animation::from(args.animation));
    println!("{}", serde_json::to_string_pretty(&profile)?);

    if let Some(at) = args.at {
        println!("{}", profile.sample(at).to_svg_transform());
    }
    Ok(())
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let ctx = ColorContext::new(args.theme, true);
    for (index, (label, frame)) in render_gallery(&ctx).into_iter().enumerate() {
        let path = args
            .out
            .join(format!("{index:02}-{}.svg", label.to_lowercase()));
        std::fs::write(&path, frame.to_svg())
            .with_context(|| format!("write svg '{}'", path.display()))?;
    }

    eprintln!("wrote gallery to {}", args.out.display());
    Ok(())
}

fn write_text(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
