/// NeonWire Terminal - pointer-reactive wireframe
///
/// Renders the spinning torus knot with a custom cursor ring. Move the mouse
/// to tilt the knot; hover the buttons to morph the cursor.
/// Controls:
///   - Mouse: tilt / hover
///   - P: pause
///   - Q/ESC: Quit
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use neonwire_core::{SceneConfig, Shape};
use neonwire_terminal::TerminalApp;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShapeArg {
    TorusKnot,
    Cube,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::TorusKnot => Shape::TorusKnot,
            ShapeArg::Cube => Shape::Cube,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "neonwire-terminal", version, about = "Pointer-reactive wireframe in your terminal")]
struct Args {
    /// Scene configuration file (TOML)
    #[arg(short, long, env = "NEONWIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Mesh to animate
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Target frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Write logs to this file (the terminal itself is busy rendering)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let log_level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("neonwire={},warn", log_level)));

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn load_config(args: &Args) -> Result<SceneConfig> {
    let mut config = match &args.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    if let Some(shape) = args.shape {
        config.render.shape = shape.into();
    }
    if let Some(fps) = args.fps {
        config.render.fps = fps;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let config = load_config(&args)?;
    tracing::info!(shape = ?config.render.shape, fps = config.render.fps, "starting");

    let mut app = TerminalApp::new(config).context("Failed to set up terminal")?;
    app.run().context("Terminal renderer failed")?;

    println!("Thanks for watching NeonWire.");
    Ok(())
}
