use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cell_raster::Viewport;
use termimg::models::{OutputMode, Overrides, PlanReport, QuantizerKind, ViewerConfig};
use termimg::services::terminal::{self, FALLBACK_VIEWPORT};
use termimg::services::{decoder, ScreenCanvas, StreamCanvas, Viewer, ViewerOptions};

#[derive(Parser)]
#[command(name = "termimg")]
#[command(about = "View JPEG and PNG images as coloured cells in a 256-colour terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one or more images, one after another
    Show {
        /// Image files (JPEG or PNG)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output mode
        #[arg(short, long, value_enum)]
        mode: Option<OutputMode>,

        /// Colour quantization strategy
        #[arg(short, long, value_enum)]
        quantizer: Option<QuantizerKind>,

        /// Allow the nearest search to pick system colours 1-15
        #[arg(long)]
        system_colors: bool,

        /// Viewport width in cells (stream mode)
        #[arg(long)]
        columns: Option<u32>,

        /// Viewport height in cells (stream mode)
        #[arg(long)]
        rows: Option<u32>,

        /// Do not wait for a key press between images
        #[arg(long)]
        no_wait: bool,

        /// Draw even if the terminal does not advertise 256 colours
        #[arg(short, long)]
        force: bool,

        /// Config file (YAML); defaults to $TERMIMG_CONFIG
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the render plan for an image without drawing it
    Plan {
        /// Image file
        file: PathBuf,

        /// Viewport width in cells
        #[arg(long)]
        columns: u32,

        /// Viewport height in cells
        #[arg(long)]
        rows: u32,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show {
            files,
            mode,
            quantizer,
            system_colors,
            columns,
            rows,
            no_wait,
            force,
            config,
        }) => {
            let overrides = Overrides {
                quantizer,
                system_colors,
                mode,
                no_wait,
                columns,
                rows,
            };
            run_show_command(&files, &overrides, config, force)
        }
        Some(Commands::Plan {
            file,
            columns,
            rows,
            json,
        }) => {
            run_plan_command(&file, Viewport::new(columns, rows), json)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            run_status_command();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "termimg=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();
}

/// Draw every file with the configured canvas
fn run_show_command(
    files: &[PathBuf],
    overrides: &Overrides,
    config_path: Option<PathBuf>,
    force: bool,
) -> anyhow::Result<ExitCode> {
    init_tracing();

    let config_path =
        config_path.or_else(|| std::env::var("TERMIMG_CONFIG").ok().map(PathBuf::from));
    let mut config = ViewerConfig::load(config_path.as_deref());
    config.apply(overrides);

    if !force {
        terminal::ensure_color_support(crossterm::style::available_color_count())?;
    }

    let viewer = Viewer::new(
        config.quantizer(),
        ViewerOptions {
            wait_for_key: config.wait_for_key && config.mode == OutputMode::Screen,
        },
    );

    let report = match config.mode {
        OutputMode::Screen => {
            let mut canvas =
                ScreenCanvas::enter(io::stdout()).context("Failed to initialize terminal")?;
            viewer.show_all(files, &mut canvas)?
        }
        OutputMode::Stream => {
            let viewport = stream_viewport(&config);
            tracing::debug!(
                columns = viewport.columns,
                rows = viewport.rows,
                "Stream viewport"
            );
            let mut canvas = StreamCanvas::new(io::stdout().lock(), viewport);
            viewer.show_all(files, &mut canvas)?
        }
    };

    // The screen canvas has been dropped, so these land on the normal screen
    for path in &report.empty {
        tracing::warn!(path = %path.display(), "Nothing to draw");
    }
    for (path, e) in &report.failed {
        eprintln!("{}: {e}", path.display());
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Viewport for stream output: config/CLI values first, then the attached
/// terminal, then a fixed fallback
fn stream_viewport(config: &ViewerConfig) -> Viewport {
    let detected = terminal::terminal_viewport().unwrap_or(FALLBACK_VIEWPORT);
    Viewport::new(
        config.columns.unwrap_or(detected.columns),
        config.rows.unwrap_or(detected.rows),
    )
}

/// Decode one file and print how it would be laid out
fn run_plan_command(file: &Path, viewport: Viewport, json: bool) -> anyhow::Result<()> {
    init_tracing();

    let image = decoder::load_file(file)?;
    let report = PlanReport::new(file.display().to_string(), &image, viewport);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }

    Ok(())
}

/// Display version, environment and usage
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("TERMIMG_CONFIG").ok();
    let log_filter = std::env::var("RUST_LOG").ok();

    println!("termimg v{VERSION}");
    println!("View images as coloured cells in a 256-colour terminal\n");

    println!("Environment Variables:");
    println!(
        "  TERMIMG_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG       = {}",
        log_filter.as_deref().unwrap_or("termimg=warn (default)")
    );

    println!("\nTerminal:");
    match terminal::terminal_viewport() {
        Ok(viewport) => println!("  Size:   {}x{}", viewport.columns, viewport.rows),
        Err(_) => println!("  Size:   (no terminal attached)"),
    }
    println!(
        "  Colors: {}",
        crossterm::style::available_color_count()
    );

    println!("\nCommands:");
    println!("  termimg show FILE...   Show images");
    println!("  termimg plan FILE      Print the render plan for an image");
    println!("\nRun 'termimg --help' for more details.");
}
