//! Folio CLI
//!
//! Validate portfolio content and run the motion components headlessly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::{ContactForm, ContactMessage, ContactSink, DiscardSink, FormStatus, Point, Rect};

mod config;
mod outbox;
mod project;
mod simulate;

use config::{FolioConfig, SinkKind};
use outbox::OutboxSink;
use simulate::FrameClock;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Portfolio motion toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project directory or folio.toml path
    #[arg(short = 'C', long, default_value = ".", global = true)]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write folio.toml and sample content
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration and content
    Check,

    /// Print the effective configuration
    Config,

    /// Simulate the orbital skills layout
    Orbit {
        /// Click this skill before running
        #[arg(long)]
        select: Option<u32>,

        #[arg(long, default_value_t = 60)]
        frames: usize,

        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },

    /// Simulate the tilt card hovering at a pointer position
    Tilt {
        #[arg(long)]
        x: f32,

        #[arg(long)]
        y: f32,

        #[arg(long, default_value_t = 300.0)]
        width: f32,

        #[arg(long, default_value_t = 400.0)]
        height: f32,

        #[arg(long, default_value_t = 120)]
        frames: usize,

        #[arg(long, default_value_t = 60.0)]
        fps: f32,
    },

    /// Simulate the pointer trail chasing a point
    Trail {
        #[arg(long)]
        x: f32,

        #[arg(long)]
        y: f32,

        #[arg(long, default_value_t = 45)]
        frames: usize,

        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Sample every N frames
        #[arg(long, default_value_t = 5)]
        every: usize,
    },

    /// Sweep the scroll position past the experience timeline
    Progress {
        /// Document offset of the timeline section
        #[arg(long, default_value_t = 900.0)]
        section_top: f32,

        /// Measured height of the entry list
        #[arg(long, default_value_t = 1200.0)]
        content_height: f32,

        #[arg(long, default_value_t = 1280.0)]
        viewport_width: f32,

        #[arg(long, default_value_t = 900.0)]
        viewport_height: f32,

        /// Scroll distance between samples
        #[arg(long, default_value_t = 100.0)]
        step: f32,
    },

    /// Simulate the project carousel
    Carousel {
        #[arg(long, default_value_t = 120)]
        frames: usize,

        #[arg(long, default_value_t = 60.0)]
        fps: f32,

        /// Hover the carousel at this frame
        #[arg(long)]
        hover_at: Option<usize>,

        /// Sample every N frames
        #[arg(long, default_value_t = 10)]
        every: usize,
    },

    /// Submit a contact message through the configured sink
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "folio_cli={level},folio_motion={level},\
                     folio_animation={level},folio_core={level},warn"
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { force } => cmd_init(&cli.dir, force),
        Commands::Check => cmd_check(&cli.dir),
        Commands::Config => cmd_config(&cli.dir),
        Commands::Orbit { select, frames, fps } => {
            let (config, dir) = load(&cli.dir)?;
            let portfolio = config.load_content(&dir)?;
            let report = simulate::orbit(
                &config.orbit,
                portfolio.skills,
                select,
                FrameClock::new(frames, fps),
            );
            print_json(&report)
        }
        Commands::Tilt {
            x,
            y,
            width,
            height,
            frames,
            fps,
        } => {
            let (config, _) = load(&cli.dir)?;
            let report = simulate::tilt(
                &config.tilt,
                Rect::new(0.0, 0.0, width, height),
                Point::new(x, y),
                FrameClock::new(frames, fps),
            );
            print_json(&report)
        }
        Commands::Trail {
            x,
            y,
            frames,
            fps,
            every,
        } => {
            let (config, _) = load(&cli.dir)?;
            let samples = simulate::trail(
                &config.trail,
                Point::new(x, y),
                FrameClock::new(frames, fps),
                every,
            );
            print_json(&samples)
        }
        Commands::Progress {
            section_top,
            content_height,
            viewport_width,
            viewport_height,
            step,
        } => {
            let (config, dir) = load(&cli.dir)?;
            let portfolio = config.load_content(&dir)?;
            let samples = simulate::progress(
                &config.timeline,
                portfolio.experience,
                section_top,
                content_height,
                Rect::new(0.0, 0.0, viewport_width, viewport_height),
                step,
            );
            print_json(&samples)
        }
        Commands::Carousel {
            frames,
            fps,
            hover_at,
            every,
        } => {
            let (config, dir) = load(&cli.dir)?;
            let portfolio = config.load_content(&dir)?;
            let frames = simulate::carousel(
                &config.carousel,
                portfolio.projects,
                FrameClock::new(frames, fps),
                hover_at,
                every,
            );
            print_json(&frames)
        }
        Commands::Contact {
            name,
            email,
            message,
        } => cmd_contact(&cli.dir, ContactMessage::new(name, email, message)),
    }
}

/// Load folio.toml and resolve the directory content paths are relative to
fn load(path: &Path) -> Result<(FolioConfig, PathBuf)> {
    let config = FolioConfig::load_from_dir(path)?;
    let dir = if path.is_file() {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        path.to_path_buf()
    };
    Ok((config, dir))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    project::create_project(path, force)?;
    info!("Created folio project in {}", path.display());
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let (config, dir) = load(path)?;
    let portfolio = config.load_content(&dir)?;

    let unresolved = portfolio.unresolved_related();
    for (from, to) in &unresolved {
        warn!("skill {from} lists unknown related skill {to}");
    }

    info!(
        "{} skills, {} timeline entries, {} projects",
        portfolio.skills.len(),
        portfolio.experience.entries.len(),
        portfolio.projects.items.len()
    );
    if unresolved.is_empty() {
        info!("Content OK");
    } else {
        info!("Content OK with {} unresolved related id(s)", unresolved.len());
    }
    Ok(())
}

fn cmd_config(path: &Path) -> Result<()> {
    let (config, _) = load(path)?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_contact(path: &Path, message: ContactMessage) -> Result<()> {
    let (config, dir) = load(path)?;

    let sink: Box<dyn ContactSink> = match (config.contact.sink, &config.contact.outbox_path) {
        (SinkKind::Outbox, Some(outbox)) => {
            let outbox = OutboxSink::new(dir.join(outbox));
            tracing::debug!(path = %outbox.path().display(), "using outbox sink");
            Box::new(outbox)
        }
        (SinkKind::Outbox, None) => {
            anyhow::bail!("[contact] sink = \"outbox\" needs an outbox_path")
        }
        (SinkKind::Discard, _) => Box::new(DiscardSink),
    };

    let mut form = ContactForm::new();
    let result = form.submit(&message, sink.as_ref());
    match form.status() {
        FormStatus::Sent(delivery) => info!("Message accepted: {delivery:?}"),
        FormStatus::Rejected(reason) => warn!("Message rejected: {reason}"),
        FormStatus::Idle => {}
    }
    result.context("Contact submission failed")?;
    Ok(())
}
