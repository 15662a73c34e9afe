//! tessera-layout - apply one manager message and dump the draw list.
//!
//! Useful for inspecting what a window record lays out to without a
//! renderer: every window type is drawn into a [`DrawList`] and printed as
//! JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tessera::{AtlasResources, DrawList, Frame, Manager, ManagerConfig, Size};
use tracing_subscriber::EnvFilter;

/// Lay out a Tessera window message and print its draw list
#[derive(Parser, Debug)]
#[command(name = "tessera-layout")]
#[command(version)]
struct Args {
    /// Binary manager message to apply
    #[arg(short, long)]
    input: PathBuf,

    /// Screen width in pixels
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Screen height in pixels
    #[arg(long, default_value = "720")]
    height: f32,

    /// Manager configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Register a texture, as NAME=WIDTHxHEIGHT
    #[arg(long = "texture", value_parser = parse_texture)]
    textures: Vec<(String, Size)>,

    /// Animation clock in milliseconds
    #[arg(long, default_value = "0")]
    time: u64,
}

fn parse_texture(arg: &str) -> Result<(String, Size)> {
    let Some((name, dims)) = arg.split_once('=') else {
        bail!("expected NAME=WIDTHxHEIGHT, got {arg:?}");
    };
    let Some((width, height)) = dims.split_once('x') else {
        bail!("expected WIDTHxHEIGHT, got {dims:?}");
    };
    let width: f32 = width.trim().parse().context("invalid texture width")?;
    let height: f32 = height.trim().parse().context("invalid texture height")?;
    Ok((name.to_owned(), Size::new(width, height)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ManagerConfig::from_json(&json).context("parsing config")?
        }
        None => ManagerConfig::default(),
    };

    let mut resources = AtlasResources::new();
    for (name, size) in &args.textures {
        resources.insert_texture(name.clone(), *size);
    }

    let message = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut manager = Manager::new(config);
    manager
        .receive_message(&message)
        .context("applying manager message")?;
    tracing::info!(windows = manager.len(), "message applied");

    let frame = Frame {
        resources: &resources,
        screen: Size::new(args.width, args.height),
        time_ms: args.time,
    };
    let mut list = DrawList::new();
    manager.draw_all(&frame, &mut list);

    println!("{}", serde_json::to_string_pretty(&list)?);

    for event in manager.drain_events() {
        tracing::info!(event = %serde_json::to_string(&event)?, "outbound event");
    }
    Ok(())
}
