// ABOUTME: Main application entry point.
// ABOUTME: Builds a flex layout from config, sizes it to the terminal, and prints a frame.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use fp_core::{Config, Direction, PaneConfig};
use fp_layout::{boxed, Background, Event, FlexLayout, Pane, TextPane};

/// Follow-up events processed per dispatch before giving up on a chatty pane
const MAX_FOLLOW_UPS: usize = 64;

#[derive(Parser, Debug)]
#[command(name = "flexpane")]
#[command(about = "Render one frame of a flex pane layout", long_about = None)]
struct Args {
    /// Frame size as WIDTHxHEIGHT (defaults to the terminal size)
    #[arg(value_parser = parse_size)]
    size: Option<FrameSize>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lay panes out side by side
    #[arg(long, conflicts_with = "vertical")]
    horizontal: bool,

    /// Stack panes top to bottom
    #[arg(long)]
    vertical: bool,

    /// Write the default config to the config directory and exit
    #[arg(long)]
    write_default: bool,
}

impl Args {
    fn direction(&self) -> Option<Direction> {
        match (self.horizontal, self.vertical) {
            (true, _) => Some(Direction::Horizontal),
            (_, true) => Some(Direction::Vertical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameSize {
    width: u16,
    height: u16,
}

/// Parse `WIDTHxHEIGHT`, e.g. `120x40`
fn parse_size(s: &str) -> Result<FrameSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let width = w.trim().parse().map_err(|e| format!("bad width {:?}: {}", w, e))?;
    let height = h.trim().parse().map_err(|e| format!("bad height {:?}: {}", h, e))?;
    Ok(FrameSize { width, height })
}

/// Terminal size, falling back to the configured frame size
fn terminal_size(config: &Config) -> (u16, u16) {
    resolve_size(crossterm::terminal::size(), config)
}

fn resolve_size(queried: std::io::Result<(u16, u16)>, config: &Config) -> (u16, u16) {
    match queried {
        Ok((width, height)) if width > 0 && height > 0 => (width, height),
        Ok((width, height)) => {
            tracing::debug!(
                "Terminal reported {}x{}, using configured {}x{}",
                width,
                height,
                config.width,
                config.height
            );
            (config.width, config.height)
        }
        Err(e) => {
            tracing::debug!("Could not query terminal size: {}", e);
            (config.width, config.height)
        }
    }
}

fn pane_from_config(pane: &PaneConfig) -> Pane {
    boxed(
        TextPane::new(pane.text.clone())
            .with_alignment(pane.align)
            .with_max_width(pane.max_width),
    )
}

fn build_layout(config: &Config) -> FlexLayout {
    FlexLayout::new()
        .with_direction(config.direction)
        .with_remainder(config.remainder)
        .with_background(Background::new(config.fill, config.background))
        .with_panes(config.panes.iter().map(pane_from_config))
        .with_pane_sizes(config.pane_sizes())
}

/// Deliver `event` and every follow-up it produces, in order
fn dispatch(layout: &mut FlexLayout, event: Event) {
    let mut queue = VecDeque::from([event]);
    let mut handled = 0;
    while let Some(event) = queue.pop_front() {
        if handled == MAX_FOLLOW_UPS {
            tracing::warn!(
                "Dropping {} follow-up events after {}",
                queue.len() + 1,
                MAX_FOLLOW_UPS
            );
            return;
        }
        handled += 1;
        tracing::debug!("Dispatching {:?}", event);
        queue.extend(layout.update(&event).run());
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(Config::default_path().map_or_else(Config::default, |p| config_or_default(&p))),
    }
}

/// Config at `path`, or the defaults when it is missing or unusable
fn config_or_default(path: &Path) -> Config {
    match Config::load_if_exists(path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Config::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(direction) = args.direction() {
        config.direction = direction;
    }

    if args.write_default {
        let path = Config::default_path().context("Could not determine config directory")?;
        Config::default().save(&path)?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    tracing::info!(
        "Loaded config: {} panes, {:?}",
        config.panes.len(),
        config.direction
    );

    let (width, height) = match args.size {
        Some(size) => (size.width, size.height),
        None => terminal_size(&config),
    };
    let mut layout = build_layout(&config);

    for event in layout.init().run() {
        dispatch(&mut layout, event);
    }
    dispatch(&mut layout, Event::Resize { width, height });

    println!("{}", layout.view());
    Ok(())
}
