//! hovertip CLI
//!
//! Usage:
//!   hovertip demo                          # Run the scripted demo scene
//!   hovertip demo --screen 640x200 --json  # Small screen, JSON transcript
//!   hovertip place widget --target 100,100,50,20 --overlay 80,30
//!   hovertip config show                   # Print the effective config

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hover_tip::config::HoverTipConfig;
use hover_tip::demo::{default_script, DemoScene};
use hover_tip::geometry::{parse_ints, parse_size, Point, Rect, Size};
use hover_tip::tooltip::placement::{self, FlipMode, ScrollOffsets};

#[derive(Parser)]
#[command(name = "hovertip")]
#[command(about = "Hover tooltip placement and lifecycle tools")]
struct Cli {
    /// Config file (defaults to ~/.local/share/hover-tip/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted demo scene against the simulated host
    Demo {
        /// Screen size as WxH
        #[arg(long, default_value = "1280x800", value_parser = size_arg)]
        screen: Size,

        /// Sleep through waits in real time instead of jumping the clock
        #[arg(long)]
        realtime: bool,

        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a single tooltip position
    Place {
        #[command(subcommand)]
        variant: PlaceVariant,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print the version
    Version,
}

#[derive(Subcommand)]
enum PlaceVariant {
    /// Beside a widget
    Widget {
        /// Widget rect as x,y,width,height
        #[arg(long, value_parser = rect_arg)]
        target: Rect,
        /// Overlay size as width,height
        #[arg(long, value_parser = pair_size_arg)]
        overlay: Size,
        #[arg(long, default_value = "1280x800", value_parser = size_arg)]
        screen: Size,
    },

    /// Next to the pointer
    Pointer {
        /// Pointer position as x,y
        #[arg(long, value_parser = point_arg)]
        pointer: Point,
        #[arg(long, value_parser = pair_size_arg)]
        overlay: Size,
        #[arg(long, default_value = "1280x800", value_parser = size_arg)]
        screen: Size,
    },

    /// At the corner of a region on a scrolled surface
    Scroll {
        /// Region bounding box in content coordinates as x0,y0,x1,y1
        #[arg(long, value_parser = corners_arg)]
        region: Rect,
        /// Scroll fractions as fx,fy
        #[arg(long, default_value = "0,0", value_parser = fraction_arg)]
        fraction: Fractions,
        /// Scrollable content size as WxH
        #[arg(long, value_parser = size_arg)]
        extent: Size,
        /// Surface origin on screen as x,y
        #[arg(long, default_value = "0,0", value_parser = point_arg)]
        origin: Point,
        #[arg(long, value_parser = pair_size_arg)]
        overlay: Size,
        #[arg(long, default_value = "1280x800", value_parser = size_arg)]
        screen: Size,
        /// Flip only the overflowing axis
        #[arg(long)]
        per_axis: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as JSON
    Show,
    /// Print the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn size_arg(s: &str) -> Result<Size, String> {
    parse_size(s).ok_or_else(|| format!("expected WxH, got {:?}", s))
}

fn pair_size_arg(s: &str) -> Result<Size, String> {
    parse_ints(s, 2)
        .map(|v| Size::new(v[0], v[1]))
        .ok_or_else(|| format!("expected width,height, got {:?}", s))
}

fn point_arg(s: &str) -> Result<Point, String> {
    parse_ints(s, 2)
        .map(|v| Point::new(v[0], v[1]))
        .ok_or_else(|| format!("expected x,y, got {:?}", s))
}

fn rect_arg(s: &str) -> Result<Rect, String> {
    parse_ints(s, 4)
        .map(|v| Rect::new(v[0], v[1], v[2], v[3]))
        .ok_or_else(|| format!("expected x,y,width,height, got {:?}", s))
}

fn corners_arg(s: &str) -> Result<Rect, String> {
    parse_ints(s, 4)
        .map(|v| Rect::from_corners(v[0], v[1], v[2], v[3]))
        .ok_or_else(|| format!("expected x0,y0,x1,y1, got {:?}", s))
}

#[derive(Debug, Clone, Copy)]
struct Fractions {
    x: f64,
    y: f64,
}

fn fraction_arg(s: &str) -> Result<Fractions, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected fx,fy, got {:?}", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|f| (0.0..=1.0).contains(f))
            .ok_or_else(|| format!("scroll fraction must be in [0, 1], got {:?}", v))
    };
    Ok(Fractions { x: parse(x)?, y: parse(y)? })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => HoverTipConfig::load_from(path),
        None => HoverTipConfig::load(),
    };

    match cli.command {
        Commands::Demo { screen, realtime, json } => run_demo(&config, screen, realtime, json)?,
        Commands::Place { variant } => run_place(&config, variant),
        Commands::Config { action } => run_config(&config, action)?,
        Commands::Version => println!("hovertip {}", hover_tip::version_info()),
    }
    Ok(())
}

fn run_demo(
    config: &HoverTipConfig,
    screen: Size,
    realtime: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut scene = DemoScene::build(screen, config.placement, &config.defaults)?;
    let steps = default_script();

    let transcript = if realtime {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        scene.run(&steps, |d| rt.block_on(tokio::time::sleep(d)))?
    } else {
        scene.run(&steps, |_| {})?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
    } else {
        for entry in &transcript {
            println!("{}", entry);
        }
    }
    Ok(())
}

fn run_place(config: &HoverTipConfig, variant: PlaceVariant) {
    let pos = match variant {
        PlaceVariant::Widget { target, overlay, screen } => {
            placement::place_beside_widget(target, overlay, screen, &config.placement.widget)
        }
        PlaceVariant::Pointer { pointer, overlay, screen } => {
            placement::place_at_pointer(pointer, overlay, screen, &config.placement.pointer)
        }
        PlaceVariant::Scroll { region, fraction, extent, origin, overlay, screen, per_axis } => {
            let mut cfg = config.placement.scroll;
            if per_axis {
                cfg.flip = FlipMode::PerAxis;
            }
            let offsets = ScrollOffsets { fraction_x: fraction.x, fraction_y: fraction.y, extent };
            let view = placement::viewport_rect(region, &offsets);
            println!("viewport origin: ({}, {})", view.x, view.y);
            placement::place_beside_scrolled_region(region, &offsets, origin, overlay, screen, &cfg)
        }
    };
    println!("position: ({}, {})", pos.x, pos.y);
}

fn run_config(config: &HoverTipConfig, action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => println!("{}", serde_json::to_string_pretty(config)?),
        ConfigAction::Path => println!("{}", config.path().display()),
        ConfigAction::Init { force } => {
            if config.path().exists() && !force {
                eprintln!("{} already exists (use --force to overwrite)", config.path().display());
                return Ok(());
            }
            config.save()?;
            println!("Wrote {}", config.path().display());
        }
    }
    Ok(())
}
