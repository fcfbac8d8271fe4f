//! Command-line interface for the scan viewer.

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::RenderConfig;
use crate::core::cloud::Cloud;
use crate::core::loaders::load_cloud;
use crate::core::writers::ExportSession;
use crate::render::{render_frame, Canvas, PlotStyle};

#[derive(Parser)]
#[command(name = "scanview")]
#[command(about = "Lidar range-scan statistics and visualization", version)]
pub struct Cli {
    /// Path to YAML render config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a recorded scan into a PNG frame
    Render {
        /// Scan file with `angle distance` lines
        scan: PathBuf,
        /// Output directory for exported frames
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
        /// Plot style
        #[arg(long, value_enum, default_value_t = StyleArg::Connected)]
        style: StyleArg,
        /// Display scale in px/mm (1mm -> 1px at 1.0); 0 auto-fits
        #[arg(short, long, default_value_t = 0.0)]
        scale: f32,
        /// Rotate the cloud by this many degrees before rendering
        #[arg(long, default_value_t = 0.0)]
        rotate: f32,
        /// Draw the background grid
        #[arg(long)]
        grid: bool,
        /// Drop invalid (zero-distance) readings at load time
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Load a scan and print its statistics
    Stats {
        /// Scan file with `angle distance` lines
        scan: PathBuf,
        /// Drop invalid (zero-distance) readings at load time
        #[arg(long)]
        skip_invalid: bool,
    },

    /// Re-export a scan as normalized plaintext
    Convert {
        /// Scan file with `angle distance` lines
        scan: PathBuf,
        /// Output directory for exported files
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
        /// Drop invalid (zero-distance) readings at load time
        #[arg(long)]
        skip_invalid: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Connected,
    Bars,
    Markers,
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 39 {
            format!("{}...", &value[..36])
        } else {
            value.clone()
        };
        println!("║ {:<20}: {:<39} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match RenderConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                RenderConfig::default()
            }
        },
        None => RenderConfig::default(),
    };

    match cli.command {
        Commands::Render {
            scan,
            output_dir,
            style,
            scale,
            rotate,
            grid,
            skip_invalid,
        } => {
            cmd_render(
                &scan,
                &output_dir,
                style,
                scale,
                rotate,
                grid,
                skip_invalid,
                &config,
            );
        }
        Commands::Stats { scan, skip_invalid } => {
            cmd_stats(&scan, skip_invalid);
        }
        Commands::Convert {
            scan,
            output_dir,
            skip_invalid,
        } => {
            cmd_convert(&scan, &output_dir, skip_invalid);
        }
    }
}

fn load_or_exit(scan: &Path, skip_invalid: bool, spinner: &ProgressBar) -> Cloud {
    match load_cloud(scan, skip_invalid) {
        Ok(cloud) => cloud,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to load scan: {}", e);
            std::process::exit(1);
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "scan".to_string())
}

#[allow(clippy::too_many_arguments)]
fn cmd_render(
    scan: &Path,
    output_dir: &Path,
    style: StyleArg,
    scale: f32,
    rotate: f32,
    grid: bool,
    skip_invalid: bool,
    config: &RenderConfig,
) {
    let start = Instant::now();
    let spinner = create_spinner("Loading scan...");

    let mut cloud = load_or_exit(scan, skip_invalid, &spinner);
    if rotate != 0.0 {
        cloud.rotate(rotate);
    }

    spinner.set_message("Rendering frame...");

    let plot_style = match style {
        StyleArg::Connected => PlotStyle::Connected {
            scale,
            y_offset: 0,
            lightness: 1.0,
        },
        StyleArg::Bars => PlotStyle::Bars {
            max_bar_width: config.canvas.max_bar_width,
        },
        StyleArg::Markers => PlotStyle::Markers {
            scale,
            lightness: 1.0,
        },
    };

    let mut canvas = Canvas::from_config(&config.canvas);
    if let Err(e) = render_frame(&mut canvas, &cloud, plot_style, config, grid) {
        spinner.finish_and_clear();
        error!("Rendering failed: {}", e);
        std::process::exit(1);
    }

    spinner.set_message("Exporting frame...");

    let result = ExportSession::open(output_dir)
        .and_then(|mut session| session.save_png(&canvas, &file_stem(scan)));

    spinner.finish_and_clear();

    match result {
        Ok(path) => {
            print_summary(
                "Render Complete",
                &[
                    ("Input file", scan.display().to_string()),
                    ("Output PNG", path.display().to_string()),
                    ("Points", cloud.count().to_string()),
                    ("Max distance", format!("{:.1} mm", cloud.max_distance())),
                    ("Style", format!("{:?}", style)),
                    ("Grid", grid.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            error!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn cmd_stats(scan: &Path, skip_invalid: bool) {
    let start = Instant::now();
    let spinner = create_spinner("Loading scan...");

    let cloud = load_or_exit(scan, skip_invalid, &spinner);

    spinner.finish_and_clear();

    let min_display = if cloud.min_distance() == f32::MAX {
        "n/a (no valid returns)".to_string()
    } else {
        format!("{:.1} mm", cloud.min_distance())
    };

    print_summary(
        "Scan Statistics",
        &[
            ("Input file", scan.display().to_string()),
            ("Points", cloud.count().to_string()),
            ("Skip invalid", skip_invalid.to_string()),
            ("Max distance", format!("{:.1} mm", cloud.max_distance())),
            ("Min distance", min_display),
            ("Mean distance", format!("{:.1} mm", cloud.mean_distance())),
            ("Spread", format!("{:.1}", cloud.std_distance())),
            ("Duration", format!("{:.2?}", start.elapsed())),
        ],
    );
}

fn cmd_convert(scan: &Path, output_dir: &Path, skip_invalid: bool) {
    let start = Instant::now();
    let spinner = create_spinner("Loading scan...");

    let cloud = load_or_exit(scan, skip_invalid, &spinner);

    spinner.set_message("Writing normalized scan...");

    let result = ExportSession::open(output_dir)
        .and_then(|mut session| session.save_txt(&cloud, &file_stem(scan)));

    spinner.finish_and_clear();

    match result {
        Ok(path) => {
            print_summary(
                "Convert Complete",
                &[
                    ("Input file", scan.display().to_string()),
                    ("Output file", path.display().to_string()),
                    ("Points", cloud.count().to_string()),
                    ("Skip invalid", skip_invalid.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            error!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}
