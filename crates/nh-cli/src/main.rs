//! ndhist CLI

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use nh_container::hist::{is_histogram, read_histogram};
use nh_container::{ContainerFile, Group, Node};
use nh_core::Histogram;
use nh_render::plots::heatmap::Options2d;
use nh_render::plots::line1d::{Options1d, Series};
use nh_render::RgbLegend;

#[derive(Parser)]
#[command(name = "ndhist")]
#[command(about = "ndhist - merge and plot N-dimensional histogram containers")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge input containers by summing matching histograms
    Hadd {
        /// Output container path
        #[arg(short, long)]
        output: PathBuf,

        /// Input containers, merged in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Print one progress line per input file
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the contents of a container
    Ls {
        /// Input container
        input: PathBuf,
    },

    /// Draw a histogram (1D line plot or 2D heatmap, by dimensionality)
    Draw {
        /// Input container
        input: PathBuf,

        /// Slash-separated path of the histogram inside the container
        #[arg(short, long)]
        path: String,

        /// Output SVG path (parent directories are created)
        #[arg(short, long)]
        output: PathBuf,

        /// Logarithmic y axis (1D) or color normalization (2D)
        #[arg(long)]
        log: bool,

        /// Y-axis label for 1D plots
        #[arg(long, default_value = "entries")]
        ylabel: String,
    },

    /// Compose three 2D histograms into one RGB image
    DrawRgb {
        /// Input container
        input: PathBuf,

        /// Histogram path for the red channel
        #[arg(long)]
        red: String,

        /// Histogram path for the green channel
        #[arg(long)]
        green: String,

        /// Histogram path for the blue channel
        #[arg(long)]
        blue: String,

        /// Output SVG path (parent directories are created)
        #[arg(short, long)]
        output: PathBuf,

        /// Legend labels for the three channels
        #[arg(long, value_delimiter = ',', default_value = "red,green,blue")]
        labels: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Hadd { output, inputs, verbose } => {
            nh_container::hadd(&output, &inputs, verbose)
                .with_context(|| format!("merging into {}", output.display()))
        }
        Commands::Ls { input } => cmd_ls(&input),
        Commands::Draw { input, path, output, log, ylabel } => {
            cmd_draw(&input, &path, &output, log, &ylabel)
        }
        Commands::DrawRgb { input, red, green, blue, output, labels } => {
            cmd_draw_rgb(&input, &red, &green, &blue, &output, &labels)
        }
    }
}

fn cmd_ls(input: &Path) -> Result<()> {
    let file = ContainerFile::open(input)
        .with_context(|| format!("opening {}", input.display()))?;
    print_group(file.root(), 0);
    Ok(())
}

fn print_group(group: &Group, depth: usize) {
    for (name, node) in group.entries() {
        let indent = "  ".repeat(depth);
        match node {
            Node::Group(sub) => {
                println!("{indent}{name}/");
                print_group(sub, depth + 1);
            }
            Node::Dataset(ds) if is_histogram(ds) => match read_histogram(name, ds) {
                Ok(hist) => println!("{indent}{name}  ({}-dim hist)", hist.ndim()),
                Err(err) => println!("{indent}{name}  (unreadable: {err})"),
            },
            Node::Dataset(_) => println!("{indent}{name}  (dataset)"),
        }
    }
}

fn load_histogram(file: &ContainerFile, path: &str) -> Result<Histogram> {
    match file.root().lookup(path) {
        Some(Node::Dataset(ds)) => Ok(read_histogram(path, ds)?),
        Some(Node::Group(_)) => bail!("`{path}` is a group, not a histogram"),
        None => bail!("no entry at `{path}`"),
    }
}

fn cmd_draw(input: &Path, path: &str, output: &Path, log: bool, ylabel: &str) -> Result<()> {
    let file = ContainerFile::open(input)
        .with_context(|| format!("opening {}", input.display()))?;
    let hist = load_histogram(&file, path)?;

    match hist.ndim() {
        1 => {
            let series = [Series::new(&hist)];
            let opts = Options1d { ylabel: ylabel.to_string(), log };
            nh_render::draw_1d(&series, &opts, output)?;
        }
        2 => {
            nh_render::draw_2d(&hist, &Options2d { log }, output)?;
        }
        n => bail!("no drawing path for {n}-dim histograms"),
    }
    tracing::info!(file = %output.display(), "wrote figure");
    Ok(())
}

fn cmd_draw_rgb(
    input: &Path,
    red: &str,
    green: &str,
    blue: &str,
    output: &Path,
    labels: &[String],
) -> Result<()> {
    if labels.len() != 3 {
        bail!("--labels needs exactly three comma-separated values");
    }
    let file = ContainerFile::open(input)
        .with_context(|| format!("opening {}", input.display()))?;
    let legend = RgbLegend {
        red: labels[0].clone(),
        green: labels[1].clone(),
        blue: labels[2].clone(),
    };
    let (r, g, b) = (
        load_histogram(&file, red)?,
        load_histogram(&file, green)?,
        load_histogram(&file, blue)?,
    );
    nh_render::draw_rgb(&r, &g, &b, &legend, output)?;
    tracing::info!(file = %output.display(), "wrote figure");
    Ok(())
}
