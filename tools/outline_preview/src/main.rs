mod replay;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "outline_preview",
    about = "Extract drawable outlines from transparent PNGs and replay recorded traces"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract and sample the outline of a transparent PNG.
    Extract {
        /// Input PNG with a transparent background.
        image: PathBuf,
        /// Target rectangle as "x,y,width,height".
        #[arg(long, default_value = "0,0,400,400")]
        rect: String,
        /// Number of uniform arc-length samples.
        #[arg(long, default_value_t = 400)]
        samples: usize,
        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a stroke script against an image's outline and report
    /// coverage, milestones and the star rating.
    Replay {
        /// Input PNG with a transparent background.
        image: PathBuf,
        /// Stroke script: JSON `{"strokes": [{"points": [[x,y], ...]}, ...]}`.
        script: PathBuf,
        /// Target rectangle as "x,y,width,height".
        #[arg(long, default_value = "0,0,400,400")]
        rect: String,
        /// Write the JSON report here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Extract {
            image,
            rect,
            samples,
            out,
        } => replay::run_extract(&image, &rect, samples, out.as_deref()),
        Command::Replay {
            image,
            script,
            rect,
            out,
        } => replay::run_replay(&image, &script, &rect, out.as_deref()),
    }
}
