//! Light-fixture part generator.
//!
//! # Commands
//!
//! - `fixture-cli render <design.json>` - Generate every part of a design record
//! - `fixture-cli bulb` - Lathe a bulb shell and its screw base
//! - `fixture-cli reflector` - Build a parabolic LED reflector
//!
//! Each part is written to `--out` as `<part>.stl`. Log verbosity follows
//! `RUST_LOG` (default `info`).

mod lamp;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use mesh_io::StlEncoding;
use tracing_subscriber::EnvFilter;

/// Printable light-fixture parts
#[derive(Parser)]
#[command(name = "fixture-cli")]
#[command(about = "Generate printable light-fixture parts as STL", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where and how parts are written.
#[derive(Args, Debug, Clone)]
struct Output {
    /// Directory for the STL files
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    ascii: bool,
}

impl Output {
    const fn encoding(&self) -> StlEncoding {
        if self.ascii {
            StlEncoding::Ascii
        } else {
            StlEncoding::Binary
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the parts of a JSON design record
    Render {
        /// Design record (JSON with a "design" tag)
        #[arg(name = "DESIGN")]
        design: PathBuf,

        /// Directory of <font_id>.json outline files
        #[arg(long, default_value = "fonts")]
        fonts: PathBuf,

        /// Font used when the requested one is unavailable
        #[arg(long)]
        fallback_font: Option<String>,

        /// Give up on a font load after this many milliseconds
        #[arg(long)]
        font_timeout_ms: Option<u64>,

        #[command(flatten)]
        output: Output,
    },

    /// Lathe a bulb shell with a threaded base
    Bulb {
        /// Silhouette: tube, globe, flame, vintage, pear or dome
        #[arg(long, default_value = "globe")]
        shape: String,

        /// Shell height in mm
        #[arg(long, default_value_t = 110.0)]
        height: f64,

        /// Widest diameter in mm
        #[arg(long, default_value_t = 60.0)]
        diameter: f64,

        /// Shell wall in mm
        #[arg(long, default_value_t = 1.6)]
        wall: f64,

        /// Socket: e26, e27, e12 or none
        #[arg(long, default_value = "e26")]
        base: String,

        #[command(flatten)]
        output: Output,
    },

    /// Build a parabolic reflector for a round LED
    Reflector {
        /// Radius of the LED seat in mm
        #[arg(long, default_value_t = 10.25)]
        seat_radius: f64,

        /// Depth in mm
        #[arg(long, default_value_t = 15.0)]
        depth: f64,

        /// Full beam angle in degrees
        #[arg(long, default_value_t = 60.0)]
        beam_angle: f64,

        /// Wall in mm
        #[arg(long, default_value_t = 1.2)]
        wall: f64,

        #[command(flatten)]
        output: Output,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let written = match cli.command {
        Commands::Render {
            design,
            fonts,
            fallback_font,
            font_timeout_ms,
            output,
        } => {
            let fonts = render::FontOptions {
                dir: fonts,
                fallback: fallback_font,
                timeout_ms: font_timeout_ms,
            };
            render::run(&design, &fonts, &output.out, output.encoding())?
        }
        Commands::Bulb {
            shape,
            height,
            diameter,
            wall,
            base,
            output,
        } => {
            let parts = lamp::bulb(&shape, height, diameter, wall, &base)?;
            lamp::save(&parts, &output.out, output.encoding())?
        }
        Commands::Reflector {
            seat_radius,
            depth,
            beam_angle,
            wall,
            output,
        } => {
            let parts = lamp::reflector(seat_radius, depth, beam_angle, wall)?;
            lamp::save(&parts, &output.out, output.encoding())?
        }
    };

    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
