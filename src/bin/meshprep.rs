//! Command line pre-processing of saved meshes
//!
//! Reads a mesh saved by the `meshdata` crate, applies any combination of the
//! common pre-processing steps, and writes the result back out.
//!
//! # Usage
//!
//! ```text
//! Usage: meshprep <input> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples, default
//! values, and any important behaviour.
//!
//! ## Options
//!
//! Operations are always applied in the same order, no matter the order they
//! appear on the command line:
//!
//! 1. `--flip`
//! 2. `--limit`
//! 3. `--autolimit`
//! 4. `--resample`
//! 5. `--normalize`
//!
//! ### > How to crop to a region
//!
//! Explicit limits are given as `axis:x1:x2` in the coordinates of that axis.
//! The closest samples to `x1` and `x2` are kept, along with everything in
//! between.
//!
//! ```bash
//! # Keep 0.5 <= x <= 2.5 on axis 0, and -10 <= y <= 10 on axis 1
//! meshprep trace.json --limit 0:0.5:2.5 1:-10:10
//! ```
//!
//! Automatic limits crop to where the marginals are significant, for all axes
//! or just those listed.
//!
//! ```bash
//! # Crop axis 1 to where its marginal is above 5% of the peak
//! meshprep trace.json --autolimit 1 --threshold 0.05
//! ```
//!
//! ### > How to resample
//!
//! Every axis is resampled onto `N` equally spaced points over its current
//! range.
//!
//! ```bash
//! meshprep trace.json --resample 128 --output resampled.bin
//! ```
//!

// crate modules
use meshdata::io;
use meshdata::mesh::{MeshData, DEFAULT_DEGREE, DEFAULT_PADDING, DEFAULT_THRESHOLD};
use meshdata::utils::f;

// external crates
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::*;
use ndarray::Array1;

// nom parser combinators for the axis:x1:x2 limits
use nom::character::complete::{char, u64 as axis_index};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::{preceded, tuple};
use nom::IResult;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    info!("Reading \"{}\"", cli.input);
    let mut mesh = io::read_mesh(&cli.input)
        .with_context(|| f!("Could not read a mesh from \"{}\"", cli.input))?;
    debug!("{mesh}");

    preprocess(&mut mesh, &cli)?;

    info!("Writing to \"{}\"", cli.output);
    io::write_mesh(&mesh, &cli.output)
        .with_context(|| f!("Could not write mesh to \"{}\"", cli.output))?;

    if !cli.quiet {
        println!("{mesh}");
    }

    info!("Processing complete");
    Ok(())
}

/// Pre-process meshes saved by the meshdata crate
///
/// Reads a mesh file (JSON if the extension is .json, binary otherwise),
/// applies the requested operations, and writes the result.
///
/// Operations are always applied in the order flip, limit, autolimit,
/// resample, normalize.
///
/// Examples
/// --------
///
///  Crop axis 0 to 0.5 <= x <= 2.5
///     $ meshprep trace.json --limit 0:0.5:2.5
///
///  Crop every axis automatically and resample
///     $ meshprep trace.json --autolimit --resample 128
///
///  Reverse axis 1 and normalise to a peak of 1
///     $ meshprep trace.json --flip 1 --normalize
///
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: meshprep trace.json --autolimit\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("meshprep <input> [options]")
)]
struct Cli {
    // * Positional
    /// Path to input mesh file
    #[arg(name = "input")]
    input: String,

    /// Output file ('mesh.json' default)
    ///
    /// Written as JSON for a .json extension, otherwise as binary. JSON can
    /// not hold NaN or infinity, so use a binary output for such meshes.
    #[arg(short, long)]
    #[arg(value_name = "path")]
    #[arg(default_value = "mesh.json")]
    output: String,

    /// Reverse the listed axes
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    #[arg(value_parser, num_args = 1.., value_delimiter = ' ')]
    #[arg(value_name = "axis")]
    flip: Vec<usize>,

    /// Crop to explicit ranges, as axis:x1:x2
    ///
    /// The closest samples to x1 and x2 along the axis are kept, along with
    /// everything between them. The order of x1 and x2 does not matter.
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    #[arg(value_parser = parse_limit, num_args = 1.., value_delimiter = ' ')]
    #[arg(value_name = "axis:x1:x2")]
    limit: Vec<(usize, f64, f64)>,

    /// Crop to significant marginals (all axes if none listed)
    ///
    /// Keeps the region where the marginal along each axis is above
    /// --threshold times its peak, padded on either side by --padding times
    /// the width of that region.
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    #[arg(value_parser, num_args = 0.., value_delimiter = ' ')]
    #[arg(value_name = "axis")]
    autolimit: Option<Vec<usize>>,

    /// Fraction of the marginal peak for --autolimit
    #[arg(help_heading("Mesh options"))]
    #[arg(long)]
    #[arg(value_name = "value")]
    #[arg(default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Fractional padding for --autolimit
    #[arg(help_heading("Mesh options"))]
    #[arg(long)]
    #[arg(value_name = "value")]
    #[arg(default_value_t = DEFAULT_PADDING)]
    padding: f64,

    /// Resample every axis onto N equally spaced points
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    #[arg(value_name = "N")]
    resample: Option<usize>,

    /// Interpolation degree for --resample (0 is nearest neighbour)
    #[arg(help_heading("Mesh options"))]
    #[arg(long)]
    #[arg(value_name = "degree")]
    #[arg(default_value_t = DEFAULT_DEGREE)]
    degree: usize,

    /// Scale the data to a maximum of 1
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    normalize: bool,

    // * Flags
    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

/// Sets up logging at runtime to allow for multiple verbosity levels
#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    stderrlog::new()
        .modules(vec![module_path!(), "meshdata"])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}

/// Creates a banner for the command line
#[doc(hidden)]
fn banner() -> String {
    let mut s = f!("{:-<1$}\n", "", 70);
    s += &f!("{:^70}\n", "MeshData :: MeshPrep");
    s += &f!("{:-<1$}", "", 70);
    s
}

#[doc(hidden)]
/// Apply every requested operation in a fixed order
fn preprocess(mesh: &mut MeshData, cli: &Cli) -> Result<()> {
    if !cli.flip.is_empty() {
        info!("Flipping axes {:?}", cli.flip);
        mesh.flip(&cli.flip)?;
    }

    if !cli.limit.is_empty() {
        let (axes, limits): (Vec<usize>, Vec<(f64, f64)>) = cli
            .limit
            .iter()
            .map(|&(axis, x1, x2)| (axis, (x1, x2)))
            .unzip();
        info!("Limiting axes {axes:?}");
        mesh.limit(&limits, Some(axes.as_slice()))?;
    }

    if let Some(axes) = &cli.autolimit {
        info!("Applying automatic limits");
        mesh.autolimit(axes, cli.threshold, cli.padding)?;
    }

    if let Some(n) = cli.resample {
        info!("Resampling onto {n} points per axis");
        let targets = resample_targets(mesh, n)?;
        mesh.interpolate(&targets, cli.degree, false)?;
    }

    if cli.normalize {
        info!("Normalising data");
        mesh.normalize();
    }

    Ok(())
}

#[doc(hidden)]
/// Equally spaced axes spanning the current range of every axis
fn resample_targets(mesh: &MeshData, n: usize) -> Result<Vec<Option<Array1<f64>>>> {
    mesh.axes()
        .iter()
        .enumerate()
        .map(|(j, axis)| {
            let (lo, hi) = axis.range().ok_or_else(|| anyhow!("Axis {j} is empty"))?;
            trace!("  - axis {j}: {n} points from {lo} to {hi}");
            Ok(Some(Array1::linspace(lo, hi, n)))
        })
        .collect()
}

#[doc(hidden)]
/// Value parser for the axis:x1:x2 limit triplets
fn parse_limit(s: &str) -> std::result::Result<(usize, f64, f64), String> {
    let (_, (axis, x1, x2)) =
        all_consuming(limit_triplet)(s).map_err(|_| f!("expected axis:x1:x2, found \"{s}\""))?;
    Ok((axis as usize, x1, x2))
}

#[doc(hidden)]
fn limit_triplet(i: &str) -> IResult<&str, (u64, f64, f64)> {
    tuple((
        axis_index,
        preceded(char(':'), double),
        preceded(char(':'), double),
    ))(i)
}
