//! agx - AgX picture formation config generator
//!
//! Derives the AgX working spaces and formation curve and writes an
//! OpenColorIO config.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "agx")]
#[command(author, version, about = "AgX picture formation config generator")]
#[command(long_about = "
Generates an OpenColorIO configuration for the AgX picture formation chain.

Examples:
  agx generate                                 # Write config/config.ocio
  agx generate --settings look.yaml -o look    # Settings from a YAML file
  agx generate --fulcrum_slope 2.0 --primaries_rotate 3 0 -1
  agx working-space                            # Show derived primaries and matrices
  agx curve --steps 9                          # Tabulate the formation curve
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write config.ocio for the formation chain
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Print the working and destination spaces and their matrices
    #[command(name = "working-space", visible_alias = "ws")]
    WorkingSpace(WorkingSpaceArgs),

    /// Print samples of the formation curve
    Curve(CurveArgs),
}

/// Formation parameters. Unset flags fall back to the settings file, then to
/// the defaults.
#[derive(Args, Debug, Default)]
struct FormationArgs {
    /// YAML file with formation settings
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Toe curve rate of change as an exponential power
    #[arg(long = "exponent_toe", alias = "exponent-toe", value_name = "POWER")]
    exponent_toe: Option<f64>,

    /// Shoulder curve rate of change as an exponential power
    #[arg(long = "exponent_shoulder", alias = "exponent-shoulder", value_name = "POWER")]
    exponent_shoulder: Option<f64>,

    /// Central section rate of change as rise over run slope
    #[arg(long = "fulcrum_slope", alias = "fulcrum-slope", value_name = "SLOPE")]
    fulcrum_slope: Option<f64>,

    /// Input fulcrum point relative to the normalized log2 range
    #[arg(long = "fulcrum_input", alias = "fulcrum-input", value_name = "X")]
    fulcrum_input: Option<f64>,

    /// Output fulcrum point relative to the normalized log2 range
    #[arg(long = "fulcrum_output", alias = "fulcrum-output", value_name = "Y")]
    fulcrum_output: Option<f64>,

    /// Lowest value of the log2 range, in stops from middle grey
    #[arg(long = "limit_low", alias = "limit-low", value_name = "EV", allow_negative_numbers = true)]
    limit_low: Option<f64>,

    /// Highest value of the log2 range, in stops from middle grey
    #[arg(long = "limit_high", alias = "limit-high", value_name = "EV", allow_negative_numbers = true)]
    limit_high: Option<f64>,

    /// Inset fraction for each of the RGB primaries
    #[arg(
        long = "primaries_inset",
        alias = "primaries-inset",
        num_args = 3,
        value_names = ["R", "G", "B"],
        allow_negative_numbers = true
    )]
    primaries_inset: Option<Vec<f64>>,

    /// Outset fraction for the return trip; negative values lower the chroma
    /// of the returned primary. Defaults to the inset
    #[arg(
        long = "primaries_outset",
        alias = "primaries-outset",
        num_args = 3,
        value_names = ["R", "G", "B"],
        allow_negative_numbers = true
    )]
    primaries_outset: Option<Vec<f64>>,

    /// Rotation in degrees for each of the RGB primaries, positive counterclockwise
    #[arg(
        long = "primaries_rotate",
        alias = "primaries-rotate",
        num_args = 3,
        value_names = ["R", "G", "B"],
        allow_negative_numbers = true
    )]
    primaries_rotate: Option<Vec<f64>>,

    /// Outset fraction of the achromatic coordinate for tinting
    #[arg(long = "tinting_outset", alias = "tinting-outset", value_name = "FRACTION", allow_negative_numbers = true)]
    tinting_outset: Option<f64>,

    /// Rotation in degrees of the achromatic coordinate for tinting, zero is toward green
    #[arg(long = "tinting_rotate", alias = "tinting-rotate", value_name = "DEGREES", allow_negative_numbers = true)]
    tinting_rotate: Option<f64>,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    formation: FormationArgs,

    /// Output directory
    #[arg(short, long, default_value = "config")]
    output: PathBuf,

    /// Config file name
    #[arg(long, default_value = agx_ocio::formation::CONFIG_FILE)]
    name: String,

    /// Print the config to stdout instead of writing it
    #[arg(long)]
    stdout: bool,
}

#[derive(Args)]
struct WorkingSpaceArgs {
    #[command(flatten)]
    formation: FormationArgs,
}

#[derive(Args)]
struct CurveArgs {
    #[command(flatten)]
    formation: FormationArgs,

    /// Number of evenly spaced rows to print
    #[arg(short, long, default_value = "17")]
    steps: usize,

    /// Print every LUT sample instead of `steps` rows
    #[arg(long, conflicts_with = "steps")]
    all: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, cli.verbose),
        Commands::WorkingSpace(args) => commands::working_space::run(args, cli.verbose),
        Commands::Curve(args) => commands::curve::run(args, cli.verbose),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_underscore_flag_names() {
        let cli = Cli::try_parse_from([
            "agx",
            "-vv",
            "generate",
            "--fulcrum_slope",
            "2.0",
            "--limit_low",
            "-12",
            "--primaries_rotate",
            "3",
            "-0.5",
            "-1",
            "-o",
            "out",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.formation.fulcrum_slope, Some(2.0));
        assert_eq!(args.formation.limit_low, Some(-12.0));
        assert_eq!(args.formation.primaries_rotate, Some(vec![3.0, -0.5, -1.0]));
        assert_eq!(args.output, PathBuf::from("out"));
        assert_eq!(args.name, "config.ocio");
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["agx", "generate"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.output, PathBuf::from("config"));
        assert_eq!(args.name, "config.ocio");
        assert!(!args.stdout);
    }

    #[test]
    fn test_kebab_aliases() {
        let cli = Cli::try_parse_from(["agx", "curve", "--exponent-toe", "2", "--all"]).unwrap();
        let Commands::Curve(args) = cli.command else {
            panic!("expected curve");
        };
        assert_eq!(args.formation.exponent_toe, Some(2.0));
        assert!(args.all);
    }

    #[test]
    fn test_triplets_need_three_values() {
        let result = Cli::try_parse_from(["agx", "ws", "--primaries_inset", "0.1", "0.2"]);
        assert!(result.is_err());
    }
}
