use clap::{Args, Parser, Subcommand, ValueEnum};
use densfit::io::CoordFormat;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "densfit CLI - conversion and inspection of macromolecular coordinate files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a coordinate file between the PDB and mmCIF formats.
    Convert(ConvertArgs),
    /// Print a summary of a coordinate file.
    Info(InfoArgs),
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the input coordinate file (.pdb, .ent or .cif).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path for the output coordinate file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output format; defaults to whatever the output extension implies.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub to: Option<FormatArg>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the coordinate file to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML file with element parameter overrides for the mass-derived
    /// properties.
    #[arg(long, value_name = "PATH")]
    pub elements: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Pdb,
    Mmcif,
}

impl From<FormatArg> for CoordFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Pdb => CoordFormat::Pdb,
            FormatArg::Mmcif => CoordFormat::Mmcif,
        }
    }
}
