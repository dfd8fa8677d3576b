use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The Protonate Developers",
    version,
    about = "Processes a PDB/mmCIF structure through a forcefield's protonation rules: \
             removes all hydrogen atoms, re-adds them according to the forcefield \
             specification, and saves the result in mmCIF format.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Input coordinate file (.cif or .pdb)
    #[arg(value_name = "STRUCTURE")]
    pub structure: PathBuf,

    /// File name for the completed system in mmCIF format.
    /// Defaults to '<input-stem>_H.cif'; a '.cif' suffix is appended if missing.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Force field to build the system with (a built-in set name or a
    /// template-file path).
    #[arg(short, long, value_name = "NAME", default_value = "amber99sbildn.xml")]
    pub forcefield: String,

    /// Platform to run calculations on. Defaults to fastest available.
    #[arg(short, long, value_name = "NAME")]
    pub platform: Option<String>,

    /// Seed number for random number generator(s).
    #[arg(short, long, value_name = "INT", default_value_t = 917)]
    pub seed: u64,

    /// Increase verbosity level (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
