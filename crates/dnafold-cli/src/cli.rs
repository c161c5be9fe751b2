use clap::{Args, Parser, Subcommand};
use dnafold::engine::config::SelectionStrategy;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "dnafold CLI - Rebuild the 3D trajectory of a DNA sequence and search for rotation tables that close it into a loop.",
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

    /// Set the number of threads used to score candidates in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the trajectory of a sequence under a rotation table.
    Fold(FoldArgs),
    /// Optimize a rotation table over several sequences with simulated annealing.
    Anneal(AnnealArgs),
    /// Optimize a rotation table for one sequence with a genetic algorithm.
    Evolve(EvolveArgs),
    /// Compare the best genetic score across population sizes and selection strategies.
    Survey(SurveyArgs),
    /// Check a rotation table against a reference and recompute its margins.
    Clean(CleanArgs),
}

/// Arguments shared by every command that reads a sequence and a table.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Rotation table in JSON format. Defaults to the bundled table.
    #[arg(short, long, value_name = "PATH")]
    pub table: Option<PathBuf>,
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug)]
pub struct FoldArgs {
    /// FASTA-style sequence file (the first line is a header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub sequence: PathBuf,

    #[command(flatten)]
    pub table: TableArgs,

    /// Write the computed points as CSV to this path.
    #[arg(long, value_name = "PATH")]
    pub points: Option<PathBuf>,
}

/// Arguments for the `anneal` subcommand.
#[derive(Args, Debug)]
pub struct AnnealArgs {
    /// Sequence files scored together. Can be given multiple times.
    #[arg(short, long = "sequence", required = true, value_name = "PATH", num_args(1..))]
    pub sequences: Vec<PathBuf>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the maximum number of iterations.
    #[arg(short = 'i', long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the energy below which the search stops.
    #[arg(short = 'e', long, value_name = "FLOAT")]
    pub energy_threshold: Option<f64>,

    /// Seed for the random number generator.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Prefix of the result file; a free `{prefix}{n}.json` name is chosen.
    #[arg(short, long, value_name = "PREFIX")]
    pub output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S annealing.cooling-factor=0.99
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Genetic parameters that can be overridden on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneticOverrides {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the selection strategy (elitism, roulette or tournament).
    #[arg(long, value_name = "NAME")]
    pub strategy: Option<SelectionStrategy>,

    /// Override the share of the population kept by selection.
    #[arg(long, value_name = "FLOAT")]
    pub selection_rate: Option<f64>,

    /// Override the number of crossover points.
    #[arg(short = 'n', long, value_name = "INT")]
    pub crossover_points: Option<usize>,

    /// Seed for the random number generator.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S genetic.stagnation-limit=20
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `evolve` subcommand.
#[derive(Args, Debug)]
pub struct EvolveArgs {
    /// FASTA-style sequence file (the first line is a header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub sequence: PathBuf,

    #[command(flatten)]
    pub table: TableArgs,

    /// Override the population size.
    #[arg(short, long, value_name = "INT")]
    pub population_size: Option<usize>,

    #[command(flatten)]
    pub genetic: GeneticOverrides,

    /// Prefix of the result file; a free `{prefix}{n}.json` name is chosen.
    #[arg(short, long, value_name = "PREFIX")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `survey` subcommand.
#[derive(Args, Debug)]
pub struct SurveyArgs {
    /// FASTA-style sequence file (the first line is a header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub sequence: PathBuf,

    #[command(flatten)]
    pub table: TableArgs,

    /// Population sizes to compare, comma separated.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub sizes: Vec<usize>,

    /// Selection strategies to compare, comma separated. Defaults to all of them.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub strategies: Vec<SelectionStrategy>,

    #[command(flatten)]
    pub genetic: GeneticOverrides,
}

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Table to check and rewrite.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Reference table declaring the allowed windows. Defaults to the bundled table.
    #[arg(short, long, value_name = "PATH")]
    pub reference: Option<PathBuf>,

    /// Where to write the cleaned table. Defaults to `cleaned_<name>` next to the input.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
