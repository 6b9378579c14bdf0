use std::path::{Path, PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use crate::comparison_options::{ComparisonOptions, DEFAULT_COMPRESSION, DEFAULT_MARKER_C, DEFAULT_MIN_AF, DEFAULT_SCREEN, DEFAULT_THREADS};
use crate::process_runner::DEFAULT_SKANI_EXECUTABLE;
use crate::skani_preset::SkaniPreset;

#[derive(Parser)]
#[command(arg_required_else_help(true), version = option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0"), about = "SkaniTriangle: all-vs-all ANI distance matrix of genomes using skani", long_about = None)]
pub struct Cli {

    /// Verbose run, print timestamped progress to stderr
    #[arg(short = 'v', long = "verbose", value_name = "verbose", default_value_t = false)]
    print_statistics: bool,

    /// skani executable to run
    #[arg(long = "skani", value_name = "skani", default_value = DEFAULT_SKANI_EXECUTABLE)]
    skani: String,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare all genomes (*.fasta, searched recursively) against each other using skani triangle
    Triangle {
        /// Folder with the genomes to compare
        #[arg(short = 'i', long = "input", value_name = "input", required = true)]
        input: PathBuf,

        /// Where to write the distance matrix
        #[arg(short = 'o', long = "output", value_name = "output", required = true)]
        out_file: PathBuf,

        /// Number of threads to use
        #[arg(short = 't', long = "threads", value_name = "threads", default_value_t = DEFAULT_THREADS)]
        threads: usize,

        /// Minimum aligned fraction to report, between 0 and 100
        #[arg(long = "min-af", value_name = "min_af", default_value_t = DEFAULT_MIN_AF)]
        min_af: f64,

        /// Compression factor (k-mer subsampling rate)
        #[arg(short = 'c', long = "compression", value_name = "compression", default_value_t = DEFAULT_COMPRESSION)]
        compression: usize,

        /// Marker k-mer compression factor
        #[arg(short = 'm', long = "marker-c", value_name = "marker_c", default_value_t = DEFAULT_MARKER_C)]
        marker_c: usize,

        /// Screen out pairs with approximately less than this % identity
        #[arg(short = 's', long = "screen", value_name = "screen", default_value_t = DEFAULT_SCREEN)]
        screen: f64,

        /// Output confidence intervals
        #[arg(long = "ci", default_value_t = false)]
        ci: bool,

        /// Print additional info
        #[arg(long = "detailed", default_value_t = false)]
        detailed: bool,

        /// Output self-self comparisons
        #[arg(long = "diagonal", default_value_t = false)]
        diagonal: bool,

        /// Output sparse matrix format. Sparse output can not be read into a distance matrix, the run will fail
        #[arg(long = "sparse", default_value_t = false)]
        sparse: bool,

        /// Output full matrix instead of lower-triangular. Must stay true, a lower-triangular matrix can not be read into a distance matrix
        #[arg(long = "full-matrix", value_name = "full_matrix", default_value_t = true, action = ArgAction::Set)]
        full_matrix: bool,

        /// Estimate median identity instead of mean
        #[arg(long = "median", default_value_t = false)]
        median: bool,

        /// Disable regression model for ANI prediction
        #[arg(long = "no-learned-ani", default_value_t = false)]
        no_learned_ani: bool,

        /// Estimate mean after trimming off 10%/90% quantiles
        #[arg(long = "robust", default_value_t = false)]
        robust: bool,

        /// Filter small genomes more aggressively
        #[arg(long = "faster-small", default_value_t = false)]
        faster_small: bool,

        /// Preset mode to use
        #[arg(long = "preset", value_name = "preset", value_enum)]
        preset: Option<SkaniPreset>,
    },
    /// Read a matrix from a previous skani triangle run (--full-matrix --distance) and write it as a distance matrix
    Convert {
        /// skani triangle output
        #[arg(short = 'i', long = "input", value_name = "input", required = true)]
        input: PathBuf,

        /// Where to write the distance matrix
        #[arg(short = 'o', long = "output", value_name = "output", required = true)]
        out_file: PathBuf,
    },
}

struct RunSettings {
    version: &'static str,
    skani: String,
    print_statistics: bool,
}

impl RunSettings {
    fn new(version: &'static str, skani: &str, print_statistics: bool) -> Self {
        RunSettings {
            version,
            skani: skani.to_string(),
            print_statistics,
        }
    }
}

struct IOSettings {
    input: PathBuf,
    out_file: PathBuf,
}

impl IOSettings {
    fn new(input: &Path, out_file: &Path) -> Self {
        IOSettings {
            input: input.to_path_buf(),
            out_file: out_file.to_path_buf(),
        }
    }
}

enum Task {
    Triangle(IOSettings, ComparisonOptions),
    Convert(IOSettings),
}

impl From<Commands> for Task {
    fn from(commands: Commands) -> Self {
        match commands {
            Commands::Triangle {input, out_file, threads, min_af, compression, marker_c, screen, ci, detailed, diagonal,
                sparse, full_matrix, median, no_learned_ani, robust, faster_small, preset} => {
                Task::Triangle(IOSettings::new(&input, &out_file),
                               ComparisonOptions {
                                   threads,
                                   min_af,
                                   compression,
                                   marker_c,
                                   screen,
                                   ci,
                                   detailed,
                                   diagonal,
                                   sparse,
                                   full_matrix,
                                   median,
                                   no_learned_ani,
                                   robust,
                                   faster_small,
                                   preset,
                               })
            },
            Commands::Convert {input, out_file} => {
                Task::Convert(IOSettings::new(&input, &out_file))
            },
        }
    }
}

pub enum UserTask {
    Triangle,
    Convert,
}

impl From<&Task> for UserTask {
    fn from(value: &Task) -> Self {
        match value {
            Task::Triangle(_, _) => UserTask::Triangle,
            Task::Convert(_) => UserTask::Convert,
        }
    }
}

pub struct Usage {
    run_settings: RunSettings,
    task: Task,
}

impl Usage {
    pub fn new() -> Self {
        Self::from(Cli::parse())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where I: IntoIterator<Item=T>, T: Into<std::ffi::OsString> + Clone {
        Cli::try_parse_from(args).map(Self::from)
    }

    fn io_settings(&self) -> &IOSettings {
        match &self.task {
            Task::Triangle(s, _) => s,
            Task::Convert(s) => s,
        }
    }

    pub fn get_task(&self) -> UserTask { UserTask::from(&self.task) }
    pub fn get_input(&self) -> &Path { &self.io_settings().input }
    pub fn get_out_file(&self) -> &Path { &self.io_settings().out_file }
    pub fn get_comparison_options(&self) -> Option<&ComparisonOptions> {
        match &self.task {
            Task::Triangle(_, options) => Some(options),
            Task::Convert(_) => None,
        }
    }
    pub fn get_version(&self) -> &str { self.run_settings.version }
    pub fn get_skani(&self) -> &str { &self.run_settings.skani }
    pub fn get_print_statistics(&self) -> bool { self.run_settings.print_statistics }
}

impl From<Cli> for Usage {
    fn from(cli: Cli) -> Self {
        Usage {
            run_settings: RunSettings::new(option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0"), &cli.skani, cli.print_statistics),
            task: Task::from(cli.commands),
        }
    }
}
