use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Codex CLI - Biocompatibility screening, acoustic resonance, plasma, soliton, and sequence-design analyses of the Codex Resonance Framework.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S generator.max-iterations=2000
    #[arg(
        short = 'S',
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        num_args(1)
    )]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Screen food additives (or a custom compound database) for biocompatibility.
    Screen(ScreenArgs),
    /// Screen dermatological compounds and export their results.
    Dermatology(DermatologyArgs),
    /// Validate RaRaMa acoustic-mode predictions against virus measurements.
    Virus(VirusArgs),
    /// Score fuel molecules and rank them by Codex score.
    Fuel(DatabaseArgs),
    /// Analyze natural or designed anticancer peptides.
    Peptides(PeptidesArgs),
    /// Run the mercury plasma dynamics analysis.
    Plasma(PlasmaArgs),
    /// Analyze membrane soliton behaviour of peptide sequences.
    Soliton(SolitonArgs),
    /// Run clinical validation, time-space cross-validation, and composite therapy.
    Resonance(OutputArgs),
    /// Generate, align, or stress-test resonance-guided sequences.
    Sequence(SequenceArgs),
    /// Mine exported screening results for cross-domain patterns.
    Discover(DiscoverArgs),
    /// Correlate the RaRaMa frequency of exported compounds with their BCS scores.
    FrequencyLaw(DiscoverArgs),
    /// Predict drive frequencies and protocols for cancer-relevant molecular targets.
    Targets(DatabaseArgs),
    /// Check the geometric-phase predictions against the RaRaMa scaling.
    Theory(OutputArgs),
}

/// Output directory shared by every exporting command.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory for JSON and chart-data exports, overriding `output.dir`.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print reports only; write no files.
    #[arg(long)]
    pub no_export: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Custom database in the bundled TOML schema.
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Compound to screen (case-insensitive name fragment). Repeat for several; omit for all.
    #[arg(long = "compound", value_name = "NAME")]
    pub compounds: Vec<String>,

    #[command(flatten)]
    pub source: DatabaseArgs,
}

#[derive(Args, Debug)]
pub struct DermatologyArgs {
    #[command(flatten)]
    pub source: DatabaseArgs,
}

#[derive(Args, Debug)]
pub struct VirusArgs {
    /// Name of a custom particle to validate instead of the database.
    #[arg(long, requires = "diameter_nm", value_name = "NAME")]
    pub name: Option<String>,

    /// Diameter of the custom particle in nanometres.
    #[arg(long, requires = "name", value_name = "NM")]
    pub diameter_nm: Option<f64>,

    /// Observed resonance of the custom particle in GHz.
    #[arg(long, requires = "name", value_name = "GHZ")]
    pub observed_ghz: Option<f64>,

    #[command(flatten)]
    pub source: DatabaseArgs,
}

#[derive(Args, Debug)]
pub struct PeptidesArgs {
    #[command(subcommand)]
    pub command: PeptideCommands,
}

#[derive(Subcommand, Debug)]
pub enum PeptideCommands {
    /// Natural crocodilian peptides against the five-cancer panel.
    Crocodilian {
        #[arg(short, long, value_name = "PATH")]
        database: Option<PathBuf>,
    },
    /// Designed peptides ranked by therapeutic index.
    Design {
        #[arg(short, long, value_name = "PATH")]
        database: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlasmaArgs {
    /// Mercury temperature in kelvin, overriding `plasma.temperature-k`.
    #[arg(long, value_name = "K")]
    pub temperature: Option<f64>,

    /// Collective-mode length scale in metres, overriding `plasma.length-scale-m`.
    #[arg(long, value_name = "M")]
    pub length_scale: Option<f64>,

    /// Dynamo vessel radius in metres, overriding `plasma.dynamo-radius-m`.
    #[arg(long, value_name = "M")]
    pub dynamo_radius: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SolitonArgs {
    /// Peptide sequence to analyze. Repeat for several; omit to run the stress test.
    #[arg(long = "sequence", value_name = "SEQ")]
    pub sequences: Vec<String>,

    /// Cancer type selecting the membrane fluidity, overriding `soliton.cancer-type`.
    #[arg(long, value_name = "TYPE")]
    pub cancer_type: Option<String>,

    /// Membrane reorganization time in seconds, overriding `soliton.reorganization-time-s`.
    #[arg(long, value_name = "SECONDS")]
    pub reorganization_time: Option<f64>,

    /// Also integrate the coupled mechanical-electrical PDE.
    #[arg(long)]
    pub pde: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SequenceArgs {
    #[command(subcommand)]
    pub command: SequenceCommands,
}

/// Generator settings shared by the generating subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneratorArgs {
    /// Target drive frequency in Hz, overriding `generator.target-frequency-hz`.
    #[arg(long, value_name = "HZ")]
    pub target_hz: Option<f64>,

    /// Number of random candidates, overriding `generator.max-iterations`.
    #[arg(long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Seed for a reproducible run, overriding `generator.seed`.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum SequenceCommands {
    /// Generate a peptide matching a target frequency.
    GeneratePeptide {
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        charge_range: Option<Vec<f64>>,
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        hydrophobicity_range: Option<Vec<f64>>,
        #[command(flatten)]
        generator: GeneratorArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate a DNA sequence with a given GC content.
    GenerateDna {
        #[arg(short, long, default_value_t = 100)]
        length: usize,
        #[arg(long, default_value_t = 0.5)]
        gc_content: f64,
        #[command(flatten)]
        generator: GeneratorArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Globally align two sequences.
    Align {
        first: String,
        second: String,
        /// Read both sequences as nucleotides.
        #[arg(long)]
        dna: bool,
    },
    /// Run the six-test GIT validation battery.
    StressTest {
        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Directory holding `bcs*.json` exports.
    #[arg(long, required = true, value_name = "DIR")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::parse_from([
            "codex",
            "screen",
            "--compound",
            "riboflavin",
            "-vv",
            "-S",
            "output.dir=out",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.set_values, vec!["output.dir=out"]);
        let Commands::Screen(args) = cli.command else {
            panic!("expected screen");
        };
        assert_eq!(args.compounds, vec!["riboflavin"]);
    }

    #[test]
    fn custom_virus_requires_diameter() {
        assert!(Cli::try_parse_from(["codex", "virus", "--name", "X"]).is_err());
        let cli = Cli::try_parse_from([
            "codex",
            "virus",
            "--name",
            "X",
            "--diameter-nm",
            "90",
        ])
        .unwrap();
        let Commands::Virus(args) = cli.command else {
            panic!("expected virus");
        };
        assert_eq!(args.diameter_nm, Some(90.0));
    }

    #[test]
    fn peptide_ranges_accept_negative_bounds() {
        let cli = Cli::parse_from([
            "codex",
            "sequence",
            "generate-peptide",
            "--charge-range",
            "-2",
            "3",
            "--seed",
            "7",
        ]);
        let Commands::Sequence(SequenceArgs {
            command:
                SequenceCommands::GeneratePeptide {
                    charge_range,
                    generator,
                    ..
                },
        }) = cli.command
        else {
            panic!("expected generate-peptide");
        };
        assert_eq!(charge_range, Some(vec![-2.0, 3.0]));
        assert_eq!(generator.seed, Some(7));
    }

    #[test]
    fn frequency_law_requires_data_dir() {
        assert!(Cli::try_parse_from(["codex", "frequency-law"]).is_err());
        let cli = Cli::parse_from(["codex", "frequency-law", "--data-dir", "exports"]);
        let Commands::FrequencyLaw(args) = cli.command else {
            panic!("expected frequency-law");
        };
        assert_eq!(args.data_dir, PathBuf::from("exports"));
    }

    #[test]
    fn targets_and_theory_take_output_flags() {
        let cli = Cli::parse_from(["codex", "targets", "--database", "t.toml", "--no-export"]);
        let Commands::Targets(args) = cli.command else {
            panic!("expected targets");
        };
        assert_eq!(args.database, Some(PathBuf::from("t.toml")));
        assert!(args.output.no_export);

        let cli = Cli::parse_from(["codex", "theory", "--output-dir", "out"]);
        let Commands::Theory(args) = cli.command else {
            panic!("expected theory");
        };
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
    }
}
