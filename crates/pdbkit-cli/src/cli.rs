use crate::utils::parser;
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
    author = "Tony Kan, Ted Yu",
    version,
    about = "pdbkit - Command-line utilities for scanning, rewriting, transforming and fetching PDB structure files.",
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

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the platform configuration directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the distinct chain identifiers of the ATOM records.
    Chains(InputArgs),
    /// Print the chain identifier of the first ATOM record.
    FirstChain(InputArgs),
    /// List residue identifiers in file order, one per line.
    Residues(InputArgs),
    /// Report whether every ATOM record is a C-alpha atom.
    CaModel(InputArgs),
    /// Print the coordinates of every ATOM record.
    Coords(InputArgs),
    /// Rename chains in place of the original identifiers.
    ReplaceChains(ReplaceChainsArgs),
    /// Keep only the ATOM records of the selected chains.
    ExtractChains(ExtractChainsArgs),
    /// Drop all TER records.
    RemoveTer(RewriteArgs),
    /// Replace the coordinate columns of one file with those of another.
    UpdateXyz(UpdateXyzArgs),
    /// Apply a rotation and translation to every ATOM record.
    Rottrans(RottransArgs),
    /// Normalize record formatting with the configured tidy program.
    Tidy(TidyArgs),
    /// Clear occupancy information with the configured delocc program.
    Delocc(RewriteArgs),
    /// Run the configured `[tools] pipeline` stages as one pipeline.
    Pipeline(RewriteArgs),
    /// Fetch an entry from the mirror, falling back to the remote archive.
    Fetch(FetchArgs),
    /// Download the current mmCIF entry directly from the remote archive.
    Download(DownloadArgs),
    /// Inspect configuration.
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct RewriteArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB")]
    pub input: PathBuf,

    /// Output path. Defaults to a path derived from the input name.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReplaceChainsArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB")]
    pub input: PathBuf,

    /// Output path.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Chain mapping as OLD=NEW. Can be used multiple times. Example: -m A=B -m B=A
    #[arg(short, long = "map", value_name = "OLD=NEW", required = true, value_parser = parser::parse_chain_mapping)]
    pub mappings: Vec<(char, char)>,
}

#[derive(Args, Debug)]
pub struct ExtractChainsArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB")]
    pub input: PathBuf,

    /// Chain identifiers to keep, e.g. `AB`.
    #[arg(value_name = "CHAINS")]
    pub chains: String,

    /// New identifiers, position-matched with CHAINS.
    #[arg(short, long, value_name = "CHAINS")]
    pub rename: Option<String>,

    /// Output path. Defaults to `<stem>.<chains>.pdb`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct UpdateXyzArgs {
    /// File whose non-coordinate columns are kept.
    #[arg(value_name = "OLD")]
    pub old: PathBuf,

    /// File supplying the coordinate columns.
    #[arg(value_name = "NEW")]
    pub new: PathBuf,

    /// Output path. Defaults to `<old stem>.rottrans.pdb`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RottransArgs {
    /// Path to the PDB file to move.
    #[arg(value_name = "PDB")]
    pub moving: PathBuf,

    #[command(flatten)]
    pub transform: TransformSource,

    /// Translation vector as three comma-separated numbers. Used with --rotation.
    #[arg(
        short,
        long,
        value_name = "X,Y,Z",
        requires = "rotation",
        allow_hyphen_values = true,
        value_parser = parser::parse_vector3
    )]
    pub translation: Option<[f64; 3]>,

    /// Output path. Defaults to `<stem>.rottrans.pdb`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Exactly one way of supplying the transform.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct TransformSource {
    /// Transform table file (title line, then rows of `index t u0 u1 u2`).
    #[arg(short, long, value_name = "PATH")]
    pub matrix: Option<PathBuf>,

    /// Row-major 3x3 rotation matrix as nine comma-separated numbers.
    #[arg(
        short,
        long,
        value_name = "M11,...,M33",
        allow_hyphen_values = true,
        value_parser = parser::parse_matrix3
    )]
    pub rotation: Option<[f64; 9]>,
}

#[derive(Args, Debug)]
pub struct TidyArgs {
    /// Path to the input PDB file.
    #[arg(value_name = "PDB")]
    pub input: PathBuf,

    /// Replace the input file with the normalized result.
    #[arg(long, conflicts_with = "output")]
    pub replace: bool,

    /// Output path. Defaults to `<input>.tidy.pdb`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Four-character PDB identifier, e.g. 1abc.
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub overrides: FetchOverrides,
}

/// Command-line overrides for the `[fetch]` configuration table.
#[derive(Args, Debug, Default, Clone)]
pub struct FetchOverrides {
    /// Directory to place fetched files in, overriding the config file.
    #[arg(short, long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,

    /// Use a local directory tree as the mirror.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["mirror_url", "no_mirror"])]
    pub mirror_dir: Option<PathBuf>,

    /// Use an HTTP object store as the mirror.
    #[arg(long, value_name = "URL", conflicts_with = "no_mirror")]
    pub mirror_url: Option<String>,

    /// Ignore any configured mirror and go straight to the archive.
    #[arg(long)]
    pub no_mirror: bool,

    /// Base URL of the remote archive.
    #[arg(long, value_name = "URL")]
    pub archive_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Four-character PDB identifier, e.g. 1abc.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Directory to download into. Defaults to the configured work dir, then the
    /// current directory.
    #[arg(short, long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Base URL of the remote archive.
    #[arg(long, value_name = "URL")]
    pub archive_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the path of the configuration file in effect.
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rottrans_accepts_matrix_file() {
        let cli = Cli::try_parse_from(["pdbkit", "rottrans", "moving.pdb", "-m", "matrix.txt"])
            .unwrap();
        let Commands::Rottrans(args) = cli.command else {
            panic!("expected rottrans");
        };
        assert_eq!(args.transform.matrix, Some(PathBuf::from("matrix.txt")));
        assert!(args.transform.rotation.is_none());
    }

    #[test]
    fn rottrans_accepts_inline_transform_with_negative_values() {
        let cli = Cli::try_parse_from([
            "pdbkit",
            "rottrans",
            "moving.pdb",
            "--rotation",
            "0,-1,0,1,0,0,0,0,1",
            "--translation",
            "-1.5,0,2",
        ])
        .unwrap();
        let Commands::Rottrans(args) = cli.command else {
            panic!("expected rottrans");
        };
        assert_eq!(
            args.transform.rotation,
            Some([0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0])
        );
        assert_eq!(args.translation, Some([-1.5, 0.0, 2.0]));
    }

    #[test]
    fn rottrans_requires_exactly_one_transform_source() {
        assert!(Cli::try_parse_from(["pdbkit", "rottrans", "moving.pdb"]).is_err());
        assert!(
            Cli::try_parse_from([
                "pdbkit",
                "rottrans",
                "moving.pdb",
                "-m",
                "matrix.txt",
                "--rotation",
                "1,0,0,0,1,0,0,0,1",
            ])
            .is_err()
        );
    }

    #[test]
    fn replace_chains_collects_mappings() {
        let cli = Cli::try_parse_from([
            "pdbkit",
            "replace-chains",
            "in.pdb",
            "-o",
            "out.pdb",
            "-m",
            "A=B",
            "--map",
            "B=A",
        ])
        .unwrap();
        let Commands::ReplaceChains(args) = cli.command else {
            panic!("expected replace-chains");
        };
        assert_eq!(args.mappings, vec![('A', 'B'), ('B', 'A')]);
    }

    #[test]
    fn fetch_mirror_flags_conflict() {
        assert!(
            Cli::try_parse_from([
                "pdbkit",
                "fetch",
                "1abc",
                "--mirror-dir",
                "/m",
                "--no-mirror"
            ])
            .is_err()
        );
        let cli =
            Cli::try_parse_from(["pdbkit", "-vv", "fetch", "1abc", "--mirror-url", "http://m"])
                .unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn pipeline_takes_rewrite_args() {
        let cli = Cli::try_parse_from(["pdbkit", "pipeline", "in.pdb", "-o", "out.pdb"]).unwrap();
        let Commands::Pipeline(args) = cli.command else {
            panic!("expected pipeline");
        };
        assert_eq!(args.input, PathBuf::from("in.pdb"));
        assert_eq!(args.output, Some(PathBuf::from("out.pdb")));
    }

    #[test]
    fn tidy_replace_conflicts_with_output() {
        assert!(
            Cli::try_parse_from(["pdbkit", "tidy", "in.pdb", "--replace", "-o", "x.pdb"]).is_err()
        );
    }
}
