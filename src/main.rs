//! utilkit CLI - apply merge, grouping and dedup helpers to JSON/YAML files

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;

use utilkit::error::FixSuggestion;
use utilkit::output_policy::{OutputFormat, OutputPolicy};
use utilkit::value::{self, OrderSpec};
use utilkit::{document, object, Config, Selector, UtilError};

#[derive(Parser)]
#[command(name = "utilkit")]
#[command(about = "Array, object and function helpers for JSON/YAML documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Sort record keys in the output
    #[arg(long, global = true)]
    sort_keys: bool,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deep-merge documents left to right
    Merge {
        /// Record documents (`-` for stdin)
        #[arg(required = true, num_args = 2..)]
        files: Vec<String>,
    },

    /// Group an array into buckets by key
    GroupBy {
        file: String,
        /// Key path, e.g. $.type
        #[arg(short, long)]
        key: String,
    },

    /// Count array items per key
    CountBy {
        file: String,
        #[arg(short, long)]
        key: String,
    },

    /// Drop duplicate array items (first occurrence wins)
    Unique {
        file: String,
        /// Compare by this key path instead of the whole item
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Split an array into chunks
    Chunk {
        file: String,
        #[arg(short, long, default_value_t = 1)]
        size: usize,
    },

    /// Keep only the listed keys of a record
    Pick {
        file: String,
        keys: Vec<String>,
    },

    /// Remove the listed keys from a record
    Omit {
        file: String,
        keys: Vec<String>,
    },

    /// Sort an array by one or more key paths
    OrderBy {
        file: String,
        /// PATH, PATH:asc or PATH:desc (repeatable)
        #[arg(short, long = "by", required = true)]
        by: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Pretty,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Pretty => OutputFormat::Pretty,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing (stderr, so results can be piped)
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), UtilError> {
    let policy = output_policy(&cli)?;
    let result = execute(cli.command)?;
    println!("{}", policy.render(&result)?.trim_end());
    Ok(())
}

/// Config file first, then flags on top
fn output_policy(cli: &Cli) -> Result<OutputPolicy, UtilError> {
    let mut policy = match &cli.config {
        Some(path) => Config::load(path)?.output,
        None => OutputPolicy::default(),
    };
    if let Some(format) = cli.format {
        policy.format = format.into();
    }
    if cli.sort_keys {
        policy.sort_keys = true;
    }
    Ok(policy)
}

fn execute(command: Commands) -> Result<Value, UtilError> {
    match command {
        Commands::Merge { files } => {
            let docs = files
                .iter()
                .map(|f| document::load(f))
                .collect::<Result<Vec<_>, _>>()?;
            object::deep_merge_all(&docs)
        }
        Commands::GroupBy { file, key } => value::group_by(&document::load(&file)?, &key),
        Commands::CountBy { file, key } => value::count_by(&document::load(&file)?, &key),
        Commands::Unique { file, key } => value::unique(
            &document::load(&file)?,
            key.as_ref().map(Selector::from),
        ),
        Commands::Chunk { file, size } => value::chunk(&document::load(&file)?, size),
        Commands::Pick { file, keys } => object::pick(&document::load(&file)?, &keys),
        Commands::Omit { file, keys } => object::omit(&document::load(&file)?, &keys),
        Commands::OrderBy { file, by } => {
            let orders = by
                .iter()
                .map(|spec| spec.parse::<OrderSpec>())
                .collect::<Result<Vec<_>, _>>()?;
            value::order_by(&document::load(&file)?, &orders)
        }
    }
}
