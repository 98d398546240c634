use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetfill::{Direction, SubstituteOptions, Template, VariableStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sheetfill",
    version,
    about = "Fill %placeholder% tokens in a spreadsheet template"
)]
struct Cli {
    /// Template file (.xlsx, .xlsm or .json grid).
    template: PathBuf,

    /// JSON object with the variables to substitute.
    #[arg(long = "vars")]
    vars: PathBuf,

    /// Where to write the filled document. Same format as the template.
    #[arg(long = "out", short = 'o')]
    out: PathBuf,

    /// JSON file with substitution options; flags below override it.
    #[arg(long = "options")]
    options: Option<PathBuf>,

    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Only duplicate cells that belong to the exploded record array.
    #[arg(long)]
    no_duplicate_all: bool,

    /// Blank or strip placeholders that resolve to nothing.
    #[arg(long)]
    remove_missing: bool,

    /// Print the substitution summary as JSON on stdout.
    #[arg(long)]
    summary: bool,

    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Vertical,
    Horizontal,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Vertical => Direction::Vertical,
            DirectionArg::Horizontal => Direction::Horizontal,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<SubstituteOptions> {
    let mut options = match &cli.options {
        Some(path) => read_json(path)
            .and_then(|v| serde_json::from_value(v).context("invalid options"))
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => SubstituteOptions::default(),
    };
    if let Some(direction) = cli.direction {
        options.direction = direction.into();
    }
    if cli.no_duplicate_all {
        options.duplicate_all = false;
    }
    if cli.remove_missing {
        options.remove_non_existent = true;
    }
    Ok(options)
}

fn read_json(path: &Path) -> Result<serde_json::Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = load_options(&cli)?;
    let mut vars = VariableStore::from_json(read_json(&cli.vars)?)
        .with_context(|| format!("loading variables from {}", cli.vars.display()))?;
    let template = Template::open(&cli.template)?;

    let summary = template
        .substitute_to_path(&cli.out, &mut vars, &options)
        .with_context(|| format!("filling {}", cli.template.display()))?;

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    if !summary.is_complete() {
        tracing::warn!(
            unresolved = summary.unresolved,
            "some placeholders were left in {}",
            cli.out.display()
        );
    }
    Ok(())
}
