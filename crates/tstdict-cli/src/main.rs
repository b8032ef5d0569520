//! xml2dict - compile an XML word list into a ternary search tree dictionary

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tstdict_cli::{run, ConverterConfig};
use tstdict_core::tst::DEFAULT_TABLE_SIZE;

#[derive(Parser, Debug)]
#[command(name = "xml2dict")]
#[command(about = "Compile an Android XML word list into a compact TST dictionary")]
#[command(version)]
struct Args {
    /// XML word list to read
    input: PathBuf,

    /// Dictionary file to write
    #[arg(short, long, env = "TSTDICT_OUTPUT")]
    output: PathBuf,

    /// Also write a human-readable dump to <OUTPUT>.tst
    #[arg(short, long, env = "TSTDICT_VERBOSE")]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, env = "TSTDICT_DEBUG")]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long, env = "TSTDICT_LOG_JSON")]
    log_json: bool,

    /// Read the dictionary back and compare it with the word list before writing
    #[arg(long, env = "TSTDICT_VERIFY")]
    verify: bool,

    /// Buckets in the canonicalization table
    #[arg(long, default_value_t = DEFAULT_TABLE_SIZE, env = "TSTDICT_TABLE_SIZE")]
    table_size: usize,

    /// Emission pass budget (default: graph depth + 3)
    #[arg(long, env = "TSTDICT_MAX_PASSES")]
    max_passes: Option<usize>,

    /// Smallest word frequency kept
    #[arg(long, default_value = "2", env = "TSTDICT_MIN_FREQUENCY")]
    min_frequency: u32,

    /// Shortest word kept, in characters
    #[arg(long, default_value = "2", env = "TSTDICT_MIN_LENGTH")]
    min_length: usize,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("tstdict_cli={log_level},tstdict_core={log_level},xml2dict={log_level}").into()
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(args.log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!args.log_json).then(tracing_subscriber::fmt::layer))
        .init();

    let mut config = ConverterConfig::new(args.input, args.output);
    config.verbose = args.verbose;
    config.verify = args.verify;
    config.compile.table_size = args.table_size;
    config.compile.max_emit_passes = args.max_passes;
    config.filter.min_frequency = args.min_frequency;
    config.filter.min_length = args.min_length;

    let stats = run(&config)?;
    tracing::debug!(?stats, "conversion finished");

    Ok(())
}
