//! # tstdict CLI
//!
//! Converts Android XML word lists into ternary-search-tree dictionary
//! images using `tstdict-core`.
//!
//! This crate provides:
//! - **Word list parsing**: the `<wordlist>/<w f=".." flags="..">` format,
//!   with configurable filtering
//! - **Conversion**: parse, compile, optionally verify, then write the
//!   image and an optional `.tst` text dump
//! - **`xml2dict`**: the command-line front end

pub mod config;
pub mod error;
pub mod wordlist;

pub use config::ConverterConfig;
pub use error::WordListError;
pub use wordlist::{parse, ParsedWordList, WordList, WordListFilter};

use anyhow::{bail, Context};
use std::fs;
use tracing::{debug, info, warn};
use tstdict_core::{compile, dump, CompileStats, DictReader};

/// Run a full conversion.
///
/// Nothing is written unless parsing and compilation succeed, and a failed
/// dump removes the image it accompanies.
pub fn run(config: &ConverterConfig) -> anyhow::Result<CompileStats> {
    info!("Reading word list from {}", config.input.display());
    let xml = fs::read_to_string(&config.input)
        .with_context(|| format!("failed to read {}", config.input.display()))?;

    let parsed = wordlist::parse(&xml, &config.filter)
        .with_context(|| format!("failed to parse {}", config.input.display()))?;
    info!(
        entries = parsed.entries,
        skipped = parsed.skipped,
        words = parsed.words.len(),
        "parsed word list"
    );

    let dict = compile(
        parsed.words.iter().map(|(word, freq)| (word.as_str(), *freq)),
        &config.compile,
    )
    .context("failed to compile dictionary")?;

    // Check and render everything before touching the filesystem
    let reader = DictReader::new(dict.bytes.clone())?;
    if config.verify {
        verify(&reader, &parsed.words)?;
        info!("verified {} words", parsed.words.len());
    }
    let dump_text = if config.verbose {
        Some(dump::render(&reader)?)
    } else {
        None
    };

    fs::write(&config.output, reader.as_bytes())
        .with_context(|| format!("failed to write {}", config.output.display()))?;
    info!(
        "Wrote {} bytes to {}",
        dict.stats.bytes,
        config.output.display()
    );

    if let Some(text) = dump_text {
        let path = config.dump_path();
        if let Err(err) = fs::write(&path, text) {
            if let Err(cleanup) = fs::remove_file(&config.output) {
                warn!(
                    "failed to remove {} after error: {}",
                    config.output.display(),
                    cleanup
                );
            }
            return Err(err).with_context(|| format!("failed to write {}", path.display()));
        }
        debug!("wrote dump to {}", path.display());
    }

    info!("Successfully created dictionary");
    Ok(dict.stats)
}

fn verify(reader: &DictReader, words: &WordList) -> anyhow::Result<()> {
    let mut entries = reader.entries()?;
    entries.sort();
    let expected: Vec<(String, u32)> = words.iter().map(|(w, f)| (w.clone(), *f)).collect();

    if entries != expected {
        let missing = expected.iter().find(|e| !entries.contains(e));
        bail!(
            "dictionary does not round-trip: {} entries read back, {} expected (first missing: {:?})",
            entries.len(),
            expected.len(),
            missing
        );
    }
    Ok(())
}
