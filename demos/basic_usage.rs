//! Basic usage example for the tstdict compiler
//!
//! This example demonstrates:
//! - Compiling a word list into a dictionary image
//! - Looking up words in the image
//! - Rendering the image as text
//! - Converting an XML word list from disk
//!
//! Run with: cargo run --example basic_usage

use tstdict_cli::ConverterConfig;
use tstdict_core::{compile, dump, CompileConfig, DictReader};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    println!("📚 tstdict - Basic Usage Example\n");

    // ==================== In-memory compilation ====================

    let words = [
        ("read", 120),
        ("reads", 40),
        ("reader", 35),
        ("lead", 90),
        ("leads", 30),
        ("leader", 60),
    ];

    println!("🔨 Compiling {} words...", words.len());
    let dict = compile(words, &CompileConfig::default())?;
    println!(
        "   ✅ {} records, {} bytes, {} emission passes",
        dict.stats.records, dict.stats.bytes, dict.stats.emit_passes
    );
    println!(
        "   🔗 {} of {} nodes shared away",
        dict.stats.nodes_released, dict.stats.nodes_allocated
    );

    // ==================== Lookups ====================

    let reader = DictReader::new(dict.bytes.clone())?;
    println!("\n🔍 Looking up words...");
    for word in ["read", "leader", "lea", "readers"] {
        match reader.frequency_of(word)? {
            Some(freq) => println!("   - {word}: {freq}"),
            None => println!("   - {word}: not found"),
        }
    }

    // ==================== Text dump ====================

    println!("\n📄 Dump:");
    print!("{}", dump::render(&reader)?);

    // ==================== XML conversion ====================

    let dir = std::env::temp_dir().join("tstdict-basic-usage");
    std::fs::create_dir_all(&dir)?;
    let input = dir.join("words.xml");
    std::fs::write(
        &input,
        r#"<wordlist>
  <w f="15" flags="">hello</w>
  <w f="12" flags="">help</w>
  <w f="9" flags="">yellow</w>
  <w f="20" flags="abbreviation">hwy</w>
</wordlist>"#,
    )?;

    let mut config = ConverterConfig::new(&input, dir.join("main.dict"));
    config.verbose = true;
    config.verify = true;

    println!("\n📥 Converting {}...", input.display());
    let stats = tstdict_cli::run(&config)?;
    println!(
        "   ✅ {} words written to {} (dump: {})",
        stats.words,
        config.output.display(),
        config.dump_path().display()
    );

    println!("\n✨ Example completed successfully!");
    Ok(())
}
