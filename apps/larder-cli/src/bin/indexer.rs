use std::fs;
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use larder_cli::{catalog_path, init_tracing, load_settings};
use larder_core::source::CatalogSource;
use larder_core::CatalogIndexer;

#[derive(Parser)]
#[command(name = "larder-indexer", about = "Index a recipe catalog and report what was loaded")]
struct Args {
    /// Catalog file or directory (defaults to catalog.path)
    catalog: Option<PathBuf>,

    /// Write the sorted ingredient vocabulary as JSON
    #[arg(long)]
    vocabulary_out: Option<PathBuf>,

    /// Fail on the first malformed record
    #[arg(long)]
    strict: bool,

    #[arg(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    let settings = load_settings()?;

    let path = catalog_path(&settings, args.catalog.as_deref());
    let source = CatalogSource::new(&path);
    let files = source.files()?;
    println!("Recipe Catalog Indexer\n======================");
    println!("Catalog: {} ({} files)", path.display(), files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files {msg}")?
            .progress_chars("#>-"),
    );
    let mut records = Vec::new();
    for file in &files {
        pb.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        records.extend(source.read_file(file)?);
        pb.inc(1);
    }
    pb.finish_with_message("read");

    let indexer = CatalogIndexer::new().strict(args.strict || settings.catalog.strict);
    let catalog = indexer.index_values(records)?;

    println!("\n✅ Indexing completed successfully!");
    println!("📊 Recipes: {}", catalog.len());
    println!("🥕 Vocabulary: {} ingredients", catalog.vocabulary().len());
    println!("🔑 Fingerprint: {:016x}", catalog.fingerprint());
    if !catalog.skipped().is_empty() {
        println!("⚠️  Skipped {} malformed records:", catalog.skipped().len());
        for m in catalog.skipped() { println!("   {}", m); }
    }

    if let Some(out) = args.vocabulary_out {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&out, serde_json::to_string_pretty(&catalog.vocabulary().sorted())?)?;
        println!("💾 Vocabulary written to {}", out.display());
    }

    println!("\n💡 To search, use: cargo run --bin larder -- search -i chicken -i rice");
    Ok(())
}
