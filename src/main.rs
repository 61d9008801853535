use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use dotenvy::dotenv;

use versedata::config::{PrepConfig, DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_DIR};
use versedata::{logger, prepare};

#[derive(Parser, Debug)]
#[command(author, version, about = "Prepare Bible text and cross-reference datasets from USFX sources", long_about = None)]
struct Cli {
    /// Directory containing the unzipped USFX package and the
    /// cross-reference file.
    #[arg(long, value_name = "DIRECTORY_PATH", env = "VERSEDATA_SOURCE_DIR", default_value = DEFAULT_SOURCE_DIR)]
    source_dir: PathBuf,

    /// Book names XML file. Overrides the package layout under --source-dir.
    #[arg(long, value_name = "FILE_PATH")]
    book_names: Option<PathBuf>,

    /// USFX scripture XML file. Overrides the package layout under --source-dir.
    #[arg(long, value_name = "FILE_PATH")]
    usfx: Option<PathBuf>,

    /// Tab-separated cross-reference list. Overrides cross_references.txt
    /// under --source-dir.
    #[arg(long, value_name = "FILE_PATH")]
    cross_refs: Option<PathBuf>,

    /// Directory the JSON artifacts are written to.
    #[arg(long, value_name = "DIRECTORY_PATH", env = "VERSEDATA_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

fn main() {
    // Attempt to load .env file. This might define VERSEDATA_SOURCE_DIR or
    // VERSEDATA_OUTPUT_DIR; clap picks them up via `env = ...`.
    if dotenv().is_err() {
        println!("Info: No .env file found or failed to load.");
    }

    if let Err(e) = logger::init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
    }

    let cli = Cli::parse();

    let config = PrepConfig::resolve(
        &cli.source_dir,
        cli.book_names,
        cli.usfx,
        cli.cross_refs,
        cli.output_dir,
    );

    if let Err(e) = prepare::run(&config) {
        logger::error(&format!("Data preparation failed: {:#}", e));
        exit(1);
    }
}
