//! Pnglore CLI — extract provenance metadata from AI-generated PNG files.
//!
//! Usage:
//!   pnglore extract <files...> [--json]
//!   pnglore chunks <file>

use clap::{Parser, Subcommand};
use pnglore::{extract, extract_text_chunks, ExtractError, Extraction};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pnglore",
    version,
    about = "Provenance extraction for AI-generated PNG images"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract provenance records from image files
    Extract {
        /// Image files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Emit one JSON object per file instead of human-readable text
        #[arg(long)]
        json: bool,
    },
    /// List the raw text chunks of a single file
    Chunks {
        /// Image file to inspect
        file: PathBuf,
    },
}

fn read_file(path: &Path) -> Result<Vec<u8>, ExtractError> {
    std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn cmd_extract(files: &[PathBuf], json: bool) -> i32 {
    let mut failed = 0;
    // Strictly one file at a time: downstream consumers of these records
    // expect batches sequenced, not raced.
    for path in files {
        let bytes = match read_file(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error: {}", e);
                failed += 1;
                continue;
            }
        };
        let extraction = extract(&bytes, &filename_of(path));
        if json {
            print_json(&extraction);
        } else {
            print_record(path, &extraction);
        }
    }
    if failed > 0 {
        1
    } else {
        0
    }
}

fn print_json(extraction: &Extraction) {
    // String-keyed records always serialize; a failure here would be a bug,
    // not an input problem.
    match serde_json::to_string(extraction) {
        Ok(line) => println!("{}", line),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn print_record(path: &Path, extraction: &Extraction) {
    let info = &extraction.info;
    println!("{}", path.display());
    println!("  Title:  {}", info.title);
    if !info.model.is_empty() {
        println!("  Model:  {}", info.model);
    }
    if !info.tags.is_empty() {
        println!("  Tags:   {}", info.tags);
    }
    if !info.prompt.is_empty() {
        println!("  Prompt:");
        for line in info.prompt.lines() {
            println!("    {}", line);
        }
    }
    if !info.notes.is_empty() {
        println!("  Notes:");
        for line in info.notes.lines() {
            println!("    {}", line);
        }
    }
    println!();
}

fn cmd_chunks(path: &Path) -> i32 {
    let bytes = match read_file(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let chunks = extract_text_chunks(&bytes);
    if chunks.is_empty() {
        println!("No text chunks found.");
        return 0;
    }
    let mut keywords: Vec<&String> = chunks.keys().collect();
    keywords.sort();
    for keyword in keywords {
        println!("{} ({} bytes)", keyword, chunks[keyword].len());
    }
    0
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Extract { files, json } => cmd_extract(&files, json),
        Commands::Chunks { file } => cmd_chunks(&file),
    };
    std::process::exit(code);
}
