//! ClipMap CLI entry point
//!
//! Resolves announcement sequence codes into audio clip paths using an
//! XML-configured mapping store.

use clap::{Parser, Subcommand};
use clipmap::{MappingStore, SequenceResolver};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "clipmap")]
#[command(about = "Announcement sequence to audio clip path resolver")]
#[command(version)]
#[command(author = "ClipMap Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a colon-separated sequence payload
    Resolve {
        /// Clip configuration XML file
        #[arg(short = 'c', long, default_value = "AudioClipConfig.xml")]
        config: PathBuf,
        /// Directory holding the referenced mapping tables
        #[arg(short = 'm', long = "mapping-dir", default_value = "mappings")]
        mapping_dir: PathBuf,
        /// Sequence payload, e.g. "WA1:AB12CD34"
        sequence: String,
        /// Print the result as a JSON array instead of one path per line
        #[arg(long)]
        json: bool,
    },
    /// Inspect the loaded mapping store
    Inspect {
        /// Clip configuration XML file
        #[arg(short = 'c', long, default_value = "AudioClipConfig.xml")]
        config: PathBuf,
        /// Directory holding the referenced mapping tables
        #[arg(short = 'm', long = "mapping-dir", default_value = "mappings")]
        mapping_dir: PathBuf,
    },
}

fn load_store(config: &PathBuf, mapping_dir: &PathBuf) -> anyhow::Result<MappingStore> {
    let start = Instant::now();
    eprintln!("Loading clip config: {:?}", config);

    let store = MappingStore::load(config, mapping_dir)
        .map_err(|e| anyhow::anyhow!("Failed to load clip config: {}", e))?;

    eprintln!(
        "Loaded {} composite keys in {:.2}s",
        store.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(store)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            config,
            mapping_dir,
            sequence,
            json,
        } => {
            let store = load_store(&config, &mapping_dir)?;
            let resolver = SequenceResolver::new(store);

            let paths = resolver.resolve_request(&sequence);

            if json {
                println!("{}", serde_json::to_string(&paths)?);
            } else {
                for path in &paths {
                    println!("{}", path);
                }
            }
            eprintln!("Resolved {} path(s)", paths.len());
        }

        Commands::Inspect {
            config,
            mapping_dir,
        } => {
            let store = load_store(&config, &mapping_dir)?;

            let mut keys: Vec<&str> = store.composite_keys().collect();
            keys.sort_unstable();

            for key in keys {
                // lookup cannot miss for a key the store just yielded
                if let Some(entry) = store.lookup(key) {
                    println!("{}\tdir={}\tmappings={}", key, entry.dir, entry.mappings.len());
                }
            }
        }
    }

    Ok(())
}
