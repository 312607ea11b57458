use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use tlstats_cli::config::Config;
use tlstats_cli::corpus::{analyze_corpus, read_corpus};
use tlstats_cli::export::{export_path, write_csv};
use tlstats_cli::logging;
use tlstats_core::{Classifier, SpotClassifier};

/// Temporal logic formula statistics
#[derive(Parser, Debug)]
#[command(name = "tlstats", version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Digest a JSON corpus into a CSV of per-formula statistics
    Digest {
        /// Corpus JSON file
        json_file: PathBuf,
        /// JSON configuration file (flags override its values)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory (defaults to ./workingdir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Only analyze entries carrying one of these statuses
        #[arg(long = "status")]
        statuses: Vec<String>,
        /// Classify each formula with Spot's ltlfilt
        #[arg(long)]
        extended: bool,
    },
    /// Empty the working directory, keeping JSON files
    Cleanup {
        /// Directory to clean (defaults to ./workingdir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logging::init_logger(args.debug);

    match args.command {
        Commands::Digest {
            json_file,
            config,
            out_dir,
            statuses,
            extended,
        } => {
            let mut config = match config {
                Some(path) => Config::from_json(&path)?,
                None => Config::default(),
            };
            config.input = json_file;
            if let Some(dir) = out_dir {
                config.out_dir = dir;
            }
            if !statuses.is_empty() {
                config.only_with_status = statuses;
            }
            digest(&config, extended)
        }
        Commands::Cleanup { out_dir, yes } => cleanup(out_dir, yes),
    }
}

/// Get or create the working directory.
fn working_directory(out_dir: &PathBuf) -> io::Result<PathBuf> {
    let dir = if out_dir.as_os_str().is_empty() {
        PathBuf::from("workingdir")
    } else {
        out_dir.clone()
    };
    if dir.exists() {
        println!("Using existing working directory: [{}]", dir.display());
    } else {
        fs::create_dir_all(&dir)?;
        println!("Working directory ['{}'] has been created.", dir.display());
    }
    Ok(dir)
}

fn digest(config: &Config, extended: bool) -> Result<(), Box<dyn Error>> {
    let working_dir = working_directory(&config.out_dir)?;
    let entries = read_corpus(&config.input)?;

    let spot = extended.then(SpotClassifier::new);
    let classifier = spot.as_ref().map(|c| c as &dyn Classifier);
    let records = analyze_corpus(&entries, &config.only_with_status, classifier);

    let out = export_path(&working_dir, &config.input);
    write_csv(&records, &out)?;

    if let Some(spot) = &spot {
        for diagnostic in spot.diagnostics() {
            eprintln!("warning: {diagnostic}");
        }
    }
    println!(
        "Processed {} formulas from {} and saved results to {}",
        records.len(),
        config.input.display(),
        out.display()
    );
    Ok(())
}

fn cleanup(out_dir: Option<PathBuf>, yes: bool) -> Result<(), Box<dyn Error>> {
    let working_dir = working_directory(&out_dir.unwrap_or_default())?;

    let doomed: Vec<PathBuf> = fs::read_dir(&working_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map_or(true, |ext| ext != "json"))
        .collect();

    if doomed.is_empty() {
        println!("No files to clean up in the working directory.");
        return Ok(());
    }

    if !yes {
        print!(
            "This will remove {} files inside of '{}'. Proceed? [y/N] ",
            doomed.len(),
            working_dir.display()
        );
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Cleanup operation aborted.");
            return Ok(());
        }
    }

    let mut removed = 0usize;
    for path in &doomed {
        let result = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        match result {
            Ok(()) => removed += 1,
            Err(err) => eprintln!("Failed to delete {}: {err}", path.display()),
        }
    }
    println!(
        "Cleaned up {removed} files from the working directory: {}",
        working_dir.display()
    );
    Ok(())
}
