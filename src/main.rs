use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gemsketch::Config;
use gemsketch::feedback::{CriticBackend, GeminiCritic};
use gemsketch::gallery::{self, DrawingStore};

#[derive(Parser, Debug)]
#[command(name = "gemsketch")]
#[command(
    version,
    about = "Drawing canvas and gallery service for a mascot-drawing contest"
)]
struct Cli {
    /// Path to an alternate config file
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the gallery API server
    Serve {
        /// Override the configured port
        #[arg(long, short = 'p')]
        port: Option<u16>,

        /// Override the configured store directory
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Report the drawings store location, size, and entry count
    InspectStore {
        /// Store directory to inspect instead of the configured one
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Delete the drawings store and its lock file
    ClearStore {
        /// Store directory to clear instead of the configured one
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
    /// Ask the AI critic for feedback on a finished drawing
    Critique {
        /// PNG file to submit
        #[arg(value_name = "IMAGE")]
        image: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Command::Serve { port, data_dir }) => serve(config, port, data_dir),
        Some(Command::InspectStore { data_dir }) => inspect_store(&config, data_dir),
        Some(Command::ClearStore { data_dir }) => clear_store(&config, data_dir),
        Some(Command::Critique { image }) => critique(&config, image),
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn store_for(config: &Config, data_dir: Option<PathBuf>) -> DrawingStore {
    let dir = data_dir.unwrap_or_else(|| config.gallery.resolved_data_dir());
    DrawingStore::new(dir, config.gallery.max_entries)
}

fn serve(config: Config, port: Option<u16>, data_dir: Option<PathBuf>) -> Result<()> {
    log::info!(
        "gemsketch {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GEMSKETCH_GIT_HASH")
    );

    let ip: IpAddr = config.gallery.bind_address.parse().with_context(|| {
        format!(
            "invalid gallery bind address '{}'",
            config.gallery.bind_address
        )
    })?;
    let addr = SocketAddr::new(ip, port.unwrap_or(config.gallery.port));

    let store = store_for(&config, data_dir);
    log::info!("Drawings store: {}", store.data_file_path().display());

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(gallery::run(store, addr, config.gallery.min_payload_len))
}

fn inspect_store(config: &Config, data_dir: Option<PathBuf>) -> Result<()> {
    let store = store_for(config, data_dir);
    let inspection = store.inspect()?;

    println!("Store file: {}", inspection.data_path.display());
    if !inspection.exists {
        println!("Exists:     no");
        return Ok(());
    }

    println!("Exists:     yes");
    if let Some(size) = inspection.size_bytes {
        println!("Size:       {size} bytes");
    }
    if let Some(modified) = inspection.modified {
        let stamp: chrono::DateTime<chrono::Local> = modified.into();
        println!("Modified:   {}", stamp.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(count) = inspection.entry_count {
        println!("Entries:    {count}");
    }
    if let Some(newest) = inspection.newest_created_at {
        println!("Newest:     {newest}");
    }

    Ok(())
}

fn clear_store(config: &Config, data_dir: Option<PathBuf>) -> Result<()> {
    let store = store_for(config, data_dir);
    let outcome = store.clear()?;

    if outcome.removed_data {
        println!("Removed {}", store.data_file_path().display());
    } else {
        println!("No store file to remove");
    }
    if outcome.removed_lock {
        log::debug!("Removed store lock file");
    }

    Ok(())
}

fn critique(config: &Config, image: PathBuf) -> Result<()> {
    let png =
        fs::read(&image).with_context(|| format!("failed to read {}", image.display()))?;

    let critic = match GeminiCritic::from_config(&config.feedback) {
        Ok(critic) => critic,
        Err(err) => {
            log::error!("Feedback client unavailable: {err}");
            println!("{}", err.user_message());
            return Ok(());
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    match runtime.block_on(critic.critique(&png)) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            log::error!("Critique request failed: {err}");
            println!("{}", err.user_message());
        }
    }

    Ok(())
}

fn print_usage() {
    println!("gemsketch: drawing canvas and gallery service for a mascot-drawing contest");
    println!();
    println!("Usage:");
    println!("  gemsketch serve            Run the gallery API server");
    println!("  gemsketch inspect-store    Show drawings store details");
    println!("  gemsketch clear-store      Delete the drawings store");
    println!("  gemsketch critique IMAGE   Ask the AI critic about a drawing");
    println!("  gemsketch --help           Show full help");
    println!();
    println!("The drawing surface itself ships as a library; embedding hosts");
    println!("mount it with a fixed canvas resolution and hand saved images");
    println!("to the gallery API.");
    println!();
    println!("Configuration: ~/.config/gemsketch/config.toml (defaults apply");
    println!("when the file is absent).");
}
