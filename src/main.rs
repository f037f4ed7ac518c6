//! linepool CLI.
//!
//! `serve` runs the HTTP server; `load`, `sample`, and `reset` are client
//! commands against a running server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linepool::{PoolClient, SharedPool};

const DEFAULT_URL: &str = "http://127.0.0.1:8000";

/// Shared pool of text lines with uniform random sampling.
#[derive(Parser)]
#[command(name = "linepool")]
#[command(version)]
#[command(about = "Shared pool of text lines with uniform without-replacement sampling")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
    /// Upload a text file into the server's pool.
    Load {
        /// Path of the file to upload.
        file: PathBuf,
        /// Server base URL.
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
    /// Draw N random lines from the server's pool.
    Sample {
        /// Number of lines to draw.
        n: i64,
        /// Server base URL.
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
    /// Clear the server's pool.
    Reset {
        /// Server base URL.
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Serve { addr } => {
            let pool = SharedPool::new();
            linepool::serve(addr, pool).await?;
        }
        Commands::Load { file, url } => {
            let lines_read = PoolClient::new(url).load(&file).await?;
            println!("lines_read: {lines_read}");
        }
        Commands::Sample { n, url } => {
            let lines = PoolClient::new(url).sample(n).await?;
            for (i, line) in lines.iter().enumerate() {
                println!("{}: {line}", i + 1);
            }
        }
        Commands::Reset { url } => {
            PoolClient::new(url).reset().await?;
            println!("pool cleared");
        }
    }

    Ok(())
}
