use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagelift")]
#[command(about = "PDF page extraction service and CLI")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP extraction server (primary mode)
    Serve {
        /// Bind address, overrides SERVER_HOST
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides SERVER_PORT
        #[arg(long)]
        port: Option<u16>,

        /// Directory for temporary uploads and outputs, overrides WORK_DIR
        #[arg(long)]
        work_dir: Option<PathBuf>,
    },

    /// Extract pages to a new PDF
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Pages to keep (e.g., "1,3,5" or "1-3,5")
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Display PDF metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },
}
