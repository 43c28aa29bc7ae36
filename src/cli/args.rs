use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "movienotes")]
#[command(about = "Rate movies twice, attach photos, keep everything on this machine")]
pub struct Cli {
    /// Data directory (overrides MOVIENOTES_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage key (overrides MOVIENOTES_STORAGE_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save a new movie
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        rating_a: String,
        #[arg(allow_hyphen_values = true)]
        rating_b: String,
    },
    /// Update the movie at a position
    Edit {
        position: usize,
        name: String,
        #[arg(allow_hyphen_values = true)]
        rating_a: String,
        #[arg(allow_hyphen_values = true)]
        rating_b: String,
    },
    /// Delete the movie at a position
    Delete { position: usize },
    /// Manage photos of a movie
    Photo {
        #[command(subcommand)]
        action: PhotoCommand,
    },
    /// List movies, newest first
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show counts and averages
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum PhotoCommand {
    /// Attach image files; either all are attached or none
    Add {
        position: usize,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one photo
    Remove { position: usize, photo: usize },
}
