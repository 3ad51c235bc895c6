use clap::{Parser, Subcommand};
use clap_complete::Shell;
use nero::Metadata;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "nero", bin_name = "nero", version, disable_help_subcommand = true)]
#[command(about = "CLI interface for the nero media store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// The configuration path
    #[arg(
        short,
        long,
        global = true,
        default_value = "config.toml",
        help_heading = "Options"
    )]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print JSON instead of human-readable output
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file into a repository
    Upload {
        /// The upload destination
        repo: String,
        /// The uploaded file path
        file: PathBuf,
        #[command(subcommand)]
        meta: Option<UploadMeta>,
    },

    /// List every item in a repository
    #[command(alias = "ls")]
    List { repo: String },

    /// Show one item
    Get { repo: String, id: Uuid },

    /// Pick random items
    Random {
        repo: String,
        /// How many items to return (1-20)
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Only pick items whose metadata is of this category (generic, anime)
        #[arg(long)]
        category: Option<String>,
    },

    /// Drop an item from a repository's index (the file stays on disk)
    #[command(alias = "rm")]
    Remove { repo: String, id: Uuid },

    /// List configured repositories
    Repos,

    /// Generate an example configuration file
    Config {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a shell completion script
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug, Clone)]
pub enum UploadMeta {
    /// Upload a file with generic metadata
    Generic {
        /// The source
        #[arg(long)]
        source: Option<String>,
        /// The artist
        #[arg(long)]
        artist: Option<String>,
        /// A link to the artist
        #[arg(long)]
        artist_link: Option<String>,
    },
    /// Upload a file with anime metadata
    Anime {
        /// The anime name
        #[arg(long)]
        name: Option<String>,
    },
}

impl From<UploadMeta> for Metadata {
    fn from(meta: UploadMeta) -> Self {
        match meta {
            UploadMeta::Generic {
                source,
                artist,
                artist_link,
            } => Metadata::generic(source, artist, artist_link),
            UploadMeta::Anime { name } => Metadata::anime(name),
        }
    }
}
