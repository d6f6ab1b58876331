use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recircle")]
#[command(about = "Circular economy AI analysis and green rewards", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print per-stage diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a photo or description of discarded items
    Analyze {
        /// Photo of the items (jpg/png/webp)
        #[arg(required_unless_present = "text")]
        photo: Option<PathBuf>,

        /// Describe the items instead of providing a photo
        #[arg(short, long, conflicts_with = "photo")]
        text: Option<String>,

        /// User the results are recorded for
        #[arg(short, long)]
        user: String,

        /// Write the full report as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum items analyzed this run (overrides config)
        #[arg(long)]
        item_cap: Option<usize>,

        /// Analyze without appending to the ledger
        #[arg(long)]
        dry_run: bool,
    },

    /// Show cumulative totals for one user
    Dashboard {
        user: String,
    },

    /// Rank all users by green points
    Leaderboard,

    /// Export a green contribution certificate as PDF
    Certificate {
        user: String,

        /// Output PDF path (default: <user>-certificate.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Register a new user (password is prompted, never passed as an argument)
    Register {
        username: String,
    },

    /// Verify a user's credentials
    Login {
        username: String,
    },

    /// Community shop
    Shop {
        #[command(subcommand)]
        command: ShopCommands,
    },

    /// Show or edit configuration
    Config {
        /// Set the Gemini API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Show the current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum ShopCommands {
    /// List an item for sale
    Add {
        /// Seller name
        #[arg(long)]
        seller: String,

        /// Item name
        #[arg(long)]
        name: String,

        /// Item description
        #[arg(long, default_value = "")]
        description: String,

        /// Price in INR
        #[arg(long)]
        price: f64,

        /// Photo of the item
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Show all items for sale
    List,
}
