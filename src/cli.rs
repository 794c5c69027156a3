use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bbmap")]
#[command(about = "Buy & Build segment classification and target mapping", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the B&B workbook into segments and build the initiatives overview
    Classify {
        /// B&B platforms/add-ons workbook (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also dump the classified dataset as JSON
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Map the target framework to B&B subcategories via NACE codes
    MapTargets {
        /// Target framework workbook (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also dump the mapped targets as JSON
        #[arg(short, long)]
        json: Option<PathBuf>,
    },

    /// Run both pipelines in sequence
    Run {
        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
