pub mod import;
pub mod inspect;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ipamr_common::config::InferencePolicy;

#[derive(Parser)]
#[command(name = "ipamr")]
#[command(about = "Reconcile raw interface exports into an IP address inventory.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import an inventory export into the store
    #[command(alias = "im")]
    Import(ImportArgs),
    /// Show the column structure and sample rows of an export
    #[command(alias = "i")]
    Inspect {
        file: PathBuf,
        /// Number of sample rows to display
        #[arg(long, default_value_t = 5)]
        rows: usize,
    },
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the delimited export file
    pub file: PathBuf,
    /// Path of the inventory database
    #[arg(long, default_value = "ipam.db")]
    pub db: PathBuf,
    /// Maximum number of records to process (prompted when omitted)
    #[arg(long)]
    pub limit: Option<u64>,
    /// Subnet inference policy: basic or enhanced
    #[arg(long, default_value = "basic")]
    pub policy: InferencePolicy,
    /// Keep existing entries instead of clearing the table first
    #[arg(long)]
    pub keep: bool,
    /// Answer yes to every prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
