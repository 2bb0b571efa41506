pub mod accounts;
pub mod audits;
pub mod balances;
pub mod init;
pub mod login;
pub mod status;
pub mod upload;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acv", about = "Monthly account-balance ingestion and viewing for small finance teams.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up acv: choose a data directory, create the database, seed reference data.
    Init {
        /// Path for acv data (default: ~/Documents/acv)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// JSON fixtures file overriding the seeded accounts/users
        #[arg(long)]
        fixtures: Option<String>,
    },
    /// Upload a monthly balance spreadsheet (requires the Admin role).
    Upload {
        /// Path to the .xlsx/.xls file to upload
        file: String,
        /// Username to upload as (default: settings default_user)
        #[arg(long)]
        user: Option<String>,
    },
    /// Show the latest uploaded balances.
    Balances,
    /// List the account reference data.
    Accounts,
    /// List the upload audit trail.
    Audits,
    /// Verify credentials and report the granted role.
    Login {
        /// Username to authenticate
        user: String,
    },
    /// Show current database and summary statistics.
    Status,
}
