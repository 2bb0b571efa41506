mod accounts;
mod artifacts;
mod audits;
mod auth;
mod balances;
mod cli;
mod db;
mod error;
mod fixtures;
mod fmt;
mod models;
mod parser;
mod settings;
mod uploader;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, fixtures } => {
            cli::init::run(data_dir.as_deref(), fixtures.as_deref())
        }
        Commands::Upload { file, user } => cli::upload::run(&file, user.as_deref()),
        Commands::Balances => cli::balances::run(),
        Commands::Accounts => cli::accounts::run(),
        Commands::Audits => cli::audits::run(),
        Commands::Login { user } => cli::login::run(&user),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
