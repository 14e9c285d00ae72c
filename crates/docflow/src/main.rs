// SPDX-FileCopyrightText: 2026 DocFlow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DocFlow HR - document-management API backend.
//!
//! This is the binary entry point for the DocFlow service.

use clap::{Parser, Subcommand};

mod serve;

/// DocFlow HR - document-management API backend.
#[derive(Parser, Debug)]
#[command(name = "docflow", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the DocFlow API server.
    Serve,
    /// Print the effective configuration with secrets redacted.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match docflow_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            docflow_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match serve::render_config(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("docflow: use --help for available commands");
        }
    }
}
