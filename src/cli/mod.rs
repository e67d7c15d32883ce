use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod allocate;
pub mod auth;
pub mod poll;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the API server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "8000")]
        port: String,
    },
    /// Print the allocation for the work week starting at a date
    Allocate {
        /// Anchor date, YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Include the individual events that were counted
        #[arg(long, action, default_value = "false")]
        events: bool,
    },
    /// Ask a running server for the week containing a date
    Poll {
        /// Any date in the week, YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        url: String,
    },
    /// Perform OAuth authentication and print the refresh token
    Auth {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Allocate { date, events }) => {
            allocate::run(date, events).await?;
        }
        Some(Command::Poll { date, url }) => {
            poll::run(date, url).await?;
        }
        Some(Command::Auth {}) => {
            auth::run().await?;
        }
        None => {}
    }

    Ok(())
}
