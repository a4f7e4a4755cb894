use clap::{Parser, Subcommand};

use crate::analytics::ConversionPolicy;
use crate::commands;

#[derive(Parser)]
#[command(name = "marketlens")]
#[command(about = "Cross-instrument conversion and order-flow analytics", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 9876)]
        port: u16,
    },
    /// Convert a value between two instruments using a live snapshot
    Convert {
        /// Numeric value to convert
        value: f64,
        /// Source ticker (QQQ, NQ, NDX, SPY, ES, SPX, GLD, GC)
        from: String,
        /// Target ticker
        to: String,
        /// ETF/future conversion policy
        #[arg(long, value_enum, default_value_t = ConversionPolicy::LiveRatio)]
        policy: ConversionPolicy,
    },
    /// Show theoretical vs actual premium for a futures contract
    Premium {
        /// Futures ticker: NQ, ES, or GC
        instrument: String,
    },
    /// Show the next quarterly expiration
    Expiration,
    /// Show the current snapshot and alert count
    Status,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            commands::serve::run(port).await;
        }
        Commands::Convert {
            value,
            from,
            to,
            policy,
        } => {
            commands::convert::run(value, &from, &to, policy).await;
        }
        Commands::Premium { instrument } => {
            commands::premium::run(&instrument).await;
        }
        Commands::Expiration => {
            commands::expiration::run();
        }
        Commands::Status => {
            commands::status::run().await;
        }
    }
}
