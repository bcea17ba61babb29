//! CLI module for the geo-weather gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Geocoding and weather forecast proxy
#[derive(Parser)]
#[command(name = "geo-weather-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["geo-weather-gateway", "serve", "--port", "9000"]).unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
        }
    }
}
