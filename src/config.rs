//! Command-line and environment configuration.

use crate::ingestion::pipeline::EtlOptions;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "film-catalog", version, about = "Film catalog ETL and query service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize the raw tables and write the catalog snapshot.
    Etl(EtlArgs),
    /// Load a snapshot and serve queries over HTTP.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct EtlArgs {
    /// Raw film table (CSV).
    #[arg(long, env = "CATALOG_MOVIES")]
    pub movies: PathBuf,
    /// Raw cast/crew table (CSV).
    #[arg(long, env = "CATALOG_CREDITS")]
    pub credits: PathBuf,
    /// Snapshot to write (CSV).
    #[arg(long, env = "CATALOG_SNAPSHOT")]
    pub output: PathBuf,
    /// Fraction of cast/crew rows kept, in (0, 1].
    #[arg(long, default_value_t = 0.5, value_parser = parse_fraction)]
    pub credits_sample_fraction: f64,
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl EtlArgs {
    pub fn options(&self) -> EtlOptions {
        EtlOptions {
            movies: self.movies.clone(),
            credits: self.credits.clone(),
            output: self.output.clone(),
            sample_fraction: self.credits_sample_fraction,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Snapshot written by `etl`.
    #[arg(long, env = "CATALOG_SNAPSHOT")]
    pub snapshot: PathBuf,
    #[arg(long, env = "CATALOG_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,
    /// Allowed CORS origin; repeatable. Any origin is allowed when omitted.
    #[arg(long = "cors-origin")]
    pub cors_origins: Vec<String>,
}

fn parse_fraction(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid fraction {:?}: {}", raw, e))?;
    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!("fraction must be in (0, 1], got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etl_defaults() {
        let cli = Cli::try_parse_from([
            "film-catalog",
            "etl",
            "--movies",
            "movies.csv",
            "--credits",
            "credits.csv",
            "--output",
            "catalog.csv",
        ])
        .unwrap();

        match cli.command {
            Command::Etl(args) => {
                let options = args.options();
                assert_eq!(options.sample_fraction, 0.5);
                assert_eq!(options.seed, 42);
                assert_eq!(options.output, PathBuf::from("catalog.csv"));
            }
            other => panic!("expected etl, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        let result = Cli::try_parse_from([
            "film-catalog",
            "etl",
            "--movies",
            "m.csv",
            "--credits",
            "c.csv",
            "--output",
            "o.csv",
            "--credits-sample-fraction",
            "1.5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_repeated_origins() {
        let cli = Cli::try_parse_from([
            "film-catalog",
            "serve",
            "--snapshot",
            "catalog.csv",
            "--bind",
            "127.0.0.1:9000",
            "--cors-origin",
            "http://a.example",
            "--cors-origin",
            "http://b.example",
        ])
        .unwrap();

        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind.port(), 9000);
                assert_eq!(args.cors_origins.len(), 2);
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }
}
