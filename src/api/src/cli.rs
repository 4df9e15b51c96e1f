//! CLI commands for calscape-api.
//!
//! Supports API server mode and one-shot search/detail lookups.

use bytes::Bytes;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::scraper::CalscapeClient;

#[derive(Parser)]
#[command(name = "calscape-api")]
#[command(version, about = "Calscape plant search API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run a single search and print the results as JSON
    Search {
        /// Form-encoded search body, e.g. "plant_name=oak"
        #[arg(value_name = "FORM")]
        form: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch a plant's details and print them as JSON
    Detail {
        /// Plant slug, e.g. "Quercus-agrifolia"
        #[arg(value_name = "SLUG")]
        slug: String,
    },
}

/// Run a one-shot search.
pub async fn run_search(form: String, limit: Option<usize>) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let client = CalscapeClient::from_config(&config.upstream)?;
    let limit = limit.unwrap_or(config.search.default_limit);

    eprintln!("Searching {} ...", client.base_url());
    let results = client.search(Bytes::from(form), limit).await?;
    eprintln!("Found {} results", results.len());

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Run a one-shot detail lookup.
pub async fn run_detail(slug: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let client = CalscapeClient::from_config(&config.upstream)?;

    let detail = client.fetch_detail(&slug).await?;
    println!("{}", serde_json::to_string_pretty(&detail)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["calscape-api", "serve", "-H", "127.0.0.1", "-p", "8080"])
            .unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_serve_defaults_to_config() {
        let cli = Cli::try_parse_from(["calscape-api", "serve"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn test_parse_search() {
        let cli =
            Cli::try_parse_from(["calscape-api", "search", "plant_name=oak", "--limit", "5"])
                .unwrap();
        match cli.command {
            Commands::Search { form, limit } => {
                assert_eq!(form, "plant_name=oak");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_detail_requires_slug() {
        assert!(Cli::try_parse_from(["calscape-api", "detail"]).is_err());
    }
}
