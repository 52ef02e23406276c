pub mod search;
pub mod shell;
pub mod term;

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::{ApiConfig, DEFAULT_API_URL};
use crate::error::AppError;
use crate::render::Format;
use crate::search::SearchMode;

#[derive(Parser)]
#[command(
    name = "credito-busca",
    version,
    about = "Look up fiscal credit records by credit number or NFS-e"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Credit API server URL
    #[arg(long, default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Request timeout in seconds (transport default if not specified)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Answer lookups from built-in demo records instead of the API
    #[arg(long, global = true)]
    pub demo: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Terminal, global = true)]
    pub format: Format,
}

#[derive(Subcommand)]
pub enum Command {
    /// Look up a single credit by credit number or NFS-e
    Search {
        /// Which number the term is
        #[arg(long, short, value_enum, default_value_t = SearchMode::Credit)]
        mode: SearchMode,
        /// Credit number or NFS-e number
        term: String,
    },
    /// Search credits by free text (first page, up to 100 records)
    Term {
        /// Text matched against credit and NFS-e numbers
        term: String,
    },
    /// Interactive search form
    Shell,
}

impl Cli {
    pub fn api_config(&self) -> Result<ApiConfig, AppError> {
        let timeout = match self.timeout {
            Some(0) => {
                return Err(AppError::Config("--timeout must be at least 1 second".into()));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };
        Ok(ApiConfig {
            api_url: self.api_url.clone(),
            timeout,
        })
    }
}
