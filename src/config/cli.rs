use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "price-scout")]
#[command(about = "Compare phone prices across retail sites and pick the cheapest offer")]
pub struct CliConfig {
    #[arg(long, global = true, env = "PRICE_SCOUT_CONFIG", help = "Providers TOML file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search every provider once and print the comparison
    Search {
        /// Phone model, e.g. "iPhone 15"
        model: String,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Serve GET /search over HTTP
    Serve {
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
}

impl From<OutputFormat> for crate::app::report::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Table => Self::Table,
            OutputFormat::Csv => Self::Csv,
        }
    }
}
