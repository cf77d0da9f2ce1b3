use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagina")]
#[command(about = "Paged, ranked, filterable views over JSON collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Query a collection through a view and print one page
    Query {
        /// JSON file holding the record collection
        #[arg(short, long)]
        input: PathBuf,

        /// View to query through (see the views command)
        #[arg(long, default_value = "feed")]
        view: String,

        /// Filter text; items matching any search field survive
        #[arg(long)]
        filter: Option<String>,

        /// Page to fetch (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Items per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Simulated fetch latency in milliseconds
        #[arg(long, default_value = "0")]
        latency_ms: u64,

        /// Disable colored output
        #[arg(long)]
        plain: bool,
    },

    /// Generate a deterministic sample collection
    Generate {
        /// Number of records to generate
        #[arg(short, long, default_value = "50")]
        count: usize,

        /// RNG seed; the same seed reproduces the same collection
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List built-in and configured views
    Views,

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
