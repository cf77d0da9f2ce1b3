use anyhow::Result;
use clap::Parser;
use pagina::cli::{Cli, Commands};
use pagina::commands::{GenerateConfig, QueryConfig};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            input,
            view,
            filter,
            page,
            page_size,
            format,
            output,
            latency_ms,
            plain,
        } => pagina::commands::handle_query(QueryConfig {
            input,
            view,
            filter,
            page,
            page_size,
            format,
            output,
            latency_ms,
            plain,
        }),
        Commands::Generate { count, seed, output } => {
            pagina::commands::generate_records(GenerateConfig { count, seed, output })
        }
        Commands::Views => pagina::commands::list_views(),
        Commands::Init { force } => pagina::commands::init_config(force),
    }
}
