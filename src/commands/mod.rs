//! CLI command implementations for pagina operations.
//!
//! Each submodule handles one subcommand with its configuration and
//! execution logic. Commands keep I/O at the edges and delegate to the
//! pure query pipeline.
//!
//! Available commands:
//! - **query**: Run a view query against a JSON collection and render a page
//! - **generate**: Produce a deterministic sample collection
//! - **views**: List the built-in and configured views
//! - **init**: Initialize a new pagina configuration file

pub mod generate;
pub mod init;
pub mod query;
pub mod views;

pub use generate::{generate_records, GenerateConfig};
pub use init::init_config;
pub use query::{handle_query, QueryConfig};
pub use views::list_views;
