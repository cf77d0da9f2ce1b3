//! Configuration for pagina
//!
//! `pagina.toml` carries global defaults plus named view overrides:
//!
//! ```toml
//! [defaults]
//! page_size = 10
//!
//! [views.feed]
//! rank = "engagement"
//! likes_weight = 2.0
//! comments_weight = 3.0
//! search_fields = ["title", "author", "tags"]
//! ```
//!
//! The file is discovered by walking ancestor directories from the
//! working directory; a missing file means defaults, and an invalid one
//! warns and falls back rather than aborting.

mod loader;
mod views;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use views::{RankKind, ViewSpec, KNOWN_SEARCH_FIELDS};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_PAGE_SIZE;

/// Root configuration: `[defaults]` plus named `[views.*]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginaConfig {
    #[serde(default)]
    pub defaults: Defaults,

    /// Named view specs. An entry overrides the built-in view of the
    /// same name and defines a brand-new view otherwise.
    #[serde(default)]
    pub views: BTreeMap<String, ViewSpec>,
}

/// Global defaults applied when a query does not specify them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
