use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::{Defaults, PaginaConfig};

/// File name searched for in the directory hierarchy.
pub const CONFIG_FILE_NAME: &str = "pagina.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
///
/// Invalid pieces degrade instead of failing the whole load: a bad
/// `defaults` table reverts to defaults, an invalid view entry is
/// dropped so the built-in of the same name stays in effect.
pub fn parse_and_validate_config(contents: &str) -> Result<PaginaConfig, String> {
    let mut config = toml::from_str::<PaginaConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if config.defaults.page_size == 0 {
        eprintln!("Warning: defaults.page_size must be at least 1. Using default.");
        config.defaults = Defaults::default();
    }

    config.views.retain(|name, spec| match spec.validate() {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Warning: Invalid view '{}': {}. Entry ignored.", name, e);
            false
        }
    });

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<PaginaConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            eprintln!("Warning: {}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load configuration starting the ancestor search from `start`.
pub fn load_config_from(start: PathBuf) -> PaginaConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            PaginaConfig::default()
        })
}

/// Load configuration from pagina.toml if it exists, searching upward
/// from the working directory.
pub fn load_config() -> PaginaConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return PaginaConfig::default();
        }
    };

    load_config_from(current)
}
