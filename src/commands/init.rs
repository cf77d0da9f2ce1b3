use crate::config::CONFIG_FILE_NAME;
use anyhow::Result;
use std::fs;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Pagina Configuration

[defaults]
page_size = 10

# Views override or extend the built-in catalog. rank is one of
# "engagement", "recency", or "none"; weights apply to engagement only.

[views.feed]
rank = "engagement"
likes_weight = 2.0
comments_weight = 3.0
search_fields = ["title", "author", "tags"]

[views.trending]
rank = "engagement"
likes_weight = 1.0
comments_weight = 5.0
search_fields = ["title"]
"#;

    fs::write(&config_path, default_config)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
