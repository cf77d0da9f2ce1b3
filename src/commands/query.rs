//! Runs one query against a JSON collection and renders the page.

use crate::output::{self, JsonWriter, MarkdownWriter, PageWriter, TableWriter};
use crate::page::Page;
use crate::record::Record;
use crate::session::{FetchOutcome, ViewSession};
use crate::store::CollectionStore;
use crate::views;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub struct QueryConfig {
    pub input: PathBuf,
    pub view: String,
    pub filter: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
    pub format: crate::cli::OutputFormat,
    pub output: Option<PathBuf>,
    pub latency_ms: u64,
    pub plain: bool,
}

pub fn handle_query(config: QueryConfig) -> Result<()> {
    // Files get plain text; ANSI escapes belong on a terminal only.
    if config.plain || config.output.is_some() {
        colored::control::set_override(false);
    }

    let records = load_records(&config.input)?;
    let app_config = crate::config::load_config();
    let view = views::resolve_view(&app_config, &config.view).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown view '{}'. Run 'pagina views' to list the available views.",
            config.view
        )
    })?;

    let page_size = config.page_size.unwrap_or(app_config.defaults.page_size);
    let session = build_session(records, view, page_size, config.latency_ms);
    let page = fetch_page(&session, config.filter.as_deref(), config.page)?;

    render_output(
        &config.view,
        &page,
        config.format.into(),
        config.output.as_deref(),
    )
}

/// I/O: Load the record collection from a JSON file
fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records from: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records JSON from: {}", path.display()))
}

fn build_session(
    records: Vec<Record>,
    view: crate::query::CollectionView<Record>,
    page_size: usize,
    latency_ms: u64,
) -> ViewSession<Record> {
    let store = Arc::new(CollectionStore::from_items(records));
    let session = ViewSession::new(store, Arc::new(view), page_size);
    if latency_ms > 0 {
        session.with_latency(Duration::from_millis(latency_ms))
    } else {
        session
    }
}

/// Issue the navigation implied by the flags and resolve the final ticket.
/// Earlier tickets are intentionally left unresolved; only the last issue
/// for a session is ever current.
fn fetch_page(
    session: &ViewSession<Record>,
    filter: Option<&str>,
    page: usize,
) -> Result<Page<Record>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))?;

    let ticket = match filter {
        Some(text) => session.set_filter(text),
        None => session.refresh(),
    };
    let ticket = if page > 1 {
        session.goto_page(page)
    } else {
        ticket
    };

    match rt.block_on(session.resolve(ticket))? {
        FetchOutcome::Applied(page) => Ok(page),
        FetchOutcome::Superseded => anyhow::bail!("Query was superseded by a newer request"),
    }
}

fn render_output(
    view_name: &str,
    page: &Page<Record>,
    format: output::OutputFormat,
    output_file: Option<&Path>,
) -> Result<()> {
    match output_file {
        Some(path) => {
            let content = render_to_buffer(view_name, page, format)?;
            fs::write(path, &content)
                .with_context(|| format!("Failed to write output to: {}", path.display()))?;
        }
        None => {
            let mut writer = output::create_writer(format);
            writer.write_page(view_name, page)?;
        }
    }
    Ok(())
}

fn render_to_buffer(
    view_name: &str,
    page: &Page<Record>,
    format: output::OutputFormat,
) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match format {
        output::OutputFormat::Json => JsonWriter::new(&mut buffer).write_page(view_name, page)?,
        output::OutputFormat::Markdown => {
            MarkdownWriter::new(&mut buffer).write_page(view_name, page)?
        }
        output::OutputFormat::Terminal => {
            TableWriter::new(&mut buffer).write_page(view_name, page)?
        }
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CollectionView;
    use chrono::{TimeZone, Utc};
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn sample_records() -> Vec<Record> {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        vec![
            Record::new(1, "Gato feliz", created).with_engagement(10, 0),
            Record::new(2, "Bom dia grupo", created).with_engagement(5, 0),
            Record::new(3, "Meme novo", created).with_engagement(1, 0),
        ]
    }

    #[test]
    fn fetch_page_resolves_the_requested_page() {
        let session = build_session(sample_records(), CollectionView::new("plain"), 2, 0);
        let page = fetch_page(&session, None, 2).unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Meme novo");
    }

    #[test]
    fn fetch_page_applies_the_filter_before_paging() {
        let view = crate::views::build_view(
            "feed",
            &crate::config::ViewSpec {
                search_fields: vec!["title".to_string()],
                ..Default::default()
            },
        );
        let session = build_session(sample_records(), view, 2, 0);
        let page = fetch_page(&session, Some("gato"), 1).unwrap();

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].title, "Gato feliz");
    }

    #[test]
    fn load_records_reports_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_records(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse records JSON"));
    }

    #[test]
    fn render_to_buffer_emits_json_for_the_json_format() {
        let session = build_session(sample_records(), CollectionView::new("plain"), 10, 0);
        let page = fetch_page(&session, None, 1).unwrap();

        let buffer = render_to_buffer("plain", &page, output::OutputFormat::Json).unwrap();
        let parsed: Page<Record> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.total_items, 3);
    }
}
