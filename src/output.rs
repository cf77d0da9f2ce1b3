//! Renders a [`Page`] of records as a terminal table, JSON, or markdown.

use crate::page::Page;
use crate::record::Record;
use crate::window::PageControl;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use serde_json;
use std::io::Write;

#[derive(Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait PageWriter {
    fn write_page(&mut self, view_name: &str, page: &Page<Record>) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> PageWriter for JsonWriter<W> {
    fn write_page(&mut self, _view_name: &str, page: &Page<Record>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(page)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> PageWriter for MarkdownWriter<W> {
    fn write_page(&mut self, view_name: &str, page: &Page<Record>) -> anyhow::Result<()> {
        self.write_header(view_name, page)?;
        self.write_items(page)?;
        self.write_controls(page)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, view_name: &str, page: &Page<Record>) -> anyhow::Result<()> {
        writeln!(self.writer, "# Query Results: {view_name}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Page {} of {} ({} items total)",
            page.page,
            page.total_pages.max(1),
            page.total_items
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_items(&mut self, page: &Page<Record>) -> anyhow::Result<()> {
        if page.items.is_empty() {
            writeln!(self.writer, "No items on this page.")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "| # | Title | Author | Tags | Likes | Comments | Created |"
        )?;
        writeln!(
            self.writer,
            "|---|-------|--------|------|-------|----------|---------|"
        )?;

        let first = page.item_range().map_or(1, |(start, _)| start);
        for (offset, record) in page.items.iter().enumerate() {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} | {} |",
                first + offset,
                record.title,
                record.author,
                record.tags.join(", "),
                record.likes,
                record.comments,
                record.created_at.format("%Y-%m-%d")
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_controls(&mut self, page: &Page<Record>) -> anyhow::Result<()> {
        let labels = control_labels(page);
        if labels.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "Pages: {}", labels.join(" "))?;
        Ok(())
    }
}

pub struct TableWriter<W: Write> {
    writer: W,
}

impl<W: Write> TableWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> PageWriter for TableWriter<W> {
    fn write_page(&mut self, view_name: &str, page: &Page<Record>) -> anyhow::Result<()> {
        self.write_heading(view_name)?;
        self.write_items(page)?;
        self.write_summary(page)?;
        self.write_controls(page)?;
        Ok(())
    }
}

impl<W: Write> TableWriter<W> {
    fn write_heading(&mut self, view_name: &str) -> anyhow::Result<()> {
        let title = format!("{view_name} results");
        writeln!(self.writer, "{}", title.bold().blue())?;
        writeln!(self.writer, "{}", "=".repeat(title.len()).blue())?;
        Ok(())
    }

    fn write_items(&mut self, page: &Page<Record>) -> anyhow::Result<()> {
        if page.items.is_empty() {
            writeln!(self.writer, "{}", "No items on this page.".yellow())?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                "#", "Title", "Author", "Tags", "Likes", "Comments", "Created",
            ]);

        let first = page.item_range().map_or(1, |(start, _)| start);
        for (offset, record) in page.items.iter().enumerate() {
            table.add_row(vec![
                (first + offset).to_string(),
                record.title.clone(),
                record.author.clone(),
                record.tags.join(", "),
                record.likes.to_string(),
                record.comments.to_string(),
                record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]);
        }

        // Likes and Comments columns
        for index in [4, 5] {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }

        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_summary(&mut self, page: &Page<Record>) -> anyhow::Result<()> {
        match page.item_range() {
            Some((start, end)) => writeln!(
                self.writer,
                "Page {} of {} (items {}-{} of {})",
                page.page,
                page.total_pages.max(1),
                start,
                end,
                page.total_items
            )?,
            None => writeln!(
                self.writer,
                "Page {} of {} ({} items total)",
                page.page,
                page.total_pages.max(1),
                page.total_items
            )?,
        }
        Ok(())
    }

    fn write_controls(&mut self, page: &Page<Record>) -> anyhow::Result<()> {
        let controls = page.controls();
        if controls.is_empty() {
            return Ok(());
        }

        let labels: Vec<String> = controls
            .iter()
            .map(|control| match control {
                PageControl::Page(n) if *n == page.page => {
                    format!("[{n}]").green().bold().to_string()
                }
                other => other.to_string(),
            })
            .collect();
        writeln!(self.writer, "Pages: {}", labels.join(" "))?;
        Ok(())
    }
}

fn control_labels(page: &Page<Record>) -> Vec<String> {
    page.controls()
        .iter()
        .map(|control| match control {
            PageControl::Page(n) if *n == page.page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect()
}

pub fn create_writer_for<W: Write + 'static>(
    format: OutputFormat,
    writer: W,
) -> Box<dyn PageWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TableWriter::new(writer)),
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn PageWriter> {
    create_writer_for(format, std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_page() -> Page<Record> {
        let created = Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap();
        let items = vec![
            Record::new(4, "Gato feliz", created).with_author("ana"),
            Record::new(5, "Bom dia grupo", created).with_author("rui"),
        ];
        Page {
            items,
            page: 2,
            page_size: 2,
            total_items: 10,
            total_pages: 5,
            has_more: true,
        }
    }

    #[test]
    fn json_writer_emits_a_parseable_page() {
        let mut buffer = Vec::new();
        {
            let mut writer = JsonWriter::new(&mut buffer);
            writer.write_page("feed", &sample_page()).unwrap();
        }
        let parsed: Page<Record> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed, sample_page());
    }

    #[test]
    fn markdown_writer_renders_table_and_controls() {
        let mut buffer = Vec::new();
        {
            let mut writer = MarkdownWriter::new(&mut buffer);
            writer.write_page("feed", &sample_page()).unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("# Query Results: feed"));
        assert!(output.contains("Page 2 of 5 (10 items total)"));
        assert!(output.contains("| 3 | Gato feliz | ana |"));
        assert!(output.contains("| 4 | Bom dia grupo | rui |"));
        assert!(output.contains("Pages: 1 [2] 3 4 5"));
    }

    #[test]
    fn markdown_writer_reports_empty_pages() {
        let page = Page {
            items: Vec::<Record>::new(),
            page: 9,
            page_size: 2,
            total_items: 10,
            total_pages: 5,
            has_more: false,
        };
        let mut buffer = Vec::new();
        {
            let mut writer = MarkdownWriter::new(&mut buffer);
            writer.write_page("feed", &page).unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("No items on this page."));
        assert!(!output.contains("| # |"));
    }

    #[test]
    fn table_writer_lists_titles_and_positions() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        {
            let mut writer = TableWriter::new(&mut buffer);
            writer.write_page("feed", &sample_page()).unwrap();
        }
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("feed results"));
        assert!(output.contains("Gato feliz"));
        assert!(output.contains("Bom dia grupo"));
        assert!(output.contains("Page 2 of 5 (items 3-4 of 10)"));
        assert!(output.contains("Pages: 1 [2] 3 4 5"));
        colored::control::unset_override();
    }

    #[test]
    fn control_labels_bracket_the_current_page() {
        let labels = control_labels(&sample_page());
        assert_eq!(labels, vec!["1", "[2]", "3", "4", "5"]);
    }
}
