/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Static HTML rendering adapter. Produces a single self-contained file
//! with inline CSS and no external references.

use crate::domain::errors::RenderError;
use crate::domain::styling::{RowStyle, ALERT, OK, WARNING};
use crate::ports::ReportRenderer;
use crate::report::{Panel, ReportDocument, Section, TableBlock};
use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Renderer that writes the report as one static HTML file
pub struct HtmlReportRenderer;

impl HtmlReportRenderer {
    /// Create a new HTML renderer
    pub fn new() -> Self {
        Self
    }

    fn render_html(&self, document: &ReportDocument) -> String {
        let mut html = String::with_capacity(16 * 1024);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(&document.title));
        html.push_str("<style>\n");
        html.push_str(STYLESHEET);
        push_row_style_css(&mut html, &ALERT);
        push_row_style_css(&mut html, &WARNING);
        push_row_style_css(&mut html, &OK);
        html.push_str("</style>\n</head>\n<body>\n");

        let _ = writeln!(html, "<h1>{}</h1>", escape_html(&document.title));
        for section in &document.sections {
            render_section(&mut html, section);
        }
        let _ = writeln!(
            html,
            "<footer>{}</footer>",
            escape_html(&document.footer)
        );
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Default for HtmlReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for HtmlReportRenderer {
    fn render(&self, document: &ReportDocument, output: &Path) -> Result<(), RenderError> {
        let html = self.render_html(document);
        debug!("rendered {} bytes of HTML", html.len());

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| RenderError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        fs::write(output, html).map_err(|source| RenderError::Write {
            path: output.to_path_buf(),
            source,
        })
    }
}

const STYLESHEET: &str = "\
body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; padding: 24px; \
background: #f3f4f6; color: #1f2937; }
h1 { font-size: 1.5em; margin: 0 0 16px; }
h2 { font-size: 1.2em; margin: 24px 0 8px; }
h3 { font-size: 1.05em; margin: 16px 0 8px; }
h4 { font-size: 0.95em; margin: 12px 0 4px; color: #374151; }
.panel { background: #ffffff; border: 1px solid #d1d5db; border-radius: 6px; \
padding: 12px 16px; margin-bottom: 16px; }
table { border-collapse: collapse; width: 100%; margin-bottom: 8px; }
th, td { border: 1px solid #d1d5db; padding: 6px 10px; text-align: left; \
font-size: 0.9em; }
th { background: #e5e7eb; }
td.empty { color: #6b7280; font-style: italic; text-align: center; }
footer { text-align: center; color: #6b7280; font-size: 0.85em; \
margin-top: 24px; }
";

fn push_row_style_css(html: &mut String, style: &RowStyle) {
    let _ = writeln!(
        html,
        "tr.{} td {{ background: {}; color: {}; }}",
        style.class, style.background, style.foreground
    );
}

fn render_section(html: &mut String, section: &Section) {
    let _ = writeln!(html, "<h2>{}</h2>", escape_html(&section.heading));
    for panel in &section.panels {
        render_panel(html, panel);
    }
}

fn render_panel(html: &mut String, panel: &Panel) {
    html.push_str("<div class=\"panel\">\n");
    let _ = writeln!(html, "<h3>{}</h3>", escape_html(&panel.heading));
    for table in &panel.tables {
        render_table(html, table);
    }
    html.push_str("</div>\n");
}

fn render_table(html: &mut String, table: &TableBlock) {
    let _ = writeln!(html, "<h4>{}</h4>", escape_html(&table.heading));
    html.push_str("<table>\n<thead>\n<tr>");
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape_html(column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    if table.rows.is_empty() {
        let _ = writeln!(
            html,
            "<tr><td class=\"empty\" colspan=\"{}\">no data collected</td></tr>",
            table.columns.len().max(1)
        );
    } else {
        for row in &table.rows {
            match table.style_for(row) {
                Some(style) => {
                    let _ = write!(html, "<tr class=\"{}\">", style.class);
                }
                None => html.push_str("<tr>"),
            }
            for cell in &row.cells {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
            html.push_str("</tr>\n");
        }
    }
    html.push_str("</tbody>\n</table>\n");
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{columns, TableRow};
    use tempfile::TempDir;

    fn sample_document() -> ReportDocument {
        ReportDocument {
            title: "Host Health Report: testbox".to_string(),
            sections: vec![Section {
                heading: "Overview".to_string(),
                panels: vec![Panel {
                    heading: "Computer".to_string(),
                    tables: vec![TableBlock::plain(
                        "Computer",
                        columns(&["Field", "Value"]),
                        vec![TableRow::plain(vec![
                            "Manufacturer".to_string(),
                            "Dell & Sons <Ltd>".to_string(),
                        ])],
                    )],
                }],
            }],
            footer: "Generated 2026-08-27 10:00:00 | Host: testbox | User: alice".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("a & b < c > d \"e\" 'f'"),
            "a &amp; b &lt; c &gt; d &quot;e&quot; &#39;f&#39;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_render_escapes_cell_content() {
        let renderer = HtmlReportRenderer::new();
        let html = renderer.render_html(&sample_document());
        assert!(html.contains("Dell &amp; Sons &lt;Ltd&gt;"));
        assert!(!html.contains("<Ltd>"));
    }

    #[test]
    fn test_render_is_self_contained() {
        let renderer = HtmlReportRenderer::new();
        let html = renderer.render_html(&sample_document());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("href="));
        assert!(!html.contains("src="));
    }

    #[test]
    fn test_empty_table_gets_placeholder_row() {
        let mut document = sample_document();
        document.sections[0].panels[0].tables[0].rows.clear();
        let renderer = HtmlReportRenderer::new();
        let html = renderer.render_html(&document);
        assert!(html.contains("colspan=\"2\">no data collected"));
    }

    #[test]
    fn test_styled_row_carries_class() {
        use crate::domain::styling::{disk_rules, USED_PERCENT};

        let mut document = sample_document();
        document.sections[0].panels[0].tables[0] = TableBlock {
            heading: "Disks".to_string(),
            columns: columns(&["Device", "Used %"]),
            rows: vec![TableRow::with_metric(
                vec!["C:".to_string(), "95.00".to_string()],
                USED_PERCENT,
                95.0,
            )],
            style_rules: disk_rules(),
        };
        let renderer = HtmlReportRenderer::new();
        let html = renderer.render_html(&document);
        assert!(html.contains("<tr class=\"alert\">"));
    }

    #[test]
    fn test_render_writes_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("reports").join("out.html");

        let renderer = HtmlReportRenderer::new();
        renderer.render(&sample_document(), &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("Host Health Report: testbox"));
    }

    #[test]
    fn test_create_dir_failure_reports_the_path() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file where a directory is needed").unwrap();
        let output = blocker.join("nested").join("out.html");

        let renderer = HtmlReportRenderer::new();
        let err = renderer.render(&sample_document(), &output).unwrap_err();
        match err {
            RenderError::CreateDir { path, .. } => {
                assert_eq!(path, output.parent().unwrap());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_write_failure_reports_the_path() {
        let dir = TempDir::new().unwrap();

        // The output path is itself a directory, so the write must fail
        let renderer = HtmlReportRenderer::new();
        let err = renderer.render(&sample_document(), dir.path()).unwrap_err();
        match err {
            RenderError::Write { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.html");
        std::fs::write(&output, "stale").unwrap();

        let renderer = HtmlReportRenderer::new();
        renderer.render(&sample_document(), &output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
