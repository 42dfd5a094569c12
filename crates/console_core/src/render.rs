use std::fmt::Write as _;

use shared::domain::NodeRecord;

use crate::format::{format_created, truncate_revision, DisplayZone};

pub const COLUMNS: [&str; 5] = ["ID", "Service", "Locality", "Created", "Revision"];

pub const LOGO_PATH: &str = "/static/logo.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: String,
    pub service: String,
    pub locality: String,
    pub created: String,
    pub revision: Option<String>,
}

impl NodeRow {
    pub fn from_record(node: &NodeRecord, zone: DisplayZone) -> Self {
        Self {
            id: node.id.to_string(),
            service: node.service.clone(),
            locality: node.locality.clone(),
            created: format_created(node.created.as_ref(), zone),
            revision: truncate_revision(node.revision.as_deref()),
        }
    }

    fn cells(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.service.as_str(),
            self.locality.as_str(),
            self.created.as_str(),
            self.revision.as_deref().unwrap_or_default(),
        ]
    }
}

pub fn rows(nodes: &[NodeRecord], zone: DisplayZone) -> Vec<NodeRow> {
    nodes
        .iter()
        .map(|node| NodeRow::from_record(node, zone))
        .collect()
}

pub fn render_table(nodes: &[NodeRecord], zone: DisplayZone) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"nodes\">\n  <h2>Nodes</h2>\n  <div class=\"list\">\n    <table>\n");
    out.push_str("      <tr id=\"header\">");
    for column in COLUMNS {
        let _ = write!(out, "<th>{column}</th>");
    }
    out.push_str("</tr>\n");

    for row in rows(nodes, zone) {
        let _ = write!(out, "      <tr data-node-id=\"{}\">", escape_html(&row.id));
        for cell in row.cells() {
            let _ = write!(out, "<td>{}</td>", escape_html(cell));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("    </table>\n  </div>\n</div>\n");
    out
}

pub fn render_text_table(nodes: &[NodeRecord], zone: DisplayZone) -> String {
    let rows = rows(nodes, zone);
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_text_line(&mut out, COLUMNS, &widths);
    for row in &rows {
        write_text_line(&mut out, row.cells(), &widths);
    }
    out
}

fn write_text_line(out: &mut String, cells: [&str; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_nav() -> String {
    format!(
        "<div class=\"nav\">\n  <div class=\"title\">\n    <img src=\"{LOGO_PATH}\" alt=\"Logo\" />\n  </div>\n</div>\n"
    )
}

pub fn render_page(title: &str, content: &str) -> String {
    format!(
        "<!doctype html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\" />
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
  <title>{}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; margin: 0; background: #fafafa; }}
    .nav {{ background: #1d2430; padding: 0.6rem 1.5rem; }}
    .nav img {{ height: 2rem; }}
    .nodes {{ max-width: 1100px; margin: 1.5rem auto; }}
    table {{ width: 100%; border-collapse: collapse; background: #fff; }}
    th, td {{ text-align: left; padding: 0.45rem 0.75rem; border-bottom: 1px solid #e2e2e2; }}
    td {{ font-family: ui-monospace, monospace; font-size: 0.92rem; }}
  </style>
</head>
<body>
<div class=\"app\">
{}{}</div>
</body>
</html>
",
        escape_html(title),
        render_nav(),
        content
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
