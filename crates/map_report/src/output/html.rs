//! HTML backend for report documents.
use std::fmt::Write;

use crate::output::{Block, Document, Item};

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders every section of `doc` as concatenated HTML fragments, without a
/// surrounding document shell.
pub fn render_html(doc: &Document) -> String {
    let mut out = String::new();
    for section in &doc.sections {
        for block in &section.blocks {
            render_block(block, 0, &mut out);
        }
    }
    out
}

fn render_block(block: &Block, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match block {
        Block::Heading { level, text } => {
            let level = (*level).clamp(1, 6);
            let _ = writeln!(out, "{indent}<h{level}>{}</h{level}>", escape(text));
        }
        Block::Paragraph(text) => {
            let _ = writeln!(out, "{indent}<p>{}</p>", escape(text));
        }
        Block::List(items) => {
            if items.is_empty() {
                return;
            }
            let _ = writeln!(out, "{indent}<ul>");
            for item in items {
                render_item(item, depth + 1, out);
            }
            let _ = writeln!(out, "{indent}</ul>");
        }
    }
}

fn render_item(item: &Item, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<li>{}", escape(&item.text));
    if item.children.is_empty() {
        out.push_str("</li>\n");
        return;
    }
    out.push('\n');
    for child in &item.children {
        render_block(child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent}</li>");
}

/// A complete HTML page wrapping a rendered report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlReport {
    pub title: String,
    pub body: String,
}

impl HtmlReport {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            body: render_html(doc),
        }
    }

    /// Full page markup.
    pub fn to_page(&self) -> String {
        let title = escape(&self.title);
        format!(
            "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n<h1>{title}</h1>\n{}</body>\n</html>\n",
            self.body
        )
    }
}
