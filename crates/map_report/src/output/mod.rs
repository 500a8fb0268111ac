//! Structured report documents and their renderers.
//!
//! Generators build a tree of [`Block`]s; [`html`] and [`tabular`] turn the same tree
//! into an HTML fragment or into per-category tables. Every [`Item`] may carry
//! [`Row`]s naming the table they belong to, which only the tabular backend reads.
pub mod container;
pub mod html;
pub mod tabular;

pub use container::{HeadedList, HeadedMap};
pub use html::{render_html, HtmlReport};
pub use tabular::{TableKey, TabularReport};

/// Formats `value` with at most `max_digits` fraction digits, trimming trailing zeros.
pub fn format_decimal(value: f64, max_digits: usize) -> String {
    let mut out = format!("{:.*}", max_digits, value);
    if out.contains('.') {
        let trimmed = out.trim_end_matches('0').trim_end_matches('.').len();
        out.truncate(trimmed);
    }
    if out == "-0" {
        out = "0".to_owned();
    }
    out
}

/// One node of the report tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    List(Vec<Item>),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }
}

/// A list entry: a line of text, optional nested blocks, and the table rows for the
/// fixtures it describes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    pub text: String,
    pub children: Vec<Block>,
    pub rows: Vec<Row>,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            children: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_child(mut self, block: Block) -> Self {
        self.children.push(block);
        self
    }

    /// Appends `item` as a nested list entry, if any.
    pub fn push_item(&mut self, item: Option<Item>) {
        if let Some(item) = item {
            self.push_nested(item);
        }
    }

    /// Appends `item` to the trailing nested list, starting one if needed.
    pub fn push_nested(&mut self, item: Item) {
        match self.children.last_mut() {
            Some(Block::List(items)) => items.push(item),
            _ => self.children.push(Block::List(vec![item])),
        }
    }

    /// Walks this item and all nested items depth-first.
    pub fn visit<'s>(&'s self, f: &mut impl FnMut(&'s Item)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }
}

impl Block {
    /// Walks every item under this block depth-first.
    pub fn visit<'s>(&'s self, f: &mut impl FnMut(&'s Item)) {
        if let Block::List(items) = self {
            for item in items {
                item.visit(f);
            }
        }
    }
}

/// The report tables the tabular backend can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Fortresses,
    Units,
    Workers,
    Towns,
    Villages,
    Explorables,
    Harvestables,
    Animals,
    Immortals,
    Notes,
    Equipment,
    Resources,
    Other,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Fortresses => "fortresses",
            Table::Units => "units",
            Table::Workers => "workers",
            Table::Towns => "towns",
            Table::Villages => "villages",
            Table::Explorables => "explorables",
            Table::Harvestables => "harvestables",
            Table::Animals => "animals",
            Table::Immortals => "immortals",
            Table::Notes => "notes",
            Table::Equipment => "equipment",
            Table::Resources => "resources",
            Table::Other => "other",
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Fortresses => &["distance", "location", "owner", "name"],
            Table::Units => &["distance", "location", "owner", "kind", "name"],
            Table::Workers => &["distance", "location", "name", "race", "jobs"],
            Table::Towns => &[
                "distance", "location", "owner", "kind", "size", "status", "name",
            ],
            Table::Villages => &["distance", "location", "owner", "race", "status", "name"],
            Table::Explorables => &["distance", "location", "kind", "detail"],
            Table::Harvestables => &["distance", "location", "category", "kind", "description"],
            Table::Animals => &["distance", "location", "kind", "population", "status"],
            Table::Immortals => &["distance", "location", "kind"],
            Table::Notes => &["distance", "location", "turn", "text"],
            Table::Equipment => &["distance", "location", "kind", "count"],
            Table::Resources => &[
                "distance", "location", "kind", "contents", "quantity", "created",
            ],
            Table::Other => &["distance", "location", "description"],
        }
    }
}

/// A table row attached to a rendered item.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub table: Table,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new<I, S>(table: Table, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}

/// Output of one generator pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// Name of the generator that produced the section.
    pub name: &'static str,
    pub blocks: Vec<Block>,
}

/// A complete report: sections in pass order.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Appends a section, skipping it if it has no content.
    pub fn push_section(&mut self, name: &'static str, blocks: Vec<Block>) {
        if !blocks.is_empty() {
            self.sections.push(Section { name, blocks });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Walks every item in the document depth-first.
    pub fn visit<'s>(&'s self, mut f: impl FnMut(&'s Item)) {
        for section in &self.sections {
            for block in &section.blocks {
                block.visit(&mut f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_decimal_trims_trailing_zeros() {
        assert_eq!(format_decimal(2.0, 2), "2");
        assert_eq!(format_decimal(2.5, 2), "2.5");
        assert_eq!(format_decimal(1.0 / 3.0, 2), "0.33");
        assert_eq!(format_decimal(2.999, 2), "3");
        assert_eq!(format_decimal(-0.001, 2), "0");
        assert_eq!(format_decimal(40.0, 0), "40");
    }

    #[test]
    fn push_nested_reuses_trailing_list() {
        let mut item = Item::new("parent");
        item.push_nested(Item::new("a"));
        item.push_nested(Item::new("b"));
        item.push_item(None);
        assert_eq!(item.children.len(), 1);
        assert!(matches!(&item.children[0], Block::List(items) if items.len() == 2));
    }

    #[test]
    fn document_skips_empty_sections() {
        let mut doc = Document::new("t");
        doc.push_section("empty", Vec::new());
        assert!(doc.is_empty());
        doc.push_section("full", vec![Block::paragraph("x")]);
        assert_eq!(doc.sections.len(), 1);
    }

    #[test]
    fn visit_reaches_nested_items() {
        let nested = Item::new("child").with_row(Row::new(Table::Workers, ["1"]));
        let parent = Item::new("parent").with_child(Block::List(vec![nested]));
        let mut doc = Document::new("t");
        doc.push_section("s", vec![Block::List(vec![parent])]);
        let mut texts = Vec::new();
        doc.visit(|item| texts.push(item.text.as_str()));
        assert_eq!(texts, vec!["parent", "child"]);
    }

    #[test]
    fn every_table_has_distance_and_location_columns() {
        for table in [Table::Fortresses, Table::Notes, Table::Other, Table::Resources] {
            assert_eq!(&table.columns()[..2], &["distance", "location"]);
        }
    }
}
