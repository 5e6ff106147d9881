use isg_core::Reading;
use scraper::{ElementRef, Html, Selector};

use crate::EngineError;

/// CSS selectors describing where readings live in an ISG page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub table: String,
    pub group: String,
    pub row: String,
    pub key: String,
    pub value: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            table: "form#werte table.info tbody".to_string(),
            group: "th".to_string(),
            row: "tr.even, tr.odd".to_string(),
            key: "td.key".to_string(),
            value: "td.value".to_string(),
        }
    }
}

/// Walks info tables and yields one `Reading` per data row, in document order.
#[derive(Debug, Clone)]
pub struct TableWalker {
    table: Selector,
    group: Selector,
    row: Selector,
    key: Selector,
    value: Selector,
}

impl TableWalker {
    pub fn new(layout: &TableLayout) -> Result<Self, EngineError> {
        Ok(Self {
            table: compile(&layout.table)?,
            group: compile(&layout.group)?,
            row: compile(&layout.row)?,
            key: compile(&layout.key)?,
            value: compile(&layout.value)?,
        })
    }

    /// Lazily walks `document`. Rows without a key cell are skipped; a
    /// missing value cell yields an empty raw value.
    pub fn walk<'a>(&'a self, document: &'a Html) -> impl Iterator<Item = Reading> + 'a {
        document.select(&self.table).flat_map(move |table| {
            let group = cell_text(table, &self.group).unwrap_or_default();
            table.select(&self.row).filter_map(move |row| {
                let key = cell_text(row, &self.key)?;
                let raw = cell_text(row, &self.value).unwrap_or_default();
                Some(Reading {
                    group: group.clone(),
                    key,
                    raw,
                })
            })
        })
    }

    pub fn readings(&self, html: &str) -> Vec<Reading> {
        let document = Html::parse_document(html);
        self.walk(&document).collect()
    }
}

fn compile(selector: &str) -> Result<Selector, EngineError> {
    Selector::parse(selector).map_err(|err| EngineError::Selector {
        selector: selector.to_string(),
        message: err.to_string(),
    })
}

fn cell_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|cell| cell.text().collect::<String>().trim().to_string())
}
