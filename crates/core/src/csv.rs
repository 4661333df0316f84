//! CSV builder/parser for the menu draft table.
//!
//! Export always emits [`MENU_CSV_COLUMNS`] in order. Import reads column
//! order from the header row, so hand-edited files may reorder or drop
//! columns. Quoting follows RFC 4180: quoted fields may contain commas,
//! newlines and doubled quotes.

use crate::error::CoreError;
use crate::menu::{MenuItem, MenuItemInput, OrderLinksInput, PricesInput, LAST_CHECKED_FORMAT};

/// Column set written by [`build_menu_csv`].
pub const MENU_CSV_COLUMNS: [&str; 12] = [
    "id",
    "name",
    "description",
    "category",
    "prices.doordash",
    "prices.grubhub",
    "orderLinks.doordash",
    "orderLinks.grubhub",
    "tags",
    "image",
    "isActive",
    "lastChecked",
];

/// Separator between tag values inside the `tags` cell.
pub const TAG_SEPARATOR: char = '|';

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Quote a cell if it contains a comma, quote, or newline.
pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn price_cell(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}

fn menu_row(item: &MenuItem) -> Vec<String> {
    let tags: Vec<&str> = item.tags.iter().map(|t| t.as_str()).collect();
    vec![
        item.id.clone(),
        item.name.clone(),
        item.description.clone().unwrap_or_default(),
        item.category.as_str().to_string(),
        price_cell(item.prices.doordash),
        price_cell(item.prices.grubhub),
        item.order_links.doordash.clone().unwrap_or_default(),
        item.order_links.grubhub.clone().unwrap_or_default(),
        tags.join(&TAG_SEPARATOR.to_string()),
        item.image.clone().unwrap_or_default(),
        item.is_active.to_string(),
        item.last_checked
            .map(|d| d.format(LAST_CHECKED_FORMAT).to_string())
            .unwrap_or_default(),
    ]
}

/// Serialize menu items (header first, `\n` between rows, no trailing newline).
pub fn build_menu_csv(items: &[MenuItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    lines.push(MENU_CSV_COLUMNS.join(","));
    for item in items {
        let cells: Vec<String> = menu_row(item).iter().map(|c| csv_escape(c)).collect();
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Split CSV text into records of unescaped cells.
///
/// Line breaks inside quotes belong to the cell. Empty lines are skipped.
pub fn parse_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut line_has_content = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => {
                in_quotes = true;
                line_has_content = true;
            }
            ',' => {
                record.push(std::mem::take(&mut current));
                line_has_content = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if line_has_content {
                    record.push(std::mem::take(&mut current));
                    records.push(std::mem::take(&mut record));
                }
                line_has_content = false;
            }
            other => {
                current.push(other);
                line_has_content = true;
            }
        }
    }

    if line_has_content {
        record.push(current);
        records.push(record);
    }
    records
}

/// Named view over one data row, keyed by the header.
struct Row<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    fn get(&self, column: &str) -> &'a str {
        self.header
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    fn optional(&self, column: &str) -> Option<String> {
        let value = self.get(column);
        (!value.is_empty()).then(|| value.to_string())
    }

    fn price(&self, column: &str, row_number: usize) -> Result<Option<f64>, CoreError> {
        let raw = self.get(column).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<f64>().map(Some).map_err(|_| {
            CoreError::Validation(format!(
                "row {row_number}: {column}: '{raw}' is not a number"
            ))
        })
    }
}

fn row_to_input(row: &Row<'_>, row_number: usize) -> Result<MenuItemInput, CoreError> {
    let tags = row
        .get("tags")
        .split(TAG_SEPARATOR)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    Ok(MenuItemInput {
        id: row.get("id").to_string(),
        name: row.get("name").to_string(),
        description: row.optional("description"),
        category: row.get("category").to_string(),
        prices: PricesInput {
            doordash: row.price("prices.doordash", row_number)?,
            grubhub: row.price("prices.grubhub", row_number)?,
        },
        order_links: OrderLinksInput {
            doordash: row.optional("orderLinks.doordash"),
            grubhub: row.optional("orderLinks.grubhub"),
        },
        tags,
        image: row.optional("image"),
        is_active: Some(row.get("isActive").trim().eq_ignore_ascii_case("true")),
        last_checked: row.optional("lastChecked"),
    })
}

/// Parse and validate every data row.
///
/// Fails on the first invalid row; the error message names its 1-based
/// data row number. Nothing is returned unless every row is valid.
pub fn parse_menu_csv(text: &str) -> Result<Vec<MenuItem>, CoreError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut records = parse_records(text).into_iter();
    let header: Vec<String> = records
        .next()
        .ok_or_else(|| CoreError::Validation("CSV is empty".into()))?
        .into_iter()
        .map(|h| h.trim().to_string())
        .collect();

    records
        .enumerate()
        .map(|(idx, cells)| {
            let row_number = idx + 1;
            let row = Row {
                header: &header,
                cells: &cells,
            };
            row_to_input(&row, row_number)?
                .into_menu_item()
                .map_err(|e| match e {
                    CoreError::Validation(msg) => {
                        CoreError::Validation(format!("row {row_number}: {msg}"))
                    }
                    other => other,
                })
        })
        .collect()
}
