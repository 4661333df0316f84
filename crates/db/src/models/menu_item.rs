//! Row model shared by the `menu_items` and `menu_item_drafts` tables.

use chrono::NaiveDate;
use sqlx::FromRow;
use tfe_core::error::StoreError;
use tfe_core::menu::{MenuItem, OrderLinks, Prices, Tag};
use tfe_core::types::Timestamp;

/// A row from `menu_items` or `menu_item_drafts`.
#[derive(Debug, Clone, FromRow)]
pub struct MenuItemRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price_doordash: Option<f64>,
    pub price_grubhub: Option<f64>,
    pub order_link_doordash: Option<String>,
    pub order_link_grubhub: Option<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub last_checked: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = StoreError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let corrupt = |msg: String| StoreError::Corrupt(format!("menu item '{}': {msg}", row.id));
        let category = row.category.parse().map_err(corrupt)?;
        let tags = row
            .tags
            .iter()
            .map(|t| t.parse::<Tag>())
            .collect::<Result<_, _>>()
            .map_err(corrupt)?;

        Ok(MenuItem {
            id: row.id,
            name: row.name,
            description: row.description,
            category,
            prices: Prices {
                doordash: row.price_doordash,
                grubhub: row.price_grubhub,
            },
            order_links: OrderLinks {
                doordash: row.order_link_doordash,
                grubhub: row.order_link_grubhub,
            },
            tags,
            image: row.image,
            is_active: row.is_active,
            last_checked: row.last_checked,
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one.
pub fn into_menu_items(rows: Vec<MenuItemRow>) -> Result<Vec<MenuItem>, StoreError> {
    rows.into_iter().map(MenuItem::try_from).collect()
}
