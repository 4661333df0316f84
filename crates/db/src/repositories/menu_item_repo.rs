//! Repository for the `menu_items` (published) and `menu_item_drafts` tables.
//!
//! Both tables share one column set, so every query takes a [`MenuTable`].

use sqlx::PgExecutor;
use tfe_core::menu::MenuItem;

use crate::models::menu_item::MenuItemRow;

/// Column list for both menu tables.
const COLUMNS: &str = "\
    id, name, description, category, price_doordash, price_grubhub, \
    order_link_doordash, order_link_grubhub, tags, image, is_active, \
    last_checked, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTable {
    Published,
    Drafts,
}

impl MenuTable {
    pub fn name(self) -> &'static str {
        match self {
            Self::Published => "menu_items",
            Self::Drafts => "menu_item_drafts",
        }
    }
}

pub struct MenuItemRepo;

impl MenuItemRepo {
    /// All rows ordered by id, optionally only active ones.
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        table: MenuTable,
        active_only: bool,
    ) -> Result<Vec<MenuItemRow>, sqlx::Error> {
        let filter = if active_only { "WHERE is_active = true " } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM {} {filter}ORDER BY id",
            table.name()
        );
        sqlx::query_as::<_, MenuItemRow>(&query)
            .fetch_all(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        table: MenuTable,
        id: &str,
    ) -> Result<Option<MenuItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", table.name());
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_ids<'e, E: PgExecutor<'e>>(
        executor: E,
        table: MenuTable,
        ids: &[String],
    ) -> Result<Vec<MenuItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = ANY($1) ORDER BY id",
            table.name()
        );
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// Insert the item, or overwrite every column of the row with its id.
    pub async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        table: MenuTable,
        item: &MenuItem,
    ) -> Result<MenuItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} \
                 (id, name, description, category, price_doordash, price_grubhub, \
                  order_link_doordash, order_link_grubhub, tags, image, is_active, last_checked) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, \
                 description = EXCLUDED.description, \
                 category = EXCLUDED.category, \
                 price_doordash = EXCLUDED.price_doordash, \
                 price_grubhub = EXCLUDED.price_grubhub, \
                 order_link_doordash = EXCLUDED.order_link_doordash, \
                 order_link_grubhub = EXCLUDED.order_link_grubhub, \
                 tags = EXCLUDED.tags, \
                 image = EXCLUDED.image, \
                 is_active = EXCLUDED.is_active, \
                 last_checked = EXCLUDED.last_checked, \
                 updated_at = now() \
             RETURNING {COLUMNS}",
            table.name()
        );
        let tags: Vec<String> = item.tags.iter().map(|t| t.as_str().to_string()).collect();
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.description.as_deref())
            .bind(item.category.as_str())
            .bind(item.prices.doordash)
            .bind(item.prices.grubhub)
            .bind(item.order_links.doordash.as_deref())
            .bind(item.order_links.grubhub.as_deref())
            .bind(tags)
            .bind(item.image.as_deref())
            .bind(item.is_active)
            .bind(item.last_checked)
            .fetch_one(executor)
            .await
    }
}
