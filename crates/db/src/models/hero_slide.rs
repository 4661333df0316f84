use sqlx::FromRow;
use tfe_core::hero::HeroSlide;
use tfe_core::types::{DbId, Timestamp};

/// A row from the `hero_slides` table.
#[derive(Debug, Clone, FromRow)]
pub struct HeroSlideRow {
    pub id: DbId,
    pub src: String,
    pub alt: String,
    pub attribution: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<HeroSlideRow> for HeroSlide {
    fn from(row: HeroSlideRow) -> Self {
        Self {
            id: row.id,
            src: row.src,
            alt: row.alt,
            attribution: row.attribution,
            position: row.position,
        }
    }
}
