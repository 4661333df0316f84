//! Repository for the `hero_slides` table.

use sqlx::PgExecutor;
use tfe_core::hero::NewHeroSlide;
use tfe_core::types::DbId;

use crate::models::hero_slide::HeroSlideRow;

const COLUMNS: &str = "id, src, alt, attribution, position, created_at, updated_at";

pub struct HeroSlideRepo;

impl HeroSlideRepo {
    /// Slides in display order.
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<HeroSlideRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hero_slides ORDER BY position, id");
        sqlx::query_as::<_, HeroSlideRow>(&query)
            .fetch_all(executor)
            .await
    }

    /// Insert at `max(position) + 1`, or 0 for the first slide.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        slide: &NewHeroSlide,
    ) -> Result<HeroSlideRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO hero_slides (src, alt, attribution, position) \
             SELECT $1, $2, $3, COALESCE(MAX(position) + 1, 0) FROM hero_slides \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HeroSlideRow>(&query)
            .bind(&slide.src)
            .bind(&slide.alt)
            .bind(slide.attribution.as_deref())
            .fetch_one(executor)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hero_slides WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_position<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
        position: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE hero_slides SET position = $2, updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(position)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
