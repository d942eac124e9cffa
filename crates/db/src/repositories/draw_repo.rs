//! Repository for the `draws` table.

use lucky_six_core::draw::Draw;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::draw::DrawRow;

/// Column list for `draws` queries.
const COLUMNS: &str = "\
    id, numbers, colors, sum, high_low, color_counts, \
    winning_colors, created_at";

/// Provides data access for draw results.
pub struct DrawRepo;

impl DrawRepo {
    /// Insert a freshly generated draw. Accepts the pool or an open transaction.
    pub async fn insert<'e, E>(executor: E, draw: &Draw) -> Result<(), sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let numbers: Vec<i32> = draw.numbers.iter().map(|&n| i32::from(n)).collect();
        let colors: Vec<&str> = draw.colors.iter().map(|c| c.as_str()).collect();
        let winning_colors: Vec<&str> = draw.winning_colors.iter().map(|c| c.as_str()).collect();

        sqlx::query(
            "INSERT INTO draws \
                 (id, numbers, colors, sum, high_low, color_counts, winning_colors, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&draw.id)
        .bind(&numbers)
        .bind(&colors)
        .bind(i32::from(draw.sum))
        .bind(draw.high_low.as_str())
        .bind(Json(&draw.color_counts))
        .bind(&winning_colors)
        .bind(draw.created_at)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// The `limit` most recent draws, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<DrawRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM draws ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, DrawRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
