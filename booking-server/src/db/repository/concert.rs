//! Concert Repository

use super::RepoResult;
use shared::models::Concert;
use sqlx::SqlitePool;

/// Find all concerts, most recent first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Concert>> {
    let concerts = sqlx::query_as::<_, Concert>(
        "SELECT concert_id, title, date, theatre_id FROM concert ORDER BY date DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(concerts)
}

/// Find concert by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Concert>> {
    let concert = sqlx::query_as::<_, Concert>(
        "SELECT concert_id, title, date, theatre_id FROM concert WHERE concert_id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(concert)
}
