use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Review as served to clients, with the reviewer's username joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub recipe_id: i64,
    pub user_id: i64,
    pub username: String,
    pub rating: i32,
    pub comment: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const REVIEW_SELECT: &str = r#"
    SELECT rv.id, rv.recipe_id, rv.user_id, u.username, rv.rating, rv.comment, rv.created_at
    FROM reviews rv
    JOIN users u ON u.id = rv.user_id
"#;

pub async fn list_for_recipe(db: &PgPool, recipe_id: i64) -> sqlx::Result<Vec<Review>> {
    sqlx::query_as::<_, Review>(&format!(
        "{REVIEW_SELECT} WHERE rv.recipe_id = $1 ORDER BY rv.created_at DESC"
    ))
    .bind(recipe_id)
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Review>> {
    sqlx::query_as::<_, Review>(&format!("{REVIEW_SELECT} WHERE rv.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn create(
    db: &PgPool,
    recipe_id: i64,
    user_id: i64,
    rating: i32,
    comment: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews (recipe_id, user_id, rating, comment)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(recipe_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(db)
    .await
}

pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
