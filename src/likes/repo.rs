use sqlx::PgPool;

pub async fn exists(db: &PgPool, user_id: i64, recipe_id: i64) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND recipe_id = $2)",
    )
    .bind(user_id)
    .bind(recipe_id)
    .fetch_one(db)
    .await
}

/// Insert a like. The (user_id, recipe_id) unique constraint is the final
/// arbiter against double-likes under concurrent requests.
pub async fn create(db: &PgPool, user_id: i64, recipe_id: i64) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO likes (user_id, recipe_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, user_id: i64, recipe_id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
