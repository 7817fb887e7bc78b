use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::recipes::dto::RecipeDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "difficulty", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    MainCourse,
    Dessert,
    Healthy,
    Breakfast,
    Snack,
    Appetizer,
    Soup,
    Salad,
}

/// Recipe as served to clients: the row itself plus the author's username
/// and review/like aggregates computed in the query.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub image: String,
    pub author_id: i64,
    pub author_username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub average_rating: f64,
    pub review_count: i64,
    pub like_count: i64,
}

const RECIPE_SELECT: &str = r#"
    SELECT r.id, r.title, r.description, r.ingredients, r.instructions,
           r.cook_time, r.servings, r.difficulty, r.category, r.image,
           r.author_id, u.username AS author_username,
           r.created_at, r.updated_at,
           COALESCE(AVG(rv.rating), 0)::float8 AS average_rating,
           COUNT(DISTINCT rv.id) AS review_count,
           COUNT(DISTINCT l.id) AS like_count
    FROM recipes r
    JOIN users u ON u.id = r.author_id
    LEFT JOIN reviews rv ON rv.recipe_id = r.id
    LEFT JOIN likes l ON l.recipe_id = r.id
"#;

pub async fn list(db: &PgPool, limit: i64, offset: i64) -> sqlx::Result<Vec<Recipe>> {
    sqlx::query_as::<_, Recipe>(&format!(
        "{RECIPE_SELECT} GROUP BY r.id, u.username ORDER BY r.created_at DESC LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}

pub async fn find_by_id(db: &PgPool, id: i64) -> sqlx::Result<Option<Recipe>> {
    sqlx::query_as::<_, Recipe>(&format!(
        "{RECIPE_SELECT} WHERE r.id = $1 GROUP BY r.id, u.username"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn exists(db: &PgPool, id: i64) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM recipes WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
}

pub async fn create(db: &PgPool, author_id: i64, draft: &RecipeDraft) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO recipes
            (title, description, ingredients, instructions, cook_time, servings,
             difficulty, category, image, author_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
         RETURNING id",
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.ingredients[..])
    .bind(&draft.instructions[..])
    .bind(draft.cook_time)
    .bind(draft.servings)
    .bind(draft.difficulty)
    .bind(draft.category)
    .bind(&draft.image)
    .bind(author_id)
    .fetch_one(db)
    .await
}

pub async fn update(db: &PgPool, id: i64, draft: &RecipeDraft) -> sqlx::Result<()> {
    sqlx::query(
        "UPDATE recipes
         SET title = $1, description = $2, ingredients = $3, instructions = $4,
             cook_time = $5, servings = $6, difficulty = $7, category = $8,
             image = $9, updated_at = now()
         WHERE id = $10",
    )
    .bind(&draft.title)
    .bind(&draft.description)
    .bind(&draft.ingredients[..])
    .bind(&draft.instructions[..])
    .bind(draft.cook_time)
    .bind(draft.servings)
    .bind(draft.difficulty)
    .bind(draft.category)
    .bind(&draft.image)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
