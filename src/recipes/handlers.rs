use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{guard::ensure_owner, jwt::AuthUser},
    error::ApiError,
    recipes::{
        dto::{Pagination, RecipeDraft, RecipePayload},
        repo::{self, Recipe},
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(create_recipe))
        .route("/recipes/:id", axum::routing::put(update_recipe).delete(delete_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(repo::list(&state.db, p.limit, p.offset).await?))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>, ApiError> {
    repo::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("recipe not found".into()))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RecipePayload>,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let draft = RecipeDraft::from_payload(payload)?;
    let id = repo::create(&state.db, user.id, &draft).await?;
    let recipe = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("recipe missing after insert")))?;

    info!(recipe_id = id, user_id = user.id, "recipe created");
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Authenticate, locate, check ownership, then apply the merge, in that
/// fixed order.
#[instrument(skip(state, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<RecipePayload>,
) -> Result<Json<Recipe>, ApiError> {
    let existing = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("recipe not found".into()))?;
    ensure_owner(existing.author_id, user.id)?;

    let draft = RecipeDraft::merged(payload, &existing)?;
    repo::update(&state.db, id, &draft).await?;

    let recipe = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("recipe missing after update")))?;

    info!(recipe_id = id, user_id = user.id, "recipe updated");
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("recipe not found".into()))?;
    ensure_owner(existing.author_id, user.id)?;

    repo::delete(&state.db, id).await?;
    info!(recipe_id = id, user_id = user.id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
