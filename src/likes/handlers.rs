use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    likes::repo,
    recipes,
    state::AppState,
};

pub fn like_routes() -> Router<AppState> {
    Router::new().route(
        "/recipes/:id/like",
        post(like_recipe).delete(unlike_recipe).get(check_liked),
    )
}

#[instrument(skip(state))]
pub async fn like_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !recipes::repo::exists(&state.db, recipe_id).await? {
        return Err(ApiError::NotFound("recipe not found".into()));
    }
    if repo::exists(&state.db, user.id, recipe_id).await? {
        return Err(ApiError::Conflict("recipe already liked".into()));
    }

    repo::create(&state.db, user.id, recipe_id).await?;
    info!(recipe_id, user_id = user.id, "recipe liked");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn unlike_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let deleted = repo::delete(&state.db, user.id, recipe_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("recipe not liked".into()));
    }
    info!(recipe_id, user_id = user.id, "recipe unliked");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn check_liked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
) -> Result<Json<bool>, ApiError> {
    Ok(Json(repo::exists(&state.db, user.id, recipe_id).await?))
}
