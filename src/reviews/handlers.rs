use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{guard::ensure_owner, jwt::AuthUser},
    error::ApiError,
    recipes,
    reviews::{
        dto::{ReviewDraft, ReviewPayload},
        repo::{self, Review},
    },
    state::AppState,
};

pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/:id/reviews", get(list_reviews).post(add_review))
        .route("/recipes/:id/reviews/:review_id", delete(delete_review))
}

#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(recipe_id): Path<i64>,
) -> Result<Json<Vec<Review>>, ApiError> {
    if !recipes::repo::exists(&state.db, recipe_id).await? {
        return Err(ApiError::NotFound("recipe not found".into()));
    }
    Ok(Json(repo::list_for_recipe(&state.db, recipe_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<i64>,
    Json(payload): Json<ReviewPayload>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let draft = ReviewDraft::from_payload(payload)?;
    if !recipes::repo::exists(&state.db, recipe_id).await? {
        return Err(ApiError::NotFound("recipe not found".into()));
    }

    let id = repo::create(&state.db, recipe_id, user.id, draft.rating, &draft.comment).await?;
    let review = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("review missing after insert")))?;

    info!(review_id = id, recipe_id, user_id = user.id, "review added");
    Ok((StatusCode::CREATED, Json(review)))
}

/// Authenticate, locate the review, check ownership, then delete.
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path((recipe_id, review_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let review = repo::find_by_id(&state.db, review_id)
        .await?
        .filter(|r| r.recipe_id == recipe_id)
        .ok_or_else(|| ApiError::NotFound("review not found".into()))?;
    ensure_owner(review.user_id, user.id)?;

    repo::delete(&state.db, review_id).await?;
    info!(review_id, user_id = user.id, "review deleted");
    Ok(StatusCode::NO_CONTENT)
}
