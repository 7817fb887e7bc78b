use serde::Deserialize;

use crate::error::ApiError;

/// Incoming review body.
#[derive(Debug, Deserialize)]
pub struct ReviewPayload {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

/// Validated review fields.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub rating: i32,
    pub comment: String,
}

impl ReviewDraft {
    pub fn from_payload(payload: ReviewPayload) -> Result<Self, ApiError> {
        let rating = match payload.rating {
            Some(r) if (1..=5).contains(&r) => r,
            _ => {
                return Err(ApiError::Validation(
                    "rating must be between 1 and 5".into(),
                ))
            }
        };
        let comment = payload
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("comment is required".into()))?;
        Ok(Self { rating, comment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ratings_in_range() {
        for rating in 1..=5 {
            let draft = ReviewDraft::from_payload(ReviewPayload {
                rating: Some(rating),
                comment: Some("great recipe".into()),
            })
            .expect("valid payload");
            assert_eq!(draft.rating, rating);
        }
    }

    #[test]
    fn rejects_out_of_range_or_missing_ratings() {
        for rating in [Some(0), Some(6), Some(-1), None] {
            let result = ReviewDraft::from_payload(ReviewPayload {
                rating,
                comment: Some("great recipe".into()),
            });
            assert!(matches!(result, Err(ApiError::Validation(_))));
        }
    }

    #[test]
    fn rejects_blank_comments() {
        let result = ReviewDraft::from_payload(ReviewPayload {
            rating: Some(4),
            comment: Some("   ".into()),
        });
        assert!(result.is_err());
        let result = ReviewDraft::from_payload(ReviewPayload {
            rating: Some(4),
            comment: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn trims_comments() {
        let draft = ReviewDraft::from_payload(ReviewPayload {
            rating: Some(5),
            comment: Some("  loved it  ".into()),
        })
        .expect("valid payload");
        assert_eq!(draft.comment, "loved it");
    }
}
