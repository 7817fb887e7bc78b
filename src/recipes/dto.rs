use serde::Deserialize;

use crate::error::ApiError;
use crate::recipes::repo::{Category, Difficulty, Recipe};

/// Fallback image shown for recipes submitted without one.
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1546554137-f86b9593a222?w=800&q=80&auto=format&fit=crop";

/// Incoming recipe body for both create and update. Every field is optional
/// at the wire level; create requires the core fields, update keeps the
/// stored value for anything absent.
#[derive(Debug, Default, Deserialize)]
pub struct RecipePayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub image: Option<String>,
}

/// Fully-validated recipe fields, ready to persist.
#[derive(Debug, Clone)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: i32,
    pub servings: i32,
    pub difficulty: Option<Difficulty>,
    pub category: Option<Category>,
    pub image: String,
}

impl RecipeDraft {
    /// Validate a create payload. Missing lists become empty, a missing or
    /// blank image gets the server default.
    pub fn from_payload(payload: RecipePayload) -> Result<Self, ApiError> {
        let title = required_text(payload.title, "title is required")?;
        let description = required_text(payload.description, "description is required")?;
        let cook_time = required_positive(payload.cook_time, "cook time must be positive")?;
        let servings = required_positive(payload.servings, "servings must be positive")?;
        let image = payload
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_IMAGE)
            .to_string();

        Ok(Self {
            title,
            description,
            ingredients: payload.ingredients.unwrap_or_default(),
            instructions: payload.instructions.unwrap_or_default(),
            cook_time,
            servings,
            difficulty: payload.difficulty,
            category: payload.category,
            image,
        })
    }

    /// Merge an update payload over the stored recipe: any absent field
    /// keeps its previous value, any present field is validated as on
    /// create. One policy for every field.
    pub fn merged(payload: RecipePayload, existing: &Recipe) -> Result<Self, ApiError> {
        let filled = RecipePayload {
            title: payload.title.or_else(|| Some(existing.title.clone())),
            description: payload
                .description
                .or_else(|| Some(existing.description.clone())),
            ingredients: payload
                .ingredients
                .or_else(|| Some(existing.ingredients.clone())),
            instructions: payload
                .instructions
                .or_else(|| Some(existing.instructions.clone())),
            cook_time: payload.cook_time.or(Some(existing.cook_time)),
            servings: payload.servings.or(Some(existing.servings)),
            difficulty: payload.difficulty.or(existing.difficulty),
            category: payload.category.or(existing.category),
            image: payload.image.or_else(|| Some(existing.image.clone())),
        };
        Self::from_payload(filled)
    }
}

fn required_text(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Validation(message.into()))
}

fn required_positive(value: Option<i32>, message: &str) -> Result<i32, ApiError> {
    match value {
        Some(v) if v > 0 => Ok(v),
        _ => Err(ApiError::Validation(message.into())),
    }
}

/// Query parameters for recipe listing.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn full_payload() -> RecipePayload {
        RecipePayload {
            title: Some("Shakshuka".into()),
            description: Some("Eggs poached in spiced tomato sauce".into()),
            ingredients: Some(vec!["eggs".into(), "tomatoes".into()]),
            instructions: Some(vec!["simmer sauce".into(), "add eggs".into()]),
            cook_time: Some(25),
            servings: Some(2),
            difficulty: Some(Difficulty::Easy),
            category: Some(Category::Breakfast),
            image: Some("https://example.com/shakshuka.jpg".into()),
        }
    }

    fn stored_recipe() -> Recipe {
        Recipe {
            id: 1,
            title: "Shakshuka".into(),
            description: "Eggs poached in spiced tomato sauce".into(),
            ingredients: vec!["eggs".into()],
            instructions: vec!["cook".into()],
            cook_time: 25,
            servings: 2,
            difficulty: Some(Difficulty::Easy),
            category: Some(Category::Breakfast),
            image: "https://example.com/shakshuka.jpg".into(),
            author_id: 1,
            author_username: "chef_sarah".into(),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
            average_rating: 0.0,
            review_count: 0,
            like_count: 0,
        }
    }

    #[test]
    fn create_accepts_a_full_payload() {
        let draft = RecipeDraft::from_payload(full_payload()).expect("valid payload");
        assert_eq!(draft.title, "Shakshuka");
        assert_eq!(draft.ingredients.len(), 2);
    }

    #[test]
    fn create_requires_title_and_description() {
        let mut p = full_payload();
        p.title = None;
        assert!(matches!(
            RecipeDraft::from_payload(p),
            Err(ApiError::Validation(_))
        ));

        let mut p = full_payload();
        p.description = Some("   ".into());
        assert!(RecipeDraft::from_payload(p).is_err());
    }

    #[test]
    fn create_requires_positive_cook_time_and_servings() {
        let mut p = full_payload();
        p.cook_time = Some(0);
        assert!(RecipeDraft::from_payload(p).is_err());

        let mut p = full_payload();
        p.servings = None;
        assert!(RecipeDraft::from_payload(p).is_err());
    }

    #[test]
    fn create_defaults_lists_and_image() {
        let mut p = full_payload();
        p.ingredients = None;
        p.instructions = None;
        p.image = Some("  ".into());
        let draft = RecipeDraft::from_payload(p).expect("valid payload");
        assert!(draft.ingredients.is_empty());
        assert!(draft.instructions.is_empty());
        assert_eq!(draft.image, DEFAULT_IMAGE);
    }

    #[test]
    fn update_preserves_absent_fields() {
        let payload = RecipePayload {
            title: Some("Shakshuka Deluxe".into()),
            ..Default::default()
        };
        let draft = RecipeDraft::merged(payload, &stored_recipe()).expect("valid merge");
        assert_eq!(draft.title, "Shakshuka Deluxe");
        assert_eq!(draft.description, "Eggs poached in spiced tomato sauce");
        assert_eq!(draft.difficulty, Some(Difficulty::Easy));
        assert_eq!(draft.category, Some(Category::Breakfast));
        assert_eq!(draft.image, "https://example.com/shakshuka.jpg");
    }

    #[test]
    fn update_replaces_provided_fields() {
        let payload = RecipePayload {
            difficulty: Some(Difficulty::Hard),
            ingredients: Some(vec![]),
            ..Default::default()
        };
        let draft = RecipeDraft::merged(payload, &stored_recipe()).expect("valid merge");
        assert_eq!(draft.difficulty, Some(Difficulty::Hard));
        assert!(draft.ingredients.is_empty());
    }

    #[test]
    fn update_still_validates_provided_fields() {
        let payload = RecipePayload {
            cook_time: Some(-5),
            ..Default::default()
        };
        assert!(RecipeDraft::merged(payload, &stored_recipe()).is_err());
    }

    #[test]
    fn enum_wire_format_is_screaming_snake_case() {
        let json = serde_json::to_string(&Category::MainCourse).expect("serialize");
        assert_eq!(json, r#""MAIN_COURSE""#);
        let parsed: Difficulty = serde_json::from_str(r#""EASY""#).expect("deserialize");
        assert_eq!(parsed, Difficulty::Easy);
    }
}
