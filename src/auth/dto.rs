use serde::{Deserialize, Serialize};

use crate::auth::repo::User;

/// Request body for user signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response returned after signup, login, or a /me lookup. The token is
/// null on /me, where the caller already holds one.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
}

impl AuthResponse {
    pub fn from_user(token: Option<String>, user: &User) -> Self {
        Self {
            token,
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    #[test]
    fn me_response_has_null_token() {
        let user = User {
            id: 3,
            username: "chef_sarah".into(),
            email: "sarah@example.com".into(),
            password_hash: "hash".into(),
            full_name: None,
            bio: None,
            profile_image: None,
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(AuthResponse::from_user(None, &user)).expect("serialize");
        assert!(json["token"].is_null());
        assert_eq!(json["user_id"], 3);
        assert_eq!(json["username"], "chef_sarah");
    }
}
