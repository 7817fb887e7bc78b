use crate::error::ApiError;

/// Ownership check for mutations on user-owned resources. Runs after
/// authentication and resource lookup, so a failure here always means
/// "exists, but not yours": Forbidden, never NotFound.
pub fn ensure_owner(owner_id: i64, acting_user_id: i64) -> Result<(), ApiError> {
    if owner_id == acting_user_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "you can only modify your own resources".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_is_authorized() {
        assert!(ensure_owner(1, 1).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = ensure_owner(1, 2).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
