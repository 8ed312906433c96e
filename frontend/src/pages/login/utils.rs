use crate::api::{ApiError, LoginRequest};

/// Rejects blank input before any request goes out.
pub fn validate_credentials(username: &str, password: &str) -> Result<LoginRequest, ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(LoginRequest {
        username: username.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_rejected() {
        let err = validate_credentials("  ", "secret").unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.error, "Username is required");
        assert_eq!(
            validate_credentials("10001", "").unwrap_err().error,
            "Password is required"
        );
    }

    #[test]
    fn username_is_trimmed_password_kept_verbatim() {
        let request = validate_credentials(" 10001 ", " pass ").unwrap();
        assert_eq!(request.username, "10001");
        assert_eq!(request.password, " pass ");
    }
}
