pub mod error;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use error::AuthError;
pub use extractors::{AuthenticatedUserId, CurrentUser};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, SigningKey, TokenIssuer, TokenValidator, VerifiedClaims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
///
/// Users log in by name. An `email` field, if sent, is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// The account's user name.
    #[validate(length(min = 1, max = 32))]
    pub name: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired user name for the new account.
    /// Must be between 3 and 32 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Name must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub name: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

impl RegisterRequest {
    /// Trims surrounding whitespace from the name and email before validation.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

/// Response structure after a successful login.
/// Contains the access token and the ID of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The bearer token for subsequent requests.
    pub token: String,
    /// The unique identifier of the authenticated user.
    pub user_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            name: "test_user".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let empty_name_login = LoginRequest {
            name: "".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_name_login.validate().is_err());

        let short_password_login = LoginRequest {
            name: "test_user".to_string(),
            password: "123".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "test_user-123".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let invalid_name_register = RegisterRequest {
            name: "test user!".to_string(), // Contains space and exclamation
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_name_register.validate().is_err());

        let short_name_register = RegisterRequest {
            name: "tu".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(short_name_register.validate().is_err());

        let markup_name_register = RegisterRequest {
            name: "<b>bold</b>".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(markup_name_register.validate().is_err());
    }

    #[test]
    fn test_register_request_normalized_trims_name() {
        let request = RegisterRequest {
            name: "  padded_user ".to_string(),
            email: " padded@example.com ".to_string(),
            password: " keep spaces ".to_string(),
        }
        .normalized();

        assert_eq!(request.name, "padded_user");
        assert_eq!(request.email, "padded@example.com");
        assert_eq!(request.password, " keep spaces ");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_ignores_email_field() {
        let request: LoginRequest = serde_json::from_value(serde_json::json!({
            "name": "test_user",
            "email": "test@example.com",
            "password": "password123"
        }))
        .unwrap();
        assert_eq!(request.name, "test_user");
    }
}
