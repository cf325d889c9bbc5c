use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl CreateUserRequest {
    /// Validates the request and builds the user with a fresh id
    pub fn into_user(self) -> AppResult<User> {
        let email = self.email.trim().to_lowercase();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(AppError::InvalidInput(format!(
                "Invalid email address: {}",
                self.email
            )));
        }

        Ok(User {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let user = CreateUserRequest {
            name: " Ada ".to_string(),
            email: "Ada@Example.org".to_string(),
        }
        .into_user()
        .unwrap();
        assert_eq!(user.email, "ada@example.org");
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["", "ada", "@example.org", "ada@localhost"] {
            let result = CreateUserRequest {
                name: "Ada".to_string(),
                email: email.to_string(),
            }
            .into_user();
            assert!(matches!(result, Err(AppError::InvalidInput(_))), "{email}");
        }
    }
}
