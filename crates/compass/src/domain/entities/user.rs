//! User - Account owning all goals, tasks and journals

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::Theme;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps
    pub fn new(input: NewUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: input.email,
            name: input.name,
            theme: input.theme,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub theme: Theme,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_email(&self.email)?;
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        Ok(())
    }
}

/// Partial update for a user; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    pub name: Option<String>,
    pub theme: Option<Theme>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name must not be empty"));
            }
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed = email.trim();
    let valid = trimmed
        .split_once('@')
        .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
        .unwrap_or(false);
    if !valid {
        return Err(DomainError::validation(format!("invalid email: {}", email)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let user = NewUser {
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            theme: Theme::default(),
        };
        assert!(user.validate().is_ok());

        let bad = NewUser {
            email: "not-an-email".to_string(),
            name: "Ada".to_string(),
            theme: Theme::default(),
        };
        assert!(bad.validate().is_err());
    }
}
