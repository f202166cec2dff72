//! User-related DTOs.

use chrono::{DateTime, Utc};
use roster_core::{NewUser, PageInfo, User, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or updating a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    #[schema(example = "John Doe")]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "john@example.com")]
    pub email: String,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    #[schema(example = 30)]
    pub age: i32,

    /// An empty string counts as not provided.
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(min = 10, max = 20, message = "Phone must be 10-20 characters"))]
    pub phone: Option<String>,

    /// An empty string counts as not provided.
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 255, message = "Address cannot exceed 255 characters"))]
    pub address: Option<String>,

    /// Left unchanged on update when omitted.
    #[serde(default)]
    pub is_active: Option<bool>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl UserRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            phone: None,
            address: None,
            is_active: None,
        }
    }

    /// Builds the insert shape, defaulting `is_active` to true.
    #[must_use]
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
            age: self.age,
            phone: self.phone,
            address: self.address,
            is_active: self.is_active.unwrap_or(true),
        }
    }

    /// Overwrites the stored fields of `user`.
    ///
    /// `is_active` is only touched when the request carries it.
    pub fn apply_to(self, user: &mut User) {
        user.name = self.name;
        user.email = self.email;
        user.age = self.age;
        user.phone = self.phone;
        user.address = self.address;
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            phone: user.phone,
            address: user.address,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// One page of users plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> UserRequest {
        UserRequest::new("John Doe", "john@example.com", 30)
    }

    #[test]
    fn test_valid_request() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        let mut request = valid();
        request.name = "J".to_string();
        assert!(request.validate().is_err());

        request.name = "x".repeat(100);
        assert!(request.validate().is_ok());

        request.name = "x".repeat(101);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_invalid_email() {
        let mut request = valid();
        request.email = "not-an-email".to_string();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_age_bounds() {
        let mut request = valid();
        request.age = 150;
        assert!(request.validate().is_ok());
        request.age = 151;
        assert!(request.validate().is_err());
        request.age = -1;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_optional_fields_validated_when_present() {
        let mut request = valid();
        request.phone = Some("12345".to_string());
        assert!(request.validate().is_err());

        request.phone = Some("0123456789".to_string());
        request.address = Some("a".repeat(256));
        assert!(request.validate().is_err());

        request.address = Some("1 Main St".to_string());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_phone_and_address_upper_bounds() {
        let mut request = valid();
        request.phone = Some("1".repeat(20));
        assert!(request.validate().is_ok());
        request.phone = Some("1".repeat(21));
        assert!(request.validate().unwrap_err().field_errors().contains_key("phone"));

        request.phone = None;
        request.address = Some("a".repeat(255));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_optional_strings_are_absent() {
        let request: UserRequest = serde_json::from_str(
            r#"{"name":"John","email":"john@example.com","age":30,"phone":"","address":""}"#,
        )
        .unwrap();
        assert!(request.phone.is_none());
        assert!(request.address.is_none());
        assert!(request.is_active.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_into_new_user_defaults_active() {
        assert!(valid().into_new_user().is_active);

        let mut inactive = valid();
        inactive.is_active = Some(false);
        assert!(!inactive.into_new_user().is_active);
    }

    #[test]
    fn test_apply_to_keeps_active_when_omitted() {
        let mut user = valid()
            .into_new_user()
            .with_active(false)
            .into_user(UserId::new(1), Utc::now());

        let mut request = UserRequest::new("John Updated", "john@example.com", 31);
        request.phone = None;
        request.apply_to(&mut user);
        assert_eq!(user.name, "John Updated");
        assert_eq!(user.age, 31);
        assert!(!user.is_active);

        let mut request = UserRequest::new("John Updated", "john@example.com", 31);
        request.is_active = Some(true);
        request.apply_to(&mut user);
        assert!(user.is_active);
    }

    #[test]
    fn test_response_emits_absent_optionals_as_null() {
        let user = valid().into_new_user().into_user(UserId::new(1), Utc::now());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["id"], 1);
        assert!(json.get("phone").is_some_and(serde_json::Value::is_null));
        assert!(json.get("address").is_some_and(serde_json::Value::is_null));
        assert!(json.get("deleted_at").is_none());
    }
}
