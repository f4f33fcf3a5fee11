use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::age::calculate_age;

/// Wire and storage format for dates of birth
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Four-digit year, month 01-12, day 01-31
static DOB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap()
});

/// Parses a `YYYY-MM-DD` date, rejecting anything the shape check or the
/// calendar would not accept (`2023-02-30`, `2023-2-3`, `20230203`).
pub fn parse_dob(value: &str) -> Option<NaiveDate> {
    if !DOB_PATTERN.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DOB_FORMAT).ok()
}

fn validate_dob(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message("dob is required".into()));
    }
    if parse_dob(value).is_none() {
        return Err(ValidationError::new("invalid_dob")
            .with_message("dob must be a valid date in YYYY-MM-DD format".into()));
    }
    Ok(())
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub dob: NaiveDate,
}

/// DTO for creating a new user
///
/// Missing fields deserialize as empty strings so that they surface as
/// validation failures rather than body parse errors.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CreateUser {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    #[schema(example = "Alice")]
    pub name: String,

    #[validate(custom(function = "validate_dob"))]
    #[schema(example = "1990-05-10", format = Date)]
    pub dob: String,
}

/// DTO for replacing a user's name and date of birth
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct UpdateUser {
    #[validate(length(min = 1, max = 255, message = "name must be between 1 and 255 characters"))]
    #[schema(example = "Alice")]
    pub name: String,

    #[validate(custom(function = "validate_dob"))]
    #[schema(example = "1990-05-10", format = Date)]
    pub dob: String,
}

/// User as returned by the API
///
/// `age` is present on reads and omitted on create/update responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, format = Date, example = "1990-05-10")]
    pub dob: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl UserResponse {
    /// Response without an age
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            dob: user.dob,
            age: None,
        }
    }

    /// Response with the age as of `now`
    pub fn with_age(user: User, now: DateTime<Utc>) -> Self {
        let age = calculate_age(user.dob, now);
        Self {
            age: Some(age),
            ..Self::new(user)
        }
    }
}
