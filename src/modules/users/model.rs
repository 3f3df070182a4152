//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`User`] - Public projection of a stored user, never carries the hash
//! - [`UserDocument`] - The full stored record, including `password_hash`
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - Create a new user
//! - [`UpdateUserDto`] - Replace a user's fields, optionally its password
//!
//! # Store inputs
//!
//! - [`NewUser`] - What the store inserts; the password is already hashed
//! - [`UserChanges`] - What the store overwrites on update

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user as returned by the API.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

/// A user exactly as persisted.
///
/// Only the create path hands this out; it is never serialized into a
/// response.
#[derive(FromRow, Debug, Clone, PartialEq, Eq)]
pub struct UserDocument {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

impl UserDocument {
    pub fn to_public(&self) -> User {
        User {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id,
            first_name: doc.first_name,
            last_name: doc.last_name,
            email: doc.email,
        }
    }
}

/// DTO for creating a new user.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(length(max = 30, message = "firstName must be at most 30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 30, message = "lastName must be at most 30 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 32, message = "password must be between 8 and 32 characters"))]
    pub password: String,
}

/// DTO for updating a user.
///
/// Updates replace the record: an omitted `firstName` or `lastName` clears
/// the stored value. The password is only rehashed when supplied.
#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(length(max = 30, message = "firstName must be at most 30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 30, message = "lastName must be at most 30 characters"))]
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 32, message = "password must be between 8 and 32 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
}

/// Field values written by an update. `password_hash: None` keeps the
/// stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
}

/// User fields that can be sorted and filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    FirstName,
    LastName,
    Email,
}

impl UserField {
    /// Accepts the API field names, plus `_id` as an alias for `id`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "id" | "_id" => Some(Self::Id),
            "firstName" => Some(Self::FirstName),
            "lastName" => Some(Self::LastName),
            "email" => Some(Self::Email),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }
}
