//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::Error;

/// A validated category name between 1 and [CategoryName::MAX_LENGTH] characters long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
#[serde(try_from = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// The maximum number of characters in a category name.
    pub const MAX_LENGTH: usize = 100;

    /// Create a category name.
    ///
    /// The name is stored exactly as given, including surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::ValidationError] if `name` is
    /// empty or longer than [CategoryName::MAX_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let length = name.chars().count();

        if length == 0 || length > Self::MAX_LENGTH {
            Err(Error::ValidationError(format!(
                "category name must be between 1 and {} characters, got {length}",
                Self::MAX_LENGTH
            )))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string satisfies the length bounds,
    /// e.g. because it was read back from the database.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = i64;

/// A named group of products (e.g., 'Drinks', 'Snacks').
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
pub struct Category {
    /// Assigned by the database on creation and never changed.
    pub id: CategoryId,
    /// Unique across all categories.
    pub name: CategoryName,
}

impl Category {
    /// Apply a partial update, leaving fields that are absent from `update` unchanged.
    pub fn apply(self, update: CategoryUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.unwrap_or(self.name),
        }
    }
}

/// Request body for creating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewCategory {
    /// Must not already be used by another category.
    pub name: CategoryName,
}

/// Request body for updating a category.
///
/// A missing or `null` name means "leave the name as it is".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryUpdate {
    /// The new name, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CategoryName>,
}
