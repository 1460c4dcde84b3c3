//! Core product domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{Error, category::CategoryId};

/// A validated product name between 1 and [ProductName::MAX_LENGTH] characters long.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash, ToSchema)]
#[serde(try_from = "String")]
pub struct ProductName(String);

impl ProductName {
    /// The maximum number of characters in a product name.
    pub const MAX_LENGTH: usize = 120;

    /// Create a product name.
    ///
    /// The name is stored exactly as given, including surrounding whitespace.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::ValidationError] if `name` is
    /// empty or longer than [ProductName::MAX_LENGTH] characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let length = name.chars().count();

        if length == 0 || length > Self::MAX_LENGTH {
            Err(Error::ValidationError(format!(
                "product name must be between 1 and {} characters, got {length}",
                Self::MAX_LENGTH
            )))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string satisfies the length bounds.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProductName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProductName::new(&value)
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative, finite price.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64")]
pub struct Price(f64);

impl Price {
    /// Create a price.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::ValidationError] if `value` is
    /// negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self, Error> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(Error::ValidationError(format!(
                "price must be a number greater than or equal to 0, got {value}"
            )))
        }
    }

    /// Create a price without validation.
    ///
    /// The caller should ensure that `value` is finite and not negative.
    pub fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The price as a plain number.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

/// Database identifier for a product.
pub type ProductId = i64;

/// A priced item that belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the database on creation and never changed.
    pub id: ProductId,
    /// The product's display name.
    pub name: ProductName,
    /// The unit price.
    pub price: Price,
    /// The category the product belongs to. It always refers to an existing category.
    pub category_id: CategoryId,
}

impl Product {
    /// Apply a partial update, leaving fields that are absent from `update` unchanged.
    pub fn apply(self, update: ProductUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.unwrap_or(self.name),
            price: update.price.unwrap_or(self.price),
            category_id: update.category_id.unwrap_or(self.category_id),
        }
    }
}

/// Request body for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewProduct {
    /// The product's display name.
    pub name: ProductName,
    /// The unit price.
    pub price: Price,
    /// Must refer to an existing category.
    pub category_id: CategoryId,
}

/// Request body for updating a product.
///
/// Each field is applied independently; a missing or `null` field leaves the
/// stored value as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    /// The new name, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ProductName>,
    /// The new price, if it should change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    /// The category to move the product to. It must exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}



#[cfg(test)]
mod product_update_tests {
    use serde_json::json;

    use crate::product::{Price, Product, ProductName, ProductUpdate};

    fn cola() -> Product {
        Product {
            id: 1,
            name: ProductName::new_unchecked("Cola"),
            price: Price::new_unchecked(2.5),
            category_id: 1,
        }
    }

    #[test]
    fn price_only_update_leaves_other_fields_unchanged() {
        let update: ProductUpdate = serde_json::from_value(json!({ "price": 3.0 })).unwrap();

        let updated = cola().apply(update);

        assert_eq!(
            updated,
            Product {
                price: Price::new_unchecked(3.0),
                ..cola()
            }
        );
    }

    #[test]
    fn null_fields_leave_product_unchanged() {
        let update: ProductUpdate = serde_json::from_value(json!({
            "name": null,
            "price": null,
            "category_id": null,
        }))
        .unwrap();

        assert_eq!(cola().apply(update), cola());
    }

    #[test]
    fn all_fields_are_applied() {
        let update = ProductUpdate {
            name: Some(ProductName::new_unchecked("Lemonade")),
            price: Some(Price::new_unchecked(1.0)),
            category_id: Some(2),
        };

        let updated = cola().apply(update);

        assert_eq!(
            updated,
            Product {
                id: 1,
                name: ProductName::new_unchecked("Lemonade"),
                price: Price::new_unchecked(1.0),
                category_id: 2,
            }
        );
    }

    #[test]
    fn negative_price_is_rejected_when_parsing() {
        let result = serde_json::from_value::<ProductUpdate>(json!({ "price": -1 }));

        assert!(result.is_err());
    }
}
