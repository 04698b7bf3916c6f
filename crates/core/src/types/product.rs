//! Immutable catalog records.
//!
//! The catalog is an out-of-scope collaborator from the cart's point of
//! view: the cart snapshots what it needs from a [`Product`] at add time
//! and never validates stored product ids against the catalog afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cart::AddRequest;
use super::id::ProductId;
use super::price::Price;

/// An immutable catalog product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Pre-sale price, shown struck through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Sale badge percentage (display only; `price` is already reduced).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    pub rating: f32,
    pub review_count: u32,
    pub image: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
}

impl Product {
    /// Snapshot this product into an add-to-cart request for the chosen
    /// variant. Display metadata and unit price are copied at this point
    /// and not re-fetched later.
    #[must_use]
    pub fn add_request(
        &self,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
    ) -> AddRequest {
        AddRequest {
            product_id: self.id.clone(),
            name: self.name.clone(),
            unit_price: self.price,
            quantity,
            size: size.into(),
            color: color.into(),
            image: self.image.clone(),
        }
    }
}

/// A customer review shown on product pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u32,
    pub name: String,
    pub rating: f32,
    pub verified: bool,
    pub text: String,
    pub date: NaiveDate,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_str(
            r#"{
                "id": "p1",
                "name": "Gradient Graphic T-shirt",
                "price": 145,
                "originalPrice": 242,
                "discount": 40,
                "rating": 4.5,
                "reviewCount": 451,
                "image": "/products/p1.jpg",
                "colors": ["white", "black"],
                "sizes": ["S", "M", "L", "XL"],
                "category": "t-shirts"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let product = product();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.price, Price::from(145));
        assert_eq!(product.original_price, Some(Price::from(242)));
        assert_eq!(product.review_count, 451);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_add_request_snapshots_variant() {
        let request = product().add_request("M", "black", 2);
        assert_eq!(request.product_id.as_str(), "p1");
        assert_eq!(request.unit_price, Price::from(145));
        assert_eq!(request.quantity, 2);
        assert_eq!(request.size, "M");
        assert_eq!(request.color, "black");
        assert_eq!(request.image, "/products/p1.jpg");
    }
}
