use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog entry.
///
/// # Monetary Values
///
/// `price` is held as a `rust_decimal::Decimal`, so the stored value is
/// exact. On the wire it is a plain JSON number produced through `f64`, which
/// rounds prices beyond roughly 15 significant digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier, never changes after creation
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Build a product from validated input and a freshly assigned id.
    pub fn from_draft(id: impl Into<String>, draft: ProductDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            description: draft.description.unwrap_or_default(),
            price: draft.price,
            category: draft.category,
            in_stock: draft.in_stock.unwrap_or_else(default_in_stock),
        }
    }

    /// Overwrite the fields present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(in_stock) = changes.in_stock {
            self.in_stock = in_stock;
        }
    }
}

/// Request body for creating or replacing a product.
///
/// Every field is optional so that a missing field can be reported as a
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub in_stock: Option<bool>,
}

/// A payload that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: String,
    pub in_stock: Option<bool>,
}

/// Partial update applied to a stored product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl From<ProductDraft> for ProductChanges {
    fn from(draft: ProductDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: draft.description,
            price: Some(draft.price),
            category: Some(draft.category),
            in_stock: draft.in_stock,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "Desk".to_string(),
            description: None,
            price: Decimal::from(150),
            category: "furniture".to_string(),
            in_stock: None,
        }
    }

    #[test]
    fn test_from_draft_defaults() {
        let product = Product::from_draft("abc", draft());

        assert_eq!(product.id, "abc");
        assert_eq!(product.description, "");
        assert!(product.in_stock);
    }

    #[test]
    fn test_apply_keeps_absent_fields() {
        let mut product = Product::from_draft(
            "abc",
            ProductDraft {
                description: Some("Oak".to_string()),
                in_stock: Some(false),
                ..draft()
            },
        );

        product.apply(ProductChanges {
            price: Some(Decimal::from(99)),
            ..ProductChanges::default()
        });

        assert_eq!(product.price, Decimal::from(99));
        assert_eq!(product.name, "Desk");
        assert_eq!(product.description, "Oak");
        assert!(!product.in_stock);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::from_draft("abc", draft());
        let json = serde_json::to_value(&product).expect("Serialization should succeed");

        assert_eq!(json["inStock"], true);
        assert_eq!(json["price"].as_f64(), Some(150.0));
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn test_payload_accepts_partial_body() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"name": "Desk", "inStock": false}"#)
                .expect("Deserialization should succeed");

        assert_eq!(payload.name.as_deref(), Some("Desk"));
        assert_eq!(payload.in_stock, Some(false));
        assert!(payload.price.is_none());
    }

    #[test]
    fn test_payload_decimal_price() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"price": 19.99}"#).expect("Deserialization should succeed");

        assert_eq!(payload.price, Some(Decimal::new(1999, 2)));
    }
}
