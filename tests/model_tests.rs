//! Unit tests for domain models and their wire format.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

// Note: These tests can be run with: cargo test --test model_tests

mod product_tests {
    use super::*;
    use product_api::models::{Product, ProductChanges, ProductDraft, ProductPayload};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn desk_draft() -> ProductDraft {
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
        let product = Product::from_draft("abc", desk_draft());

        assert_eq!(product.id, "abc");
        assert_eq!(product.description, "");
        assert!(product.in_stock);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::from_draft("abc", desk_draft());
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["inStock"], true);
        assert!(json.get("in_stock").is_none());
        assert_eq!(json["price"].as_f64(), Some(150.0));
    }

    #[test]
    fn test_product_deserialize_fills_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": "7",
            "name": "Mug",
            "price": 4.5,
            "category": "kitchen"
        }))
        .unwrap();

        assert_eq!(product.price, Decimal::from_str("4.5").unwrap());
        assert_eq!(product.description, "");
        assert!(product.in_stock);
    }

    #[test]
    fn test_price_is_exact_in_store_and_f64_on_the_wire() {
        let price = Decimal::from_str("12345678901234567.89").unwrap();
        let product = Product::from_draft(
            "big",
            ProductDraft {
                price,
                ..desk_draft()
            },
        );
        assert_eq!(product.price.to_string(), "12345678901234567.89");

        let json = serde_json::to_value(&product).unwrap();
        assert!(json["price"].is_f64());
        assert_ne!(json["price"].to_string(), "12345678901234567.89");
        let wire = json["price"].as_f64().unwrap();
        assert!((wire - 1.2345678901234568e16).abs() <= 4.0);
    }

    #[test]
    fn test_payload_accepts_partial_body() {
        let payload: ProductPayload = serde_json::from_value(json!({ "name": "Only" })).unwrap();

        assert_eq!(payload.name.as_deref(), Some("Only"));
        assert!(payload.price.is_none());
        assert!(payload.category.is_none());
        assert!(payload.in_stock.is_none());
    }

    #[test]
    fn test_payload_reads_in_stock_camel_case() {
        let payload: ProductPayload =
            serde_json::from_value(json!({ "inStock": false })).unwrap();

        assert_eq!(payload.in_stock, Some(false));
    }

    #[test]
    fn test_apply_changes_only_touches_present_fields() {
        let mut product = Product::from_draft(
            "1",
            ProductDraft {
                description: Some("Oak".to_string()),
                in_stock: Some(false),
                ..desk_draft()
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
    fn test_changes_from_draft_keep_optional_fields_optional() {
        let changes = ProductChanges::from(desk_draft());

        assert_eq!(changes.name.as_deref(), Some("Desk"));
        assert_eq!(changes.price, Some(Decimal::from(150)));
        assert!(changes.description.is_none());
        assert!(changes.in_stock.is_none());
    }
}

mod response_tests {
    use super::*;
    use product_api::models::{CategoryStats, DeleteResponse, ProductPage, UpdateResponse};
    use product_api::store::sample_products;
    use std::collections::BTreeMap;

    #[test]
    fn test_product_page_shape() {
        let page = ProductPage {
            current_page: 2,
            total_pages: 3,
            total_products: 11,
            products: vec![],
        };

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({ "currentPage": 2, "totalPages": 3, "totalProducts": 11, "products": [] })
        );
    }

    #[test]
    fn test_category_stats_ordered_by_name() {
        let stats = CategoryStats {
            total_products: 3,
            count_by_category: BTreeMap::from([
                ("kitchen".to_string(), 1),
                ("electronics".to_string(), 2),
            ]),
        };

        let text = serde_json::to_string(&stats).unwrap();

        assert!(text.find("electronics").unwrap() < text.find("kitchen").unwrap());
        assert!(text.contains("\"countByCategory\""));
        assert!(text.contains("\"totalProducts\":3"));
    }

    #[test]
    fn test_update_and_delete_responses() {
        let laptop = sample_products().into_iter().next().unwrap();

        let update = serde_json::to_value(UpdateResponse {
            message: "Product updated successfully".to_string(),
            product: laptop.clone(),
        })
        .unwrap();
        assert_eq!(update["product"]["name"], "Laptop");

        let delete = serde_json::to_value(DeleteResponse {
            message: "Product deleted successfully".to_string(),
            deleted: laptop,
        })
        .unwrap();
        assert!(delete["deleted"].is_object());
        assert_eq!(delete["deleted"]["id"], "1");
    }
}

mod error_tests {
    use axum::http::StatusCode;
    use product_api::AppError;
    use product_api::error::INTERNAL_ERROR_MESSAGE;

    #[test]
    fn test_error_kinds_map_to_status_and_name() {
        let cases = [
            (AppError::product_not_found(), StatusCode::NOT_FOUND, "NotFoundError"),
            (
                AppError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
                "ValidationError",
            ),
            (
                AppError::Auth("no".to_string()),
                StatusCode::UNAUTHORIZED,
                "AuthError",
            ),
            (
                AppError::Internal("db exploded".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
            ),
        ];

        for (error, status, name) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.kind().name(), name);
        }
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = AppError::Internal("secret stack trace".to_string());
        assert_eq!(error.client_message(), INTERNAL_ERROR_MESSAGE);

        let error = AppError::Config("PORT is wrong".to_string());
        assert_eq!(error.client_message(), INTERNAL_ERROR_MESSAGE);
    }
}
