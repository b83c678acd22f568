use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::models::{ProductDraft, ProductPayload};

// =============================================================================
// Validation Constants
// =============================================================================

/// Message returned when a required product field is absent.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, price, and category are required fields.";

/// Maximum length for product names.
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum length for category names.
pub const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum length for product descriptions.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Validate a create/update body and turn it into a [`ProductDraft`].
///
/// Rules:
/// - `name`, `price` and `category` must be present; blank strings count as absent
/// - `price` must not be negative (zero is allowed)
/// - `name` and `category` must not contain control characters
/// - `name`, `category` and `description` are length-limited
pub fn validate_product(payload: ProductPayload) -> AppResult<ProductDraft> {
    let ProductPayload {
        name,
        description,
        price,
        category,
        in_stock,
    } = payload;

    let (Some(name), Some(price), Some(category)) = (
        name.filter(|n| !n.trim().is_empty()),
        price,
        category.filter(|c| !c.trim().is_empty()),
    ) else {
        return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    };

    validate_text_field(&name, "Name", MAX_NAME_LENGTH)?;
    validate_text_field(&category, "Category", MAX_CATEGORY_LENGTH)?;
    validate_price(price)?;

    if let Some(description) = &description
        && description.chars().count() > MAX_DESCRIPTION_LENGTH
    {
        return Err(AppError::Validation(format!(
            "Description cannot exceed {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }

    Ok(ProductDraft {
        name,
        description,
        price,
        category,
        in_stock,
    })
}

/// Validate a single-line text field.
fn validate_text_field(value: &str, field: &str, max_length: usize) -> AppResult<()> {
    if value.chars().count() > max_length {
        return Err(AppError::Validation(format!(
            "{field} cannot exceed {max_length} characters"
        )));
    }

    if let Some(pos) = value.chars().position(|c| c.is_control()) {
        return Err(AppError::Validation(format!(
            "{field} contains invalid control character at position {pos}"
        )));
    }

    Ok(())
}

/// Validate a product price.
pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn payload() -> ProductPayload {
        ProductPayload {
            name: Some("Desk".to_string()),
            description: None,
            price: Some(Decimal::from(150)),
            category: Some("furniture".to_string()),
            in_stock: None,
        }
    }

    fn assert_required_error(result: AppResult<ProductDraft>) {
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_valid_payload() {
        let draft = validate_product(payload()).unwrap();

        assert_eq!(draft.name, "Desk");
        assert_eq!(draft.price, Decimal::from(150));
        assert_eq!(draft.category, "furniture");
        assert!(draft.in_stock.is_none());
    }

    #[test]
    fn test_missing_name() {
        assert_required_error(validate_product(ProductPayload {
            name: None,
            ..payload()
        }));
    }

    #[test]
    fn test_blank_name() {
        assert_required_error(validate_product(ProductPayload {
            name: Some("   ".to_string()),
            ..payload()
        }));
    }

    #[test]
    fn test_missing_price() {
        assert_required_error(validate_product(ProductPayload {
            price: None,
            ..payload()
        }));
    }

    #[test]
    fn test_missing_category() {
        assert_required_error(validate_product(ProductPayload {
            category: Some(String::new()),
            ..payload()
        }));
    }

    #[test]
    fn test_empty_body() {
        assert_required_error(validate_product(ProductPayload::default()));
    }

    #[test]
    fn test_zero_price_is_accepted() {
        let draft = validate_product(ProductPayload {
            price: Some(Decimal::ZERO),
            ..payload()
        })
        .unwrap();
        assert!(draft.price.is_zero());
    }

    #[test]
    fn test_negative_price() {
        let result = validate_product(ProductPayload {
            price: Some(Decimal::new(-1, 2)),
            ..payload()
        });
        assert!(result.unwrap_err().to_string().contains("negative"));
    }

    #[test]
    fn test_name_too_long() {
        let result = validate_product(ProductPayload {
            name: Some("a".repeat(MAX_NAME_LENGTH + 1)),
            ..payload()
        });
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_category_control_characters() {
        let result = validate_product(ProductPayload {
            category: Some("office\nsupplies".to_string()),
            ..payload()
        });
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("control character")
        );
    }

    #[test]
    fn test_description_too_long() {
        let result = validate_product(ProductPayload {
            description: Some("d".repeat(MAX_DESCRIPTION_LENGTH + 1)),
            ..payload()
        });
        assert!(result.unwrap_err().to_string().contains("Description"));
    }

    #[test]
    fn test_multibyte_name_length_counts_chars() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert!(
            validate_product(ProductPayload {
                name: Some(name),
                ..payload()
            })
            .is_ok()
        );
    }
}
