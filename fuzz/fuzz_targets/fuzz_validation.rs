//! Fuzz testing for product payload validation.
//!
//! Feeds arbitrary bytes through the same path a request body takes:
//! JSON deserialization into `ProductPayload`, then `validate_product`.
//! Neither step may panic, and anything accepted must satisfy the
//! validator's own rules.
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! # Install cargo-fuzz (requires nightly)
//! cargo +nightly install cargo-fuzz
//!
//! # Run the validation fuzz target
//! cargo +nightly fuzz run fuzz_validation
//!
//! # Run with a time limit (e.g., 60 seconds)
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use product_api::models::ProductPayload;
use product_api::validation::{MAX_CATEGORY_LENGTH, MAX_NAME_LENGTH, validate_product};

fuzz_target!(|data: &[u8]| {
    let Ok(payload) = serde_json::from_slice::<ProductPayload>(data) else {
        return;
    };

    if let Ok(draft) = validate_product(payload) {
        assert!(!draft.name.trim().is_empty());
        assert!(!draft.category.trim().is_empty());
        assert!(draft.name.chars().count() <= MAX_NAME_LENGTH);
        assert!(draft.category.chars().count() <= MAX_CATEGORY_LENGTH);
        assert!(!draft.price.is_sign_negative() || draft.price.is_zero());
    }
});
