//! Fuzz testing for list query parsing and pagination.
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_pagination
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use product_api::query::{PageRequest, paginate};
use product_api::store::sample_products;

#[derive(Debug, Arbitrary)]
struct ListInput<'a> {
    page: Option<&'a str>,
    limit: Option<&'a str>,
    default_limit: u8,
    max_limit: u8,
}

fuzz_target!(|input: ListInput<'_>| {
    let default_limit = usize::from(input.default_limit.max(1));
    let max_limit = usize::from(input.max_limit.max(1));

    let request = PageRequest::parse(input.page, input.limit, default_limit, max_limit);
    assert!(request.page >= 1);
    assert!(request.limit >= 1 && request.limit <= max_limit);

    let page = paginate(sample_products(), request);
    assert!(page.products.len() <= request.limit);
    assert_eq!(page.total_pages, page.total_products.div_ceil(request.limit));
});
