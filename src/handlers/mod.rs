mod health;
mod products;

pub use health::{WELCOME_MESSAGE, health_check, index};
pub use products::{
    PRODUCT_DELETED_MESSAGE, PRODUCT_UPDATED_MESSAGE, create_product, delete_product,
    get_product, list_products, not_found, product_stats, search_products, update_product,
};
