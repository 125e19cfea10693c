pub mod client;
pub mod error;
pub mod extract;
pub mod html_text;
pub mod links;
pub mod page;
pub mod pipeline;
pub mod price;
pub(crate) mod rate_limit;
pub mod sanitize;
pub mod transform;

pub use client::CatalogClient;
pub use error::{InvalidProduct, ScraperError};
pub use links::parse_product_links;
pub use page::parse_product_page;
pub use pipeline::{scrape_products, scrape_products_with};
pub use price::{parse_price, MAX_PRICE};
pub use sanitize::{sanitize_scraped_product, validate_scraped_product};
pub use transform::{transform_scraped_to_product, try_transform, TransformRejection};
