pub mod price;


use crate::document::DocumentReader;
use crate::results::{Product, UNKNOWN_PRODUCT};
use crate::utils::canonical_id;
use price::PriceInfo;

/// Configuration options for product extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Name used when the page has no `h1`
    pub fallback_name: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fallback_name: UNKNOWN_PRODUCT.to_string(),
        }
    }
}

/// Extracts a product from the document with default options
pub fn extract(doc: &impl DocumentReader) -> Product {
    extract_with_options(doc, &ExtractOptions::default())
}

/// Extracts a product from the document.
///
/// Never fails: a missing heading gives the fallback name, a missing or
/// unreadable price gives `0` with an empty currency, a missing image gives
/// an empty URL.
pub fn extract_with_options(doc: &impl DocumentReader, options: &ExtractOptions) -> Product {
    let location = doc.location();

    let name = match doc.heading_text() {
        Some(text) => text.trim().to_string(),
        None => {
            ::log::debug!("No heading on {}, using fallback name", location);
            options.fallback_name.clone()
        }
    };

    let price = match doc.price_text() {
        Some(text) => PriceInfo::from_text(&text),
        None => {
            ::log::debug!("No price element on {}", location);
            PriceInfo::default()
        }
    };

    let product = Product::new(
        canonical_id(location),
        name,
        price.amount,
        price.currency,
        doc.image_source().unwrap_or_default(),
        location.to_string(),
    );

    ::log::debug!(
        "Extracted product {} ({:.2} {})",
        product.id,
        product.price,
        product.currency
    );
    product
}
