use serde::{Deserialize, Serialize};

/// Name used when a page has no top-level heading
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Represents a product extracted from a rendered page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Canonical identity of the page (origin + path)
    pub id: String,

    /// Text of the first top-level heading
    pub name: String,

    /// Non-negative unit price, rounded to cents
    pub price: f64,

    /// Currency token found after the price, possibly empty
    pub currency: String,

    /// Resolved source of the first image on the page
    #[serde(rename = "imgURL")]
    pub img_url: String,

    /// Full location of the page, query and fragment included
    #[serde(rename = "webURL")]
    pub web_url: String,
}

impl Product {
    /// Create a new product record
    pub fn new(
        id: String,
        name: String,
        price: f64,
        currency: String,
        img_url: String,
        web_url: String,
    ) -> Self {
        Self {
            id,
            name,
            price,
            currency,
            img_url,
            web_url,
        }
    }
}
