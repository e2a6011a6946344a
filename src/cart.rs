use crate::error::LedgerError;
use crate::results::Product;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Schema version written with every saved cart
pub const CART_VERSION: u32 = 1;

fn default_version() -> u32 {
    CART_VERSION
}

fn default_quantity() -> u32 {
    1
}

/// A product in the cart together with how many times it was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub currency: String,

    #[serde(rename = "imgURL", default)]
    pub img_url: String,

    #[serde(rename = "webURL", default)]
    pub web_url: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl CartItem {
    /// A fresh line item for `product`, quantity one
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            currency: product.currency,
            img_url: product.img_url,
            web_url: product.web_url,
            quantity: 1,
        }
    }

    /// Unit price times quantity
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Ordered cart line items, unique by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default = "default_version")]
    pub version: u32,

    pub products: Vec<CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            version: CART_VERSION,
            products: Vec::new(),
        }
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.products.iter().find(|item| item.id == id)
    }

    /// Adds one unit of `product`.
    ///
    /// An existing line keeps its position and its first-seen name, price,
    /// currency and URLs; only the quantity grows. New ids are appended.
    pub fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|item| item.id == product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                ::log::debug!("Cart item {} now has quantity {}", item.id, item.quantity);
            }
            None => {
                ::log::debug!("Adding {} to cart", product.id);
                self.products.push(CartItem::new(product));
            }
        }
    }

    /// Removes the line with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|item| item.id != id);
        before != self.products.len()
    }

    /// Sum of all line totals, regardless of currency
    pub fn total(&self) -> f64 {
        self.products.iter().map(CartItem::line_total).sum()
    }

    /// Serializes the cart to its persisted JSON form
    pub fn to_json(&self) -> Result<String, LedgerError> {
        serde_json::to_string(self).map_err(LedgerError::Encode)
    }

    /// Decodes a persisted cart.
    ///
    /// The payload must be an object with a `products` array. Entries that
    /// fail to decode, and entries repeating an earlier id, are dropped with
    /// a warning so one bad line does not cost the whole cart.
    pub fn from_json(payload: &str) -> Result<Self, LedgerError> {
        let value: Value = serde_json::from_str(payload).map_err(LedgerError::Decode)?;
        let object = value
            .as_object()
            .ok_or(LedgerError::Shape("payload is not an object"))?;
        let entries = object
            .get("products")
            .and_then(Value::as_array)
            .ok_or(LedgerError::Shape("`products` is not an array"))?;

        let version = object
            .get("version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(CART_VERSION);
        if version > CART_VERSION {
            ::log::warn!(
                "Cart was saved with newer schema version {}, reading it as {}",
                version,
                CART_VERSION
            );
        }

        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let mut item: CartItem = match serde_json::from_value(entry.clone()) {
                Ok(item) => item,
                Err(e) => {
                    ::log::warn!("Dropping unreadable cart entry #{}: {}", index, e);
                    continue;
                }
            };
            if !seen.insert(item.id.clone()) {
                ::log::warn!("Dropping duplicate cart entry for {}", item.id);
                continue;
            }
            if item.quantity == 0 {
                item.quantity = 1;
            }
            if item.price < 0.0 {
                ::log::warn!(
                    "Cart entry {} has invalid price {}, using 0",
                    item.id,
                    item.price
                );
                item.price = 0.0;
            }
            products.push(item);
        }

        Ok(Self {
            version: CART_VERSION,
            products,
        })
    }
}
