use crate::extractor::ExtractOptions;
use crate::ledger::DEFAULT_CART_KEY;
use crate::results::UNKNOWN_PRODUCT;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for the cart agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// File the key/value store is kept in
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,

    /// Storage key the cart is saved under
    #[serde(default = "default_cart_key")]
    pub cart_key: String,

    /// URL for the WebDriver instance used to render pages
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Product name used when a page has no heading
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

impl AgentConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Extraction options derived from this configuration
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            fallback_name: self.fallback_name.clone(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            cart_key: default_cart_key(),
            webdriver_url: default_webdriver_url(),
            fallback_name: default_fallback_name(),
        }
    }
}

/// Default value for storage_path
fn default_storage_path() -> PathBuf {
    PathBuf::from(".cart-agent/storage.json")
}

/// Default value for cart_key
fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for fallback_name
fn default_fallback_name() -> String {
    UNKNOWN_PRODUCT.to_string()
}
