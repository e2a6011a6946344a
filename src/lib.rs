pub mod browser;
pub mod cart;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod ledger;
pub mod presenter;
pub mod recover;
pub mod results;
pub mod storage;
pub mod utils;

// Re-export commonly used types for convenience
pub use cart::{Cart, CartItem};
pub use document::{DocumentReader, HtmlDocument, StaticDocument};
pub use ledger::Ledger;
pub use presenter::{Panel, RemoveRequest};
pub use results::Product;
pub use storage::{FileStorage, MemoryStorage, Storage};

use extractor::ExtractOptions;

/// Page agent tying extraction, the cart ledger and the summary panel together
pub struct CartAgent<S> {
    ledger: Ledger<S>,
    options: ExtractOptions,
}

impl<S: Storage> CartAgent<S> {
    /// Create a new agent over the given storage, using the default cart key
    pub fn new(storage: S) -> Self {
        Self {
            ledger: Ledger::new(storage),
            options: ExtractOptions::default(),
        }
    }

    /// Set the configuration from an AgentConfig
    pub fn with_config(self, config: &config::AgentConfig) -> Self {
        self.with_cart_key(&config.cart_key)
            .with_extract_options(config.extract_options())
    }

    /// Keep the cart under a different storage key
    pub fn with_cart_key(self, key: &str) -> Self {
        let Self { ledger, options } = self;
        Self {
            ledger: Ledger::with_key(ledger.into_storage(), key),
            options,
        }
    }

    /// Set the extraction options
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    /// Extract the product on the page, add it to the cart and render the panel
    pub fn visit(&self, doc: &impl DocumentReader) -> Panel {
        let product = extractor::extract_with_options(doc, &self.options);
        ::log::info!("Adding {} to cart", product.id);
        let cart = self.ledger.upsert(product);
        Panel::from_cart(&cart)
    }

    /// Remove a product from the cart and render the panel
    pub fn remove(&self, id: &str) -> Panel {
        ::log::info!("Removing {} from cart", id);
        Panel::from_cart(&self.ledger.remove(id))
    }

    /// Apply a removal request emitted by the panel
    pub fn handle(&self, request: RemoveRequest) -> Panel {
        self.remove(&request.id)
    }

    /// Render the panel without changing the cart
    pub fn panel(&self) -> Panel {
        Panel::from_cart(&self.ledger.load())
    }
}
