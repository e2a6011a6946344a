use crate::cart::Cart;
use crate::error::LedgerError;
use crate::recover::OrRecover;
use crate::results::Product;
use crate::storage::Storage;

/// Storage key the cart is kept under
pub const DEFAULT_CART_KEY: &str = "cart";

/// Persistent cart backed by one slot of a [`Storage`].
///
/// Every operation reads the slot fresh and rewrites it whole. There is no
/// locking: two interleaved load/save sequences lose the first writer's
/// change.
pub struct Ledger<S> {
    storage: S,
    key: String,
}

impl<S: Storage> Ledger<S> {
    /// Creates a ledger using the default `cart` key
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Creates a ledger using a custom storage key
    pub fn with_key(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the persisted cart, reporting why it could not be read
    pub fn try_load(&self) -> Result<Cart, LedgerError> {
        match self.storage.get(&self.key)? {
            Some(payload) => Cart::from_json(&payload),
            None => Ok(Cart::default()),
        }
    }

    /// Writes the cart, replacing whatever the slot held
    pub fn try_save(&self, cart: &Cart) -> Result<(), LedgerError> {
        let payload = cart.to_json()?;
        self.storage.set(&self.key, &payload)?;
        Ok(())
    }

    /// Reads the persisted cart; anything unreadable is an empty cart
    pub fn load(&self) -> Cart {
        self.try_load().or_recover("Cart state was invalid, resetting")
    }

    /// Writes the cart; a failed write is logged and dropped
    pub fn save(&self, cart: &Cart) {
        self.try_save(cart).or_recover("Cart could not be saved")
    }

    /// Adds one unit of `product` and persists the result
    pub fn upsert(&self, product: Product) -> Cart {
        let mut cart = self.load();
        cart.upsert(product);
        self.save(&cart);
        cart
    }

    /// Removes the line with `id`, if any, and persists the result
    pub fn remove(&self, id: &str) -> Cart {
        let mut cart = self.load();
        if !cart.remove(id) {
            ::log::debug!("Nothing to remove for {}", id);
        }
        self.save(&cart);
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;
    use proptest::prelude::*;

    fn product(id: &str, price: f64, currency: &str) -> Product {
        Product::new(
            id.to_string(),
            format!("Product {}", id),
            price,
            currency.to_string(),
            String::new(),
            format!("https://example.com/{}", id),
        )
    }

    /// Storage whose writes always fail
    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("read-only").into())
        }
    }

    #[test]
    fn test_scenario_add_add_add_remove() {
        let ledger = Ledger::new(MemoryStorage::new());
        assert!(ledger.load().is_empty());

        ledger.upsert(product("A", 10.0, "USD"));
        let cart = ledger.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("A").unwrap().quantity, 1);

        ledger.upsert(product("A", 10.0, "USD"));
        assert_eq!(ledger.load().get("A").unwrap().quantity, 2);

        ledger.upsert(product("B", 5.0, ""));
        let cart = ledger.load();
        let lines: Vec<_> = cart
            .products
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect();
        assert_eq!(lines, [("A", 2), ("B", 1)]);

        ledger.remove("A");
        let cart = ledger.load();
        let lines: Vec<_> = cart
            .products
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect();
        assert_eq!(lines, [("B", 1)]);
    }

    #[test]
    fn test_load_recovers_from_corruption() {
        let storage = MemoryStorage::new();
        let ledger = Ledger::new(&storage);

        for payload in ["{not json", "null", "[1,2]", r#"{"products":"many"}"#, ""] {
            storage.set(DEFAULT_CART_KEY, payload).unwrap();
            assert!(ledger.try_load().is_err());
            assert_eq!(ledger.load(), Cart::default());
        }

        // The next upsert starts fresh and heals the slot
        ledger.upsert(product("A", 1.0, ""));
        assert_eq!(ledger.try_load().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let ledger = Ledger::new(MemoryStorage::new());
        ledger.upsert(product("A", 1.0, ""));
        let before = ledger.load();

        ledger.remove("missing");
        assert_eq!(ledger.load(), before);

        // Removing from an empty store is fine too
        let empty = Ledger::new(MemoryStorage::new());
        assert!(empty.remove("A").is_empty());
    }

    #[test]
    fn test_out_of_range_price_still_accumulates() {
        use crate::document::StaticDocument;
        use crate::extractor::extract;
        use url::Url;

        let doc = StaticDocument::new(Url::parse("https://example.com/huge").unwrap())
            .with_heading("Huge")
            .with_price(&format!("{} PLN", "9".repeat(308)));
        let ledger = Ledger::new(MemoryStorage::new());

        ledger.upsert(extract(&doc));
        ledger.upsert(extract(&doc));

        let cart = ledger.try_load().unwrap();
        assert_eq!(cart.len(), 1);
        let item = cart.get("https://example.com/huge").unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.price, 0.0);
    }

    #[test]
    fn test_write_failure_is_absorbed() {
        let ledger = Ledger::new(ReadOnlyStorage(MemoryStorage::new()));
        assert!(ledger.try_save(&Cart::default()).is_err());

        let cart = ledger.upsert(product("A", 1.0, ""));
        assert_eq!(cart.len(), 1);
        assert!(ledger.load().is_empty());
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let ledger = Ledger::with_key(&storage, "wishlist");
        ledger.upsert(product("A", 1.0, ""));

        assert_eq!(ledger.key(), "wishlist");
        assert!(storage.get("wishlist").unwrap().is_some());
        assert!(storage.get(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn test_interleaved_writers_lose_an_update() {
        let storage = MemoryStorage::new();
        let first_tab = Ledger::new(&storage);
        let second_tab = Ledger::new(&storage);
        first_tab.upsert(product("A", 10.0, ""));

        // Both tabs read the same state before either writes
        let mut first = first_tab.load();
        let mut second = second_tab.load();

        first.upsert(product("A", 10.0, ""));
        first_tab.save(&first);

        second.upsert(product("B", 3.0, ""));
        second_tab.save(&second);

        // Last writer wins: the first tab's increment is gone
        let cart = first_tab.load();
        assert_eq!(cart.get("A").unwrap().quantity, 1);
        assert_eq!(cart.get("B").unwrap().quantity, 1);
    }

    fn arb_cart() -> impl Strategy<Value = Cart> {
        prop::collection::vec(("[a-e]", 0u32..10_000, "[A-Z]{0,3}"), 0..20).prop_map(|lines| {
            let mut cart = Cart::new();
            for (id, cents, currency) in lines {
                cart.upsert(product(&id, f64::from(cents) / 100.0, &currency));
            }
            cart
        })
    }

    proptest! {
        #[test]
        fn prop_upsert_accumulates(ids in prop::collection::vec("[a-f]", 0..40)) {
            let ledger = Ledger::new(MemoryStorage::new());
            for id in &ids {
                ledger.upsert(product(id, 1.0, ""));
            }

            let mut expected: Vec<(String, u32)> = Vec::new();
            for id in &ids {
                match expected.iter_mut().find(|(seen, _)| seen == id) {
                    Some((_, count)) => *count += 1,
                    None => expected.push((id.clone(), 1)),
                }
            }

            let actual: Vec<(String, u32)> = ledger
                .load()
                .products
                .into_iter()
                .map(|item| (item.id, item.quantity))
                .collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_round_trip(cart in arb_cart()) {
            let ledger = Ledger::new(MemoryStorage::new());
            ledger.save(&cart);
            prop_assert_eq!(ledger.load(), cart);
        }

        #[test]
        fn prop_remove_only_drops_target(cart in arb_cart(), target in "[a-g]") {
            let ledger = Ledger::new(MemoryStorage::new());
            ledger.save(&cart);
            let after = ledger.remove(&target);

            let expected: Vec<_> = cart
                .products
                .iter()
                .filter(|item| item.id != target)
                .cloned()
                .collect();
            prop_assert_eq!(after.products, expected);
            prop_assert!(ledger.load().get(&target).is_none());
        }
    }
}
