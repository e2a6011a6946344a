use crate::cart::{Cart, CartItem};
use std::fmt;

/// Shown instead of line items when the cart has none
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Request to drop a line from the cart, emitted by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveRequest {
    pub id: String,
}

/// One rendered cart line
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub total_price: String,
    pub remove: RemoveRequest,
}

impl PanelEntry {
    fn from_item(item: &CartItem) -> Self {
        Self {
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: format_amount(item.price, &item.currency),
            total_price: format_amount(item.line_total(), &item.currency),
            remove: RemoveRequest {
                id: item.id.clone(),
            },
        }
    }
}

/// Summary view of a cart
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub entries: Vec<PanelEntry>,
    pub total: String,
}

impl Panel {
    /// Builds the view for the current cart contents
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            entries: cart.products.iter().map(PanelEntry::from_item).collect(),
            total: format!("{:.2}", cart.total()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removal request for the entry at `index`, as a click on its button would emit
    pub fn remove_request(&self, index: usize) -> Option<RemoveRequest> {
        self.entries.get(index).map(|entry| entry.remove.clone())
    }
}

fn format_amount(amount: f64, currency: &str) -> String {
    if currency.is_empty() {
        format!("{:.2}", amount)
    } else {
        format!("{:.2} {}", amount, currency)
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "{}", EMPTY_CART_MESSAGE);
        }

        writeln!(f, "Cart")?;
        for entry in &self.entries {
            writeln!(f, "----------------------------------------")?;
            writeln!(f, "Product name: {}", entry.name)?;
            writeln!(f, "Quantity:     {}", entry.quantity)?;
            writeln!(f, "Unit price:   {}", entry.unit_price)?;
            writeln!(f, "Total price:  {}", entry.total_price)?;
            writeln!(f, "[Delete]      {}", entry.remove.id)?;
        }
        writeln!(f, "----------------------------------------")?;
        writeln!(f, "Total Cart Price: {}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::Product;

    fn cart() -> Cart {
        let mut cart = Cart::new();
        let kettle = Product::new(
            "https://shop.example.com/kettle".to_string(),
            "Kettle".to_string(),
            19.99,
            "PLN".to_string(),
            String::new(),
            "https://shop.example.com/kettle?x=1".to_string(),
        );
        cart.upsert(kettle.clone());
        cart.upsert(kettle);
        cart.upsert(Product::new(
            "https://shop.example.com/mug".to_string(),
            "Mug".to_string(),
            5.0,
            String::new(),
            String::new(),
            "https://shop.example.com/mug".to_string(),
        ));
        cart
    }

    #[test]
    fn test_panel_entries() {
        let panel = Panel::from_cart(&cart());

        assert_eq!(panel.entries.len(), 2);
        let kettle = &panel.entries[0];
        assert_eq!(kettle.name, "Kettle");
        assert_eq!(kettle.quantity, 2);
        assert_eq!(kettle.unit_price, "19.99 PLN");
        assert_eq!(kettle.total_price, "39.98 PLN");
        assert_eq!(panel.entries[1].unit_price, "5.00");
        assert_eq!(panel.total, "44.98");
    }

    #[test]
    fn test_remove_request_carries_id() {
        let panel = Panel::from_cart(&cart());
        assert_eq!(
            panel.remove_request(1),
            Some(RemoveRequest {
                id: "https://shop.example.com/mug".to_string()
            })
        );
        assert_eq!(panel.remove_request(2), None);
    }

    #[test]
    fn test_render_text() {
        let text = Panel::from_cart(&cart()).to_string();
        assert!(text.starts_with("Cart\n"));
        assert!(text.contains("Product name: Kettle\n"));
        assert!(text.contains("Total price:  39.98 PLN\n"));
        assert!(text.contains("[Delete]      https://shop.example.com/mug\n"));
        assert!(text.ends_with("Total Cart Price: 44.98\n"));
    }

    #[test]
    fn test_render_empty_cart() {
        let panel = Panel::from_cart(&Cart::new());
        assert!(panel.is_empty());
        assert_eq!(panel.to_string(), format!("{}\n", EMPTY_CART_MESSAGE));
    }
}
