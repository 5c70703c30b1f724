//! Cart Snapshot Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_quantity() -> u32 {
    1
}

/// A single line of the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line / SKU identifier
    pub id: String,
    pub name: String,
    pub category: String,
    /// Unit price before any promotion (>= 0)
    pub price: Decimal,
    /// Units on this line (>= 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CartLine {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            quantity: 1,
            tags: vec![],
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// price * quantity, before promotions
    pub fn gross_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Immutable, ordered view of the order at evaluation time
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct CartSnapshot {
    lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Pre-discount subtotal
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::gross_total).sum()
    }
}

impl From<Vec<CartLine>> for CartSnapshot {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::new(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let line: CartLine =
            serde_json::from_str(r#"{"id":"a","name":"Cola","category":"drinks","price":2.5}"#)
                .unwrap();
        assert_eq!(line.quantity, 1);
        assert!(line.tags.is_empty());
        assert_eq!(line.price, Decimal::new(25, 1));
    }

    #[test]
    fn test_subtotal_uses_quantity() {
        let cart = CartSnapshot::new(vec![
            CartLine::new("a", "Roll", "rolls", Decimal::from(350)).with_quantity(2),
            CartLine::new("b", "Tea", "drinks", Decimal::from(100)),
        ]);
        assert_eq!(cart.subtotal(), Decimal::from(800));
    }
}
