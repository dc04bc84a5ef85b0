use crate::domain::model::{LineItem, OrderTotals};
use crate::domain::money::Money;

/// Largest quantity a single line item can hold. Adds and updates beyond it
/// are clamped.
pub const MAX_QUANTITY: u32 = 999;

/// In-memory shopping cart, keyed by item name.
///
/// Items keep insertion order. A quantity stays within `1..=MAX_QUANTITY`:
/// an update to zero or less removes the item instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the quantity of an existing item, keeping its original price,
    /// or appends a new item with quantity one.
    pub fn add_item(&mut self, name: &str, unit_price: Money) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.name == name) {
            if existing.quantity >= MAX_QUANTITY {
                tracing::warn!("⚠️ {} already at the limit of {}", name, MAX_QUANTITY);
                return;
            }
            existing.quantity += 1;
            tracing::debug!("🍦 {} x{}", name, existing.quantity);
            return;
        }

        self.items.push(LineItem {
            name: name.to_string(),
            unit_price,
            quantity: 1,
        });
        tracing::debug!("🍦 Added {} at {}", name, unit_price);
    }

    /// Returns whether anything was removed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() != before
    }

    /// Returns `false` when nothing changed, including when `name` is not in the cart.
    /// Quantities above [`MAX_QUANTITY`] are clamped to it.
    pub fn update_quantity(&mut self, name: &str, new_quantity: i64) -> bool {
        if new_quantity <= 0 {
            return self.remove_item(name);
        }

        let quantity = match u32::try_from(new_quantity) {
            Ok(q) if q <= MAX_QUANTITY => q,
            _ => {
                tracing::warn!(
                    "⚠️ Clamping {} x{} to the limit of {}",
                    name,
                    new_quantity,
                    MAX_QUANTITY
                );
                MAX_QUANTITY
            }
        };
        match self.items.iter_mut().find(|i| i.name == name) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => {
                tracing::debug!("Ignoring quantity update for {} (not in cart)", name);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn donation_amount(&self) -> Money {
        self.totals().donation
    }

    pub fn total(&self) -> Money {
        self.totals().total
    }

    pub fn totals(&self) -> OrderTotals {
        OrderTotals::from_subtotal(self.subtotal())
    }
}
