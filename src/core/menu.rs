use crate::core::cart::{Cart, MAX_QUANTITY};
use crate::domain::money::Money;
use crate::utils::error::{FundError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub description: Option<String>,
}

/// Trusted price list. Cart additions go through here so prices never come
/// from the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive; returns the canonical entry.
    pub fn lookup(&self, name: &str) -> Option<&MenuItem> {
        let wanted = name.trim();
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(wanted))
    }

    /// Adds every requested item to `cart`. Nothing is added unless every
    /// name resolves.
    pub fn fill_cart(&self, cart: &mut Cart, selections: &[ItemSelection]) -> Result<()> {
        let resolved = selections
            .iter()
            .map(|selection| {
                self.lookup(&selection.name)
                    .map(|item| (item, selection.quantity))
                    .ok_or_else(|| FundError::UnknownMenuItem {
                        name: selection.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for (item, quantity) in resolved {
            cart.add_item(&item.name, item.price);
            if quantity > 1 {
                let current = cart.get(&item.name).map_or(0, |line| line.quantity);
                cart.update_quantity(&item.name, i64::from(current) + i64::from(quantity) - 1);
            }
        }
        Ok(())
    }
}

/// `NAME` or `NAME=QTY` as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelection {
    pub name: String,
    pub quantity: u32,
}

impl FromStr for ItemSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, quantity) = match s.rsplit_once('=') {
            Some((name, qty)) => {
                let quantity = qty
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid quantity '{}' for '{}'", qty, name))?;
                (name, quantity)
            }
            None => (s, 1),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err("item name cannot be empty".to_string());
        }
        if quantity == 0 {
            return Err(format!("quantity for '{}' must be at least 1", name));
        }
        if quantity > MAX_QUANTITY {
            return Err(format!("quantity for '{}' cannot exceed {}", name, MAX_QUANTITY));
        }

        Ok(Self {
            name: name.to_string(),
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(vec![
            MenuItem {
                name: "Vanilla Cone".to_string(),
                price: Money::from_cents(350),
                description: None,
            },
            MenuItem {
                name: "Sundae".to_string(),
                price: Money::from_cents(500),
                description: Some("Two scoops, hot fudge".to_string()),
            },
        ])
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let menu = menu();
        assert_eq!(menu.lookup("vanilla cone").unwrap().name, "Vanilla Cone");
        assert_eq!(menu.lookup(" SUNDAE ").unwrap().price.cents(), 500);
        assert!(menu.lookup("Banana Split").is_none());
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            "Sundae=3".parse::<ItemSelection>().unwrap(),
            ItemSelection {
                name: "Sundae".to_string(),
                quantity: 3
            }
        );
        assert_eq!("Vanilla Cone".parse::<ItemSelection>().unwrap().quantity, 1);
        assert!("Sundae=0".parse::<ItemSelection>().is_err());
        assert!("Sundae=lots".parse::<ItemSelection>().is_err());
        assert!("=2".parse::<ItemSelection>().is_err());
        assert!("Sundae=4000000000".parse::<ItemSelection>().is_err());
        assert!("Sundae=1000".parse::<ItemSelection>().is_err());
        assert_eq!("Sundae=999".parse::<ItemSelection>().unwrap().quantity, 999);
    }

    #[test]
    fn test_fill_cart_large_quantities_stay_bounded() {
        let menu = menu();
        let mut cart = Cart::new();
        let selections = vec![
            ItemSelection {
                name: "Sundae".to_string(),
                quantity: 4_000_000_000,
            },
            "sundae=999".parse().unwrap(),
            "Vanilla Cone=600".parse().unwrap(),
            "Vanilla Cone=600".parse().unwrap(),
        ];

        menu.fill_cart(&mut cart, &selections).unwrap();

        assert_eq!(cart.get("Sundae").unwrap().quantity, MAX_QUANTITY);
        assert_eq!(cart.get("Vanilla Cone").unwrap().quantity, MAX_QUANTITY);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_fill_cart_uses_canonical_names() {
        let menu = menu();
        let mut cart = Cart::new();
        let selections = vec![
            "vanilla cone=2".parse().unwrap(),
            "Sundae".parse().unwrap(),
        ];

        menu.fill_cart(&mut cart, &selections).unwrap();

        assert_eq!(cart.get("Vanilla Cone").unwrap().quantity, 2);
        assert_eq!(cart.subtotal(), Money::from_cents(1200));
    }

    #[test]
    fn test_fill_cart_unknown_item_adds_nothing() {
        let menu = menu();
        let mut cart = Cart::new();
        let selections = vec!["Sundae".parse().unwrap(), "Banana Split".parse().unwrap()];

        let err = menu.fill_cart(&mut cart, &selections).unwrap_err();
        assert!(matches!(err, FundError::UnknownMenuItem { name } if name == "Banana Split"));
        assert!(cart.is_empty());
    }
}
