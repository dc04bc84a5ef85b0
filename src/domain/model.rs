use crate::domain::money::Money;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the subtotal added as a charitable contribution.
pub const DONATION_PERCENT: i64 = 10;

/// One priced, quantified product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub donation: Money,
    pub total: Money,
}

impl OrderTotals {
    pub fn from_subtotal(subtotal: Money) -> Self {
        let donation = subtotal.percent(DONATION_PERCENT);
        Self {
            subtotal,
            donation,
            total: subtotal + donation,
        }
    }
}

/// Validated contact details for an order. Build with
/// [`OrderForm::validate`](crate::core::checkout::OrderForm::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub pickup_date: NaiveDate,
    pub special_requests: Option<String>,
}

/// Immutable hand-off from the submission workflow to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    pub totals: OrderTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberSignup {
    pub name: String,
    pub email: String,
    pub consent: bool,
}

/// Row identifier; integer or UUID depending on how the table was created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubscriber {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub consent: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub subscription_source: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrderItem {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub order_id: RecordId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredOrder {
    pub id: RecordId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub pickup_date: NaiveDate,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub subtotal: Money,
    pub donation_amount: Money,
    pub total_amount: Money,
    pub order_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub order_items: Vec<StoredOrderItem>,
}

/// What the store hands back after both order writes succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: RecordId,
    pub order: StoredOrder,
    pub items: Vec<StoredOrderItem>,
}
