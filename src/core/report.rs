use crate::domain::model::StoredOrder;
use crate::domain::money::Money;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

/// Money raised so far against the campaign goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundraisingProgress {
    pub goal: Money,
    pub raised: Money,
    pub donations: Money,
    pub orders: usize,
}

impl FundraisingProgress {
    pub fn new(goal: Money) -> Self {
        Self {
            goal,
            raised: Money::ZERO,
            donations: Money::ZERO,
            orders: 0,
        }
    }

    pub fn from_orders(goal: Money, orders: &[StoredOrder]) -> Self {
        let mut progress = Self::new(goal);
        for order in orders {
            progress.record(order.total_amount, order.donation_amount);
        }
        progress
    }

    pub fn record(&mut self, total: Money, donation: Money) {
        self.raised += total;
        self.donations += donation;
        self.orders += 1;
    }

    /// Capped at 100.
    pub fn percent_of_goal(&self) -> f64 {
        if self.goal.cents() <= 0 {
            return 0.0;
        }
        let percent = self.raised.cents() as f64 / self.goal.cents() as f64 * 100.0;
        percent.min(100.0)
    }

    pub fn remaining(&self) -> Money {
        if self.raised >= self.goal {
            Money::ZERO
        } else {
            Money::from_cents(self.goal.cents() - self.raised.cents())
        }
    }
}

#[derive(Debug, Serialize)]
struct OrderExportRow<'a> {
    order_id: String,
    order_date: String,
    status: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    pickup_date: String,
    special_requests: &'a str,
    item_name: &'a str,
    quantity: Option<u32>,
    unit_price: Option<String>,
    total_price: Option<String>,
    subtotal: String,
    donation_amount: String,
    total_amount: String,
}

impl<'a> OrderExportRow<'a> {
    fn header(order: &'a StoredOrder) -> Self {
        Self {
            order_id: order.id.to_string(),
            order_date: order.order_date.to_rfc3339(),
            status: &order.status,
            customer_name: &order.customer_name,
            customer_email: &order.customer_email,
            customer_phone: &order.customer_phone,
            pickup_date: order.pickup_date.to_string(),
            special_requests: order.special_requests.as_deref().unwrap_or(""),
            item_name: "",
            quantity: None,
            unit_price: None,
            total_price: None,
            subtotal: decimal(order.subtotal),
            donation_amount: decimal(order.donation_amount),
            total_amount: decimal(order.total_amount),
        }
    }
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.to_decimal())
}

/// One row per order item; orders without items still get one row.
/// Returns the number of data rows written.
pub fn export_orders_csv<W: Write>(orders: &[StoredOrder], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for order in orders {
        if order.order_items.is_empty() {
            csv_writer.serialize(OrderExportRow::header(order))?;
            rows += 1;
            continue;
        }

        for item in &order.order_items {
            let mut row = OrderExportRow::header(order);
            row.item_name = &item.item_name;
            row.quantity = Some(item.quantity);
            row.unit_price = Some(decimal(item.unit_price));
            row.total_price = Some(decimal(item.total_price));
            csv_writer.serialize(row)?;
            rows += 1;
        }
    }

    csv_writer.flush()?;
    tracing::debug!("Exported {} CSV rows for {} orders", rows, orders.len());
    Ok(rows)
}
