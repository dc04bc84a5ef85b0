use crate::core::cart::Cart;
use crate::domain::model::{
    CustomerDetails, OrderSnapshot, OrderTotals, RecordId, StoredOrderItem,
};
use crate::domain::ports::OrderStore;
use crate::utils::error::{FundError, Result};
use crate::utils::validation::{
    optional_text, require, require_email, require_phone, require_pickup_date, ValidationErrors,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Order form fields exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub pickup_date: String,
    pub special_requests: Option<String>,
}

impl OrderForm {
    /// Checks every field and reports all failures at once.
    pub fn validate(
        &self,
        today: NaiveDate,
    ) -> std::result::Result<CustomerDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.collect(require("name", &self.name));
        let email = errors.collect(require_email("email", &self.email));
        let phone = errors.collect(require_phone("phone", &self.phone));
        let pickup_date =
            errors.collect(require_pickup_date("pickup_date", &self.pickup_date, today));

        match (name, email, phone, pickup_date) {
            (Some(name), Some(email), Some(phone), Some(pickup_date)) => {
                Ok(CustomerDetails {
                    name,
                    email,
                    phone,
                    pickup_date,
                    special_requests: optional_text(self.special_requests.as_deref()),
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: RecordId,
    pub customer_name: String,
    pub customer_email: String,
    pub totals: OrderTotals,
    pub items: Vec<StoredOrderItem>,
}

impl OrderReceipt {
    pub fn confirmation_message(&self) -> String {
        format!(
            "Thank you {}! Your order has been received. \
             You will receive a confirmation email at {}. Total: {}",
            self.customer_name, self.customer_email, self.totals.total
        )
    }
}

/// Runs order submission against a store: one attempt per call, cart cleared
/// only after the store acknowledges both writes.
pub struct OrderDesk<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderDesk<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn snapshot(cart: &Cart, customer: CustomerDetails) -> Result<OrderSnapshot> {
        if cart.is_empty() {
            return Err(FundError::EmptyCart);
        }
        Ok(OrderSnapshot {
            customer,
            items: cart.items().to_vec(),
            totals: cart.totals(),
        })
    }

    pub async fn submit(&self, cart: &mut Cart, customer: CustomerDetails) -> Result<OrderReceipt> {
        let snapshot = Self::snapshot(cart, customer)?;

        tracing::info!(
            "🧾 Submitting order for {}: {} items, total {}",
            snapshot.customer.name,
            cart.item_count(),
            snapshot.totals.total
        );

        match self.store.insert_order(&snapshot).await {
            Ok(confirmation) => {
                cart.clear();
                tracing::info!("✅ Order {} accepted", confirmation.order_id);
                Ok(OrderReceipt {
                    order_id: confirmation.order_id,
                    customer_name: snapshot.customer.name,
                    customer_email: snapshot.customer.email,
                    totals: snapshot.totals,
                    items: confirmation.items,
                })
            }
            Err(e) => {
                tracing::error!("❌ Order submission failed, cart kept: {}", e);
                Err(e)
            }
        }
    }

    /// Empty-cart check first, then field validation, then [`submit`](Self::submit).
    pub async fn submit_form(
        &self,
        cart: &mut Cart,
        form: &OrderForm,
        today: NaiveDate,
    ) -> Result<OrderReceipt> {
        if cart.is_empty() {
            tracing::warn!("Order rejected: cart is empty");
            return Err(FundError::EmptyCart);
        }
        let customer = form.validate(today)?;
        self.submit(cart, customer).await
    }
}
