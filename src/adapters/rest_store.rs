use crate::domain::model::{
    LineItem, OrderConfirmation, OrderSnapshot, RecordId, StoredOrder, StoredOrderItem,
    StoredSubscriber, SubscriberSignup,
};
use crate::domain::money::Money;
use crate::domain::ports::{ConfigProvider, OrderStore};
use crate::utils::error::{FundError, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SUBSCRIBERS: &str = "subscribers";
const ORDERS: &str = "orders";
const ORDER_ITEMS: &str = "order_items";

pub const SUBSCRIPTION_SOURCE: &str = "website_optin";
pub const NEW_ORDER_STATUS: &str = "pending";

#[derive(Debug, Serialize)]
struct SubscriberRow<'a> {
    name: &'a str,
    email: &'a str,
    consent: bool,
    is_active: bool,
    subscription_source: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderRow<'a> {
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    pickup_date: NaiveDate,
    special_requests: Option<&'a str>,
    subtotal: Money,
    donation_amount: Money,
    total_amount: Money,
    order_date: DateTime<Utc>,
    status: &'a str,
}

#[derive(Debug, Serialize)]
struct OrderItemRow<'a> {
    order_id: &'a RecordId,
    item_name: &'a str,
    quantity: u32,
    unit_price: Money,
    total_price: Money,
}

impl<'a> OrderItemRow<'a> {
    fn new(order_id: &'a RecordId, item: &'a LineItem) -> Self {
        Self {
            order_id,
            item_name: &item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.line_total(),
        }
    }

    fn stored(&self) -> StoredOrderItem {
        StoredOrderItem {
            id: None,
            order_id: self.order_id.clone(),
            item_name: self.item_name.to_string(),
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
        }
    }
}

/// Just enough of an inserted row to know which record was created.
#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: RecordId,
}

/// [`OrderStore`] over a PostgREST endpoint (`{url}/rest/v1/{table}`).
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    key: String,
}

impl RestStore {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.store_url().trim_end_matches('/').to_string(),
            key: config.store_key().to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }

    async fn post_rows<T>(&self, table: &str, rows: &[T], prefer: &str) -> Result<Response>
    where
        T: Serialize + Sync,
    {
        let url = self.table_url(table);
        tracing::debug!("📤 Inserting {} row(s) into {} ({})", rows.len(), table, prefer);

        let response = self
            .authorized(self.client.post(&url))
            .header("Prefer", prefer)
            .json(rows)
            .send()
            .await?;

        check_status(table, response).await
    }

    /// Insert that reads the created rows back. Needs select access on `table`.
    async fn insert_returning<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self.post_rows(table, rows, "return=representation").await?;
        Ok(response.json().await?)
    }

    /// Write-only insert, allowed under an insert-only row level security policy.
    async fn insert_only<T>(&self, table: &str, rows: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        self.post_rows(table, rows, "return=minimal").await?;
        Ok(())
    }

    async fn select_rows<R: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        order: &str,
    ) -> Result<Vec<R>> {
        let url = self.table_url(table);
        tracing::debug!("📥 Selecting {} from {} ordered by {}", select, table, order);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("select", select), ("order", order)])
            .send()
            .await?;

        let response = check_status(table, response).await?;
        Ok(response.json().await?)
    }
}

/// Non-2xx responses become `StoreError`, preferring the store's own message.
async fn check_status(table: &str, response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("{} response status: {}", table, status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            }
        });

    tracing::error!("❌ {} request failed ({}): {}", table, status, message);
    Err(FundError::StoreError {
        status: status.as_u16(),
        message,
    })
}

fn first_row<R>(table: &str, rows: Vec<R>) -> Result<R> {
    rows.into_iter().next().ok_or_else(|| FundError::StoreError {
        status: 200,
        message: format!("insert into {} returned no rows", table),
    })
}

#[async_trait]
impl OrderStore for RestStore {
    async fn insert_subscriber(&self, signup: &SubscriberSignup) -> Result<StoredSubscriber> {
        let row = SubscriberRow {
            name: &signup.name,
            email: &signup.email,
            consent: signup.consent,
            is_active: true,
            subscription_source: SUBSCRIPTION_SOURCE,
        };

        self.insert_only(SUBSCRIBERS, &[&row]).await?;
        Ok(StoredSubscriber {
            id: None,
            name: row.name.to_string(),
            email: row.email.to_string(),
            consent: row.consent,
            is_active: row.is_active,
            subscription_source: Some(row.subscription_source.to_string()),
            created_at: None,
        })
    }

    async fn insert_order(&self, snapshot: &OrderSnapshot) -> Result<OrderConfirmation> {
        let customer = &snapshot.customer;
        let header = OrderRow {
            customer_name: &customer.name,
            customer_email: &customer.email,
            customer_phone: &customer.phone,
            pickup_date: customer.pickup_date,
            special_requests: customer.special_requests.as_deref(),
            subtotal: snapshot.totals.subtotal,
            donation_amount: snapshot.totals.donation,
            total_amount: snapshot.totals.total,
            order_date: Utc::now(),
            status: NEW_ORDER_STATUS,
        };

        let rows: Vec<serde_json::Value> = self.insert_returning(ORDERS, &[header]).await?;
        let row = first_row(ORDERS, rows)?;
        let InsertedRow { id: order_id } = serde_json::from_value(row.clone())?;
        tracing::debug!("Order header {} written", order_id);

        // No compensation: from here on a failure leaves the header row behind.
        let orphaned = |message: String| {
            tracing::warn!(
                "⚠️ Order {} has no items stored and is orphaned: {}",
                order_id,
                message
            );
            FundError::OrderItemsFailed {
                order_id: order_id.to_string(),
                message,
            }
        };

        let order: StoredOrder = serde_json::from_value(row)
            .map_err(|e| orphaned(format!("unreadable order row: {}", e)))?;

        let item_rows: Vec<OrderItemRow> = snapshot
            .items
            .iter()
            .map(|item| OrderItemRow::new(&order_id, item))
            .collect();

        if let Err(e) = self.insert_only(ORDER_ITEMS, &item_rows).await {
            return Err(orphaned(e.to_string()));
        }
        let items = item_rows.iter().map(OrderItemRow::stored).collect();

        Ok(OrderConfirmation {
            order_id: order_id.clone(),
            order,
            items,
        })
    }

    async fn list_orders(&self) -> Result<Vec<StoredOrder>> {
        let orders: Vec<StoredOrder> = self
            .select_rows(ORDERS, "*,order_items(*)", "order_date.desc")
            .await?;
        tracing::debug!("Fetched {} orders", orders.len());
        Ok(orders)
    }

    async fn list_subscribers(&self) -> Result<Vec<StoredSubscriber>> {
        let subscribers: Vec<StoredSubscriber> =
            self.select_rows(SUBSCRIBERS, "*", "created_at.desc").await?;
        tracing::debug!("Fetched {} subscribers", subscribers.len());
        Ok(subscribers)
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .authorized(self.client.head(self.table_url(SUBSCRIBERS)))
            .query(&[("select", "count")])
            .header("Prefer", "count=exact")
            .send()
            .await?;

        check_status(SUBSCRIBERS, response).await?;
        tracing::info!("🔌 Store connection successful");
        Ok(())
    }
}
