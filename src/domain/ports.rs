use crate::domain::model::{
    OrderConfirmation, OrderSnapshot, StoredOrder, StoredSubscriber, SubscriberSignup,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the store lives and how to authenticate against it.
pub trait ConfigProvider: Send + Sync {
    fn store_url(&self) -> &str;
    fn store_key(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
}

/// Remote record store for orders and newsletter subscribers.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_subscriber(&self, signup: &SubscriberSignup) -> Result<StoredSubscriber>;

    /// Writes the order header, then its line items keyed by the new header id.
    /// The two writes are not atomic.
    async fn insert_order(&self, snapshot: &OrderSnapshot) -> Result<OrderConfirmation>;

    /// Newest first, with line items embedded.
    async fn list_orders(&self) -> Result<Vec<StoredOrder>>;

    /// Newest first.
    async fn list_subscribers(&self) -> Result<Vec<StoredSubscriber>>;

    async fn ping(&self) -> Result<()>;
}
