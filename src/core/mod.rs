pub mod cart;
pub mod checkout;
pub mod menu;
pub mod newsletter;
pub mod report;

pub use crate::domain::model::{LineItem, OrderSnapshot, OrderTotals};
pub use crate::domain::ports::{ConfigProvider, OrderStore};
pub use crate::utils::error::Result;
