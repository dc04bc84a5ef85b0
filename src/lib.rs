pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::RestStore;
pub use config::SiteConfig;
pub use crate::core::{
    cart::Cart,
    checkout::{OrderDesk, OrderForm, OrderReceipt},
    menu::{ItemSelection, Menu, MenuItem},
    newsletter::{Newsletter, SignupForm},
    report::FundraisingProgress,
};
pub use domain::money::Money;
pub use utils::error::{FundError, Result};
