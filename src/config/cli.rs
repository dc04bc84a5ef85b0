use crate::core::checkout::OrderForm;
use crate::core::menu::ItemSelection;
use crate::core::newsletter::SignupForm;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scoop-fund")]
#[command(about = "Orders and newsletter signups for the ice cream fundraiser")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "scoop-fund.toml")]
    pub config: PathBuf,

    /// Store base URL (overrides config and SUPABASE_URL)
    #[arg(long)]
    pub store_url: Option<String>,

    /// Store API key (overrides config and SUPABASE_KEY)
    #[arg(long)]
    pub store_key: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the menu with prices
    Menu,

    /// Place a pickup order
    Order(OrderArgs),

    /// Join the newsletter
    Subscribe(SubscribeArgs),

    /// List orders, newest first
    Orders {
        /// Also write the orders to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List newsletter subscribers, newest first
    Subscribers,

    /// Show money raised against the goal
    Progress,

    /// Check that the store is reachable
    Ping,
}

#[derive(Debug, Clone, clap::Args)]
pub struct OrderArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    /// Pickup date as YYYY-MM-DD, at least one day ahead
    #[arg(long)]
    pub pickup_date: String,

    #[arg(long)]
    pub requests: Option<String>,

    /// Menu item as NAME or NAME=QTY; repeatable
    #[arg(long = "item", required = true)]
    pub items: Vec<ItemSelection>,

    /// Show the order and totals without submitting
    #[arg(long)]
    pub dry_run: bool,
}

impl OrderArgs {
    pub fn form(&self) -> OrderForm {
        OrderForm {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            pickup_date: self.pickup_date.clone(),
            special_requests: self.requests.clone(),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct SubscribeArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Record the signup without newsletter consent (will be rejected)
    #[arg(long)]
    pub no_consent: bool,
}

impl SubscribeArgs {
    pub fn form(&self) -> SignupForm {
        SignupForm {
            name: self.name.clone(),
            email: self.email.clone(),
            consent: !self.no_consent,
        }
    }
}
