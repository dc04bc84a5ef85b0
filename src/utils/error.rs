use crate::utils::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FundError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Store rejected request ({status}): {message}")]
    StoreError { status: u16, message: String },

    #[error("Order {order_id} was saved but its items were not: {message}")]
    OrderItemsFailed { order_id: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("'{name}' is not on the menu")]
    UnknownMenuItem { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Store,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FundError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FundError::ApiError(_) => ErrorCategory::Network,
            FundError::StoreError { .. } | FundError::OrderItemsFailed { .. } => {
                ErrorCategory::Store
            }
            FundError::Validation(_)
            | FundError::EmptyCart
            | FundError::UnknownMenuItem { .. } => ErrorCategory::Input,
            FundError::ConfigError { .. }
            | FundError::MissingConfigError { .. }
            | FundError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FundError::CsvError(_) | FundError::IoError(_) | FundError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// Network and store failures are retryable by the user, input problems
    /// need a corrected form, configuration and orphaned orders need an operator.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FundError::ApiError(_) | FundError::StoreError { .. } => ErrorSeverity::Medium,
            FundError::Validation(_)
            | FundError::EmptyCart
            | FundError::UnknownMenuItem { .. } => ErrorSeverity::High,
            FundError::OrderItemsFailed { .. } => ErrorSeverity::Critical,
            FundError::ConfigError { .. }
            | FundError::MissingConfigError { .. }
            | FundError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
            FundError::CsvError(_) | FundError::IoError(_) | FundError::SerializationError(_) => {
                ErrorSeverity::High
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FundError::ApiError(_) => "Could not reach the order database.".to_string(),
            FundError::StoreError { message, .. } => {
                format!("The order database rejected the request: {}", message)
            }
            FundError::OrderItemsFailed { order_id, .. } => format!(
                "Order {} was recorded without its items. Please contact the organizers.",
                order_id
            ),
            FundError::Validation(errors) => {
                let lines: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                format!("Please fix the following fields:\n  {}", lines.join("\n  "))
            }
            FundError::EmptyCart => {
                "Please add items to your cart before placing an order.".to_string()
            }
            FundError::UnknownMenuItem { name } => format!("'{}' is not on the menu.", name),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and try again",
            ErrorCategory::Store => match self {
                FundError::OrderItemsFailed { .. } => {
                    "Remove the orphaned order row or re-enter its items manually"
                }
                _ => "Check the store key permissions and table schema, then try again",
            },
            ErrorCategory::Input => "Correct the highlighted input and submit again",
            ErrorCategory::Configuration => {
                "Set SUPABASE_URL and SUPABASE_KEY or fix the [store] section of the config file"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, FundError>;
