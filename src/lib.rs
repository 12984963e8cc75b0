// Receipt Points - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod error;
pub mod receipt;
pub mod rules;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ConfigError, ReceiptError, ReceiptResult, ValidationError};
pub use receipt::{parse_amount, Item, Receipt};
pub use rules::{
    Points, PointsBreakdown, RuleContribution, ScoringEngine, ScoringRule, DEFAULT_RULES,
};
pub use service::ReceiptService;
pub use store::ReceiptStore;
pub use validation::{parse_receipt, validate};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
