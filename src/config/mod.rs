//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or ExchangeConfig built in code
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ExchangeConfig (validated, immutable)
//!     → ExchangeClient::init builds a fresh session from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once accepted; changes require a new `init`
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ExchangeConfig, ObservabilityConfig, DEFAULT_ISSUER};
pub use validation::{validate_config, ValidationError};
