//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FrontendConfig (validated, immutable)
//!     → read once while assembling the pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; stages copy what they need at construction
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{FrontendConfig, LogFormat, ObservabilityConfig, RetryConfig};
pub use validation::{validate_config, ValidationError};
