//! aks-guard - safety layer between an automated agent and a managed
//! cluster fleet.
//!
//! An agent's requests are untrusted model output, so two components sit
//! between it and anything that executes:
//! - Command authorization ([`security`]): injection scanning, here-document
//!   structure checks and an access-level policy over a read allow-list.
//! - Query building ([`query`]): compiles validated log-query parameters
//!   into a scoped, schema-correct KQL string.
//!
//! Both are pure, synchronous functions over immutable lookup tables built
//! at first use, so they are safe to call from any number of threads.
//!
//! # Example
//!
//! ```
//! use aks_guard::security::{self, AccessLevel};
//!
//! assert!(security::validate("az aks list --output table", AccessLevel::ReadOnly).is_ok());
//! assert!(security::validate("az aks list; rm -rf /", AccessLevel::Admin).is_err());
//! ```

pub mod cli;
pub mod query;
pub mod resource;
pub mod security;
pub mod timespan;
pub mod utils;

// Re-export commonly used types
pub use query::{QueryError, QueryOptions, QuerySpec, TableMode};
pub use resource::ResourceId;
pub use security::{AccessLevel, Allowlist, CommandError};
