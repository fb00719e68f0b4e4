//! Async client for the upstream account/inventory directory.
//!
//! The directory exposes a single authenticated endpoint accepting batched
//! queries (`{query, variables}` request body, `{data, errors}` response
//! envelope). This crate owns the transport, the four query shapes the
//! aggregation layer issues, and their response types. `statusdeck-core`
//! maps the raw responses into domain types and user-facing diagnostics.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{CountsFilter, DirectoryClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{AccountResponse, AddressResponse, CountsResponse, IpAssignmentResponse};
