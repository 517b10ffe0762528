//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `square` - Square REST API gateway and webhook verification
//! - `http` - Axum API surface and the charge-endpoint client

pub mod http;
pub mod square;
