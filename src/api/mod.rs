//! API Module
//!
//! HTTP handlers and routing over a shared `ExpiringCache`.
//!
//! # Endpoints
//! - `PUT /entries/:key` - Cache a JSON value
//! - `GET /entries/:key` - Read a cached value
//! - `DELETE /entries/:key` - Delete one entry
//! - `DELETE /entries` - Clear the namespace
//! - `GET /keys` - List stored keys
//! - `POST /sweep` - Remove expired entries
//! - `GET /size` - Bytes held under the prefix
//! - `GET /stats` - Cache counters
//! - `GET /health` - Store probe

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
