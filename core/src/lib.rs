//! Synchronous, typed client for the Azur Lane game-data API.
//!
//! # Overview
//! Four read-only operations: ship by name, ship by id, ships by category,
//! and construction info by build time. Each issues one GET, gates on HTTP
//! 200, leniently decodes the JSON envelope, and returns its payload.
//!
//! # Design
//! - `AzurLaneClient` holds an immutable `ClientConfig` and a `Transport`;
//!   it is `Send + Sync` and meant to be shared.
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`);
//!   `build_*` and `parse_*` never do I/O.
//! - No retries, caching, or pagination. Errors surface as `ApiError`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::AzurLaneClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TransportError, TransportErrorKind};
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{
    Category, Construction, Miscellaneous, MiscellaneousData, Ship, ShipSummary, Skin, Stars, Stat,
    Stats, UnknownCategory,
};
