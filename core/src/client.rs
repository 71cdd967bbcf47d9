//! Request builder, transport driver, and response parser for the Azur Lane API.
//!
//! # Design
//! Each operation is split three ways: `build_*` produces an `HttpRequest`,
//! the configured `Transport` executes it, and `parse_*` turns the
//! `HttpResponse` into the payload. The public operations compose the three;
//! the halves stay public so a host with its own HTTP stack can drive them.
//!
//! The client holds only its immutable config and transport, so one instance
//! can serve concurrent calls from many threads.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{
    from_object, Category, Construction, ConstructionResponse, Ship, ShipResponse, ShipSummary,
    ShipsResponse,
};

/// Synchronous client for the four read-only Azur Lane endpoints.
#[derive(Debug, Clone)]
pub struct AzurLaneClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl AzurLaneClient<UreqTransport> {
    /// Client backed by a `ureq` agent using `config`'s timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self { config, transport }
    }
}

impl Default for AzurLaneClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> AzurLaneClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Fetch a ship by its name, e.g. `"Prinz Eugen"`.
    pub fn lookup_ship_by_name(&self, name: &str) -> Result<Ship, ApiError> {
        let response = self.send(&self.build_ship_by_name(name))?;
        self.parse_ship(response)
    }

    /// Fetch a ship by its API identifier.
    pub fn lookup_ship_by_id(&self, id: &str) -> Result<Ship, ApiError> {
        let response = self.send(&self.build_ship_by_id(id))?;
        self.parse_ship(response)
    }

    /// List the ships whose `category` field equals `value`, e.g.
    /// `(Category::Rarity, "Super Rare")`.
    pub fn list_ships(
        &self,
        category: Category,
        value: &str,
    ) -> Result<Vec<ShipSummary>, ApiError> {
        let response = self.send(&self.build_ships(category, value))?;
        self.parse_ships(response)
    }

    /// Fetch the construction record for a build time such as `"00:24:00"`.
    pub fn get_build_info(&self, time: &str) -> Result<Construction, ApiError> {
        let response = self.send(&self.build_build_info(time))?;
        self.parse_build_info(response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(url = %request.url, "sending request");
        let response = self.transport.execute(request).map_err(|e| {
            tracing::warn!(url = %request.url, error = %e, "request failed");
            e
        })?;
        tracing::debug!(url = %request.url, status = response.status, "received response");
        Ok(response)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_ship_by_name(&self, name: &str) -> HttpRequest {
        self.request(format!("ship?name={}", urlencoding::encode(name)))
    }

    pub fn build_ship_by_id(&self, id: &str) -> HttpRequest {
        self.request(format!("ship?id={}", urlencoding::encode(id)))
    }

    /// The category name is both the `category` selector and the key of the
    /// value parameter.
    pub fn build_ships(&self, category: Category, value: &str) -> HttpRequest {
        self.request(format!(
            "ships?category={category}&{category}={}",
            urlencoding::encode(value)
        ))
    }

    pub fn build_build_info(&self, time: &str) -> HttpRequest {
        self.request(format!("build?time={}", urlencoding::encode(time)))
    }

    fn request(&self, path_and_query: String) -> HttpRequest {
        let mut headers = vec![
            ("User-Agent".to_string(), self.config.user_agent().to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if let Some(token) = self.config.token() {
            headers.push(("Authorization".to_string(), token.to_string()));
        }
        HttpRequest {
            url: format!("{}/{path_and_query}", self.config.base_url()),
            headers,
        }
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_ship(&self, response: HttpResponse) -> Result<Ship, ApiError> {
        decode::<ShipResponse>(response).map(|envelope| envelope.ship)
    }

    pub fn parse_ships(&self, response: HttpResponse) -> Result<Vec<ShipSummary>, ApiError> {
        decode::<ShipsResponse>(response).map(|envelope| envelope.ships)
    }

    pub fn parse_build_info(&self, response: HttpResponse) -> Result<Construction, ApiError> {
        decode::<ConstructionResponse>(response).map(|envelope| envelope.construction)
    }
}

/// Gate on status 200, then decode the envelope, which must be a JSON object.
/// The envelope's own status fields are not checked against the HTTP status.
fn decode<E: DeserializeOwned>(response: HttpResponse) -> Result<E, ApiError> {
    if response.status != 200 {
        tracing::warn!(status = response.status, "unexpected response status");
        return Err(ApiError::UnexpectedStatus {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_slice::<Map<String, Value>>(&response.body)
        .and_then(from_object)
        .map_err(|e| {
            tracing::warn!(error = %e, "response body did not decode");
            ApiError::Decode(e.to_string())
        })
}
