use crate::error::ApiError;
use async_trait::async_trait;
use core_types::{Facility, FacilityPayload};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::ApiErrorResponse;

/// The generic, abstract interface for a facility API client.
/// This trait is the contract that the bulk loader uses, allowing the
/// underlying implementation (live or mock) to be swapped out.
#[async_trait]
pub trait FacilityApi: Send + Sync {
    /// Creates a single facility and returns the record as stored by the server.
    async fn create_facility(&self, facility: &FacilityPayload) -> Result<Facility, ApiError>;
}

/// A concrete implementation of `FacilityApi` over HTTP.
#[derive(Clone)]
pub struct FacilityClient {
    client: reqwest::Client,
    base_url: String,
}

impl FacilityClient {
    /// Builds a client for the service at `base_url` (e.g. `http://localhost:8080`).
    /// Every request identifies itself with `user_agent`.
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);

        Ok(Self {
            client: reqwest::Client::builder().default_headers(headers).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ApiError::Deserialization(e.to_string()))
        } else {
            // Fall back to the raw body when it is not our JSON error shape.
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|body| body.error)
                .unwrap_or(text);
            Err(ApiError::ApiError { status: status.as_u16(), message })
        }
    }
}

#[async_trait]
impl FacilityApi for FacilityClient {
    async fn create_facility(&self, facility: &FacilityPayload) -> Result<Facility, ApiError> {
        let url = format!("{}/facilities/", self.base_url);
        let response = self.client.post(&url).json(facility).send().await?;
        Self::parse_response(response).await
    }
}
