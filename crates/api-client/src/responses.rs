use serde::Deserialize;

/// The body the facility API sends back with any non-success status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}
