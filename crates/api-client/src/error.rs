use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("The API request returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}
