use thiserror::Error;

#[derive(Debug, Error)]
pub enum OzonApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid seller API request: {0}")]
    RequestError(String),
    #[error("Could not deserialize seller API response: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
}
