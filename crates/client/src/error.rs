/// Errors from the HTTP transport layer.
///
/// API-level failures are *not* errors — they come back as
/// [`Envelope`](crate::Envelope) values with `result: false`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be decoded as JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A non-envelope endpoint returned a non-2xx status.
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Reading or writing the persisted access token failed.
    #[error("Token storage error: {0}")]
    TokenStore(#[from] std::io::Error),
}
