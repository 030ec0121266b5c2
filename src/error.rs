use thiserror::Error;

/// Errors that can occur when fetching a source image from a remote URL
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The URL could not be parsed or uses an unsupported scheme
    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network, DNS or timeout error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Remote server answered with a non-success status
    #[error("Remote server returned HTTP {0}")]
    Status(u16),

    /// Source body exceeds the configured size limit
    #[error("Source image exceeds {limit} bytes")]
    TooLarge { limit: u64 },
}

/// Errors that can occur while producing a thumbnail
#[derive(Debug, Clone, Error)]
pub enum ThumbnailError {
    /// A query parameter is missing or malformed
    #[error("Couldn't parse {name} param: {message}")]
    InvalidParameter { name: &'static str, message: String },

    /// JPEG quality outside 1-100
    #[error("Invalid quality: {quality} (must be 1-100)")]
    InvalidQuality { quality: u8 },

    /// The source image could not be fetched
    #[error("Source fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Source bytes are not a decodable image
    #[error("Error decoding image: {message}")]
    Decode { message: String },

    /// The fitted image could not be encoded as JPEG
    #[error("Unable to encode image: {message}")]
    Encode { message: String },

    /// The blocking image task panicked or was cancelled.
    ///
    /// Panic payloads stay in the server log and never reach the client.
    #[error("Image task failed")]
    Task,
}
