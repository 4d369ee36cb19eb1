use poem_openapi::Object;

/// Response model for health check endpoint
#[derive(Object, Debug)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,

    /// Running service version
    pub version: String,

    /// Timestamp of the health check (ISO 8601 format)
    pub timestamp: String,
}

/// Generic acknowledgment for operations with no payload
#[derive(Object, Debug)]
pub struct AckResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable message
    pub message: String,
}
