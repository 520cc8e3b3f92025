use serde::Deserialize;
use serde_json::Value;

/// Parsed `{status, data, message}` envelope plus the HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub http_status: u16,
    /// `status` field of the JSON body, when the server sent one.
    pub body_status: Option<u16>,
    pub data: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiResponse {
    pub fn new(http_status: u16, data: Option<Value>) -> Self {
        Self {
            http_status,
            body_status: None,
            data,
            message: None,
        }
    }

    /// Parse a response body. A body that is empty or not the JSON envelope
    /// carries no data; the HTTP status alone decides success.
    pub fn from_body(http_status: u16, body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::new(http_status, None);
        }

        let envelope: Envelope = match serde_json::from_slice(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!(
                    http_status,
                    bytes = body.len(),
                    error = %e,
                    "Response body is not a JSON envelope, ignoring it"
                );
                return Self::new(http_status, None);
            }
        };

        Self {
            http_status,
            body_status: envelope
                .status
                .as_ref()
                .and_then(Value::as_u64)
                .and_then(|status| u16::try_from(status).ok()),
            data: envelope.data,
            message: envelope.message,
        }
    }

    /// HTTP 200, and the body status (if any) is 200 as well.
    pub fn is_success(&self) -> bool {
        self.http_status == 200 && self.body_status.map_or(true, |status| status == 200)
    }

    /// Status used when reporting a failure.
    pub fn status(&self) -> u16 {
        if self.http_status != 200 {
            self.http_status
        } else {
            self.body_status.unwrap_or(self.http_status)
        }
    }

    /// A non-negative integer at `data.<key>`, if present and well-formed.
    pub fn data_count(&self, key: &str) -> Option<u64> {
        self.data.as_ref()?.get(key)?.as_u64()
    }

    /// A boolean at `data.<key>`, if present and well-formed.
    pub fn data_flag(&self, key: &str) -> Option<bool> {
        self.data.as_ref()?.get(key)?.as_bool()
    }
}
