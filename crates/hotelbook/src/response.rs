//! The uniform result envelope returned by every service call.
//!
//! ```json
//! { "success": false, "error": "Room not found", "message": "The requested room does not exist" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Outcome of a service call.
///
/// `data` is present on success (except for operations with nothing to
/// return), `error` and `message` describe a failure. A failed call never
/// leaves partial state behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload of a successful call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Short failure label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable detail, on success or failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// A successful response with a confirmation message.
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// A successful response with no payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    /// A failed response.
    pub fn fail(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }

    /// Convert into a `Result`, pairing the failure label with its message.
    ///
    /// # Errors
    ///
    /// Returns `(error, message)` when the response reports failure.
    pub fn into_result(self) -> std::result::Result<Option<T>, (String, String)> {
        if self.success {
            Ok(self.data)
        } else {
            Err((
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
                self.message.unwrap_or_default(),
            ))
        }
    }
}

impl<T> From<ServiceError> for ApiResponse<T> {
    fn from(err: ServiceError) -> Self {
        Self::fail(err.to_string(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response() {
        let resp = ApiResponse::ok(5);
        assert!(resp.success);
        assert_eq!(resp.data, Some(5));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_fail_from_service_error() {
        let resp: ApiResponse<()> = ServiceError::InvalidCredentials.into();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(
            resp.message.as_deref(),
            Some("The email or password is incorrect")
        );
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let resp: ApiResponse<u32> = ApiResponse::done("Room deleted successfully");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("data"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ApiResponse::ok(1).into_result(), Ok(Some(1)));

        let failed: ApiResponse<u32> = ApiResponse::fail("Room not found", "gone");
        assert_eq!(
            failed.into_result(),
            Err(("Room not found".to_string(), "gone".to_string()))
        );
    }
}
