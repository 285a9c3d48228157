use serde::{Deserialize, Serialize};

/// Envelope shared by every endpoint. Callers branch on `success`, not on the status code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            total: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            total: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            total: Some(total),
            ..Self::ok(data)
        }
    }
}

impl ApiResponse<()> {
    /// Acknowledgement without a payload, e.g. after a delete.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            total: None,
        }
    }
}

/// `data` of the upload endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_envelope_carries_total() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({"success": true, "data": [1, 2, 3], "total": 3}));
    }

    #[test]
    fn failure_envelope_has_only_success_and_error() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("Package not found")).unwrap();
        assert_eq!(body, json!({"success": false, "error": "Package not found"}));
    }

    #[test]
    fn done_envelope_has_message_without_data() {
        let body = serde_json::to_value(ApiResponse::done("Venue deleted successfully")).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Venue deleted successfully"}));
    }
}
