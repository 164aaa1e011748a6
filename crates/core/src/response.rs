//! The uniform result envelope returned by every service operation.

use serde::{Deserialize, Serialize};

/// `{ success, message, data }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Response<T> {
    /// A success carrying data.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// A success with nothing to return.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// A failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Maps the carried data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_serializes_data() {
        let response = Response::ok("Login successful", 42);

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Login successful", "data": 42})
        );
    }

    #[test]
    fn test_fail_omits_data() {
        let response: Response<i64> = Response::fail("User not found!");

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "User not found!"})
        );
    }

    #[test]
    fn test_map() {
        let response = Response::ok("ok", 2).map(|n| n * 10);
        assert_eq!(response.data, Some(20));
    }
}
