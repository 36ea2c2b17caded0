use http::StatusCode;

/// Everything that can go wrong between calling an endpoint and getting a
/// decoded value back.
///
/// The variants follow the request pipeline in order: the address is built,
/// the body is encoded, the transport runs the exchange, the status is
/// checked, and finally the body is decoded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The base URL and endpoint did not combine into a usable address.
    #[error("invalid request address: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized. The request was never sent.
    #[error("encode error: {0}")]
    Encode(String),

    /// The exchange itself failed: connect, TLS, or reading the body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered 401.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a non-success status other than 401.
    #[error("server returned {0}")]
    Status(StatusCode),

    /// A success response carried a body that did not parse as the
    /// expected type.
    #[error("decode error: {0}")]
    Decode(String),

    /// A success response carried no body where one was required.
    #[error("empty response body")]
    NoData,
}

impl ApiError {
    /// HTTP status behind this error, when there is one.
    ///
    /// # Example
    ///
    /// ```
    /// use http::StatusCode;
    /// use wastehub_client::ApiError;
    ///
    /// let err = ApiError::Status(StatusCode::CONFLICT);
    /// assert_eq!(err.status_code(), Some(StatusCode::CONFLICT));
    /// assert_eq!(ApiError::Unauthorized.status_code(), Some(StatusCode::UNAUTHORIZED));
    /// assert_eq!(ApiError::NoData.status_code(), None);
    /// ```
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status(code) => Some(*code),
            ApiError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            _ => None,
        }
    }

    /// True when the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// True when the server answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_accessor() {
        assert_eq!(
            ApiError::Status(StatusCode::IM_A_TEAPOT).status_code(),
            Some(StatusCode::IM_A_TEAPOT)
        );
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            Some(StatusCode::UNAUTHORIZED)
        );
        assert_eq!(ApiError::Transport("refused".to_string()).status_code(), None);
        assert_eq!(ApiError::Decode("bad json".to_string()).status_code(), None);
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        assert!(!ApiError::Status(StatusCode::FORBIDDEN).is_unauthorized());
        assert!(!ApiError::NoData.is_unauthorized());
    }

    #[test]
    fn test_is_not_found() {
        assert!(ApiError::Status(StatusCode::NOT_FOUND).is_not_found());
        assert!(!ApiError::Status(StatusCode::BAD_GATEWAY).is_not_found());
        assert!(!ApiError::Unauthorized.is_not_found());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::Encode("key must be a string".to_string()).to_string(),
            "encode error: key must be a string"
        );
        assert_eq!(ApiError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(
            ApiError::Status(StatusCode::SERVICE_UNAVAILABLE).to_string(),
            "server returned 503 Service Unavailable"
        );
        assert_eq!(ApiError::NoData.to_string(), "empty response body");
    }
}
