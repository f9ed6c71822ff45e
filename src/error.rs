//! Error classification shared by the HTTP wrapper and both tools.

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Failure kinds a tool invocation can run into.
///
/// Tools never surface these as protocol errors; each tool matches over the
/// variants and renders a readable string instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebError {
    #[error("Brave Search API key (BRAVE_API_KEY) is not configured.")]
    ConfigurationMissing,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error accessing {url}: {cause}")]
    Network { url: String, cause: String },

    #[error("HTTP error {status} accessing {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Content type is not HTML ({0}). Cannot extract text.")]
    ContentTypeMismatch(String),

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl WebError {
    /// Get the error code for this error variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => "CONFIGURATION_MISSING",
            Self::InvalidUrl(_) => "INVALID_URL",
            Self::Network { .. } => "NETWORK_ERROR",
            Self::HttpStatus { .. } => "HTTP_STATUS_ERROR",
            Self::ContentTypeMismatch(_) => "CONTENT_TYPE_MISMATCH",
            Self::Shape(_) => "SHAPE_ERROR",
            Self::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Classify a transport-level reqwest failure for `url`.
    pub(crate) fn network(url: &str, err: reqwest::Error) -> Self {
        let cause = if err.is_timeout() {
            format!("request timed out ({err})")
        } else {
            err.to_string()
        };
        Self::Network {
            url: url.to_string(),
            cause,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(WebError::ConfigurationMissing.code(), "CONFIGURATION_MISSING");
        assert_eq!(WebError::InvalidUrl("x".into()).code(), "INVALID_URL");
        assert_eq!(
            WebError::Network {
                url: "u".into(),
                cause: "c".into()
            }
            .code(),
            "NETWORK_ERROR"
        );
        assert_eq!(
            WebError::HttpStatus {
                status: 404,
                url: "u".into()
            }
            .code(),
            "HTTP_STATUS_ERROR"
        );
        assert_eq!(
            WebError::ContentTypeMismatch("image/png".into()).code(),
            "CONTENT_TYPE_MISMATCH"
        );
        assert_eq!(WebError::Shape("x".into()).code(), "SHAPE_ERROR");
        assert_eq!(WebError::Unexpected("x".into()).code(), "UNEXPECTED_ERROR");
    }

    #[test]
    fn test_display_messages() {
        let err = WebError::HttpStatus {
            status: 503,
            url: "https://example.com".into(),
        };
        assert_eq!(err.to_string(), "HTTP error 503 accessing https://example.com");

        let err = WebError::Network {
            url: "https://example.com".into(),
            cause: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "Network error accessing https://example.com: connection refused"
        );

        let err = WebError::ContentTypeMismatch("application/pdf".into());
        assert_eq!(
            err.to_string(),
            "Content type is not HTML (application/pdf). Cannot extract text."
        );
    }
}
