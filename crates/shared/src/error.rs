use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Validation,
    Service,
    Transport,
    Configuration,
}

/// Every way a shortening attempt can fail. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenError {
    #[error("Please enter a URL to shorten.")]
    EmptyInput,
    #[error("Please enter a valid URL.")]
    InvalidUrlFormat,
    #[error("The service failed with status: {status}")]
    ServiceHttp { status: u16 },
    #[error("{message}")]
    ServiceReported { message: String },
    #[error("Received an invalid response from the service.")]
    MalformedResponse,
    #[error(
        "Could not connect to the shortening service. Please check your network connection or try again later."
    )]
    Connectivity,
    #[error("The shortening service did not respond in time. Please try again.")]
    Timeout,
    #[error("The shortening service is not configured: {reason}")]
    NotConfigured { reason: String },
}

impl ShortenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput | Self::InvalidUrlFormat => ErrorCode::Validation,
            Self::ServiceHttp { .. } | Self::ServiceReported { .. } | Self::MalformedResponse => {
                ErrorCode::Service
            }
            Self::Connectivity | Self::Timeout => ErrorCode::Transport,
            Self::NotConfigured { .. } => ErrorCode::Configuration,
        }
    }

    /// Validation failures are raised before any request is made.
    pub fn is_validation(&self) -> bool {
        self.code() == ErrorCode::Validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_failure_keeps_status_in_message() {
        let err = ShortenError::ServiceHttp { status: 503 };
        assert_eq!(err.to_string(), "The service failed with status: 503");
        assert_eq!(err.code(), ErrorCode::Service);
    }

    #[test]
    fn connectivity_message_does_not_leak_transport_details() {
        let text = ShortenError::Connectivity.to_string();
        assert!(text.contains("check your network connection"));
        assert_eq!(ShortenError::Connectivity.code(), ErrorCode::Transport);
    }

    #[test]
    fn service_reported_message_is_shown_verbatim() {
        let err = ShortenError::ServiceReported {
            message: "Bad url".to_string(),
        };
        assert_eq!(err.to_string(), "Bad url");
        assert!(!err.is_validation());
        assert!(ShortenError::EmptyInput.is_validation());
        assert!(ShortenError::InvalidUrlFormat.is_validation());
    }
}
