//! Wire format of the shortening service.

use serde::Deserialize;

use crate::error::ShortenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// `{ status: "success"|"error", shortenedUrl?: string, message?: string }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShortenResponse {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(rename = "shortenedUrl", default)]
    pub shortened_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ShortenResponse {
    /// Decodes a response body. Anything that is not a JSON object of the expected shape is malformed.
    pub fn from_json(body: &str) -> Result<Self, ShortenError> {
        serde_json::from_str(body).map_err(|_| ShortenError::MalformedResponse)
    }

    pub fn into_short_url(self) -> Result<String, ShortenError> {
        match self.status {
            Some(ResponseStatus::Error) => match self.message {
                Some(message) if !message.trim().is_empty() => {
                    Err(ShortenError::ServiceReported {
                        message: capitalize_first(&message),
                    })
                }
                _ => Err(ShortenError::MalformedResponse),
            },
            Some(ResponseStatus::Success) => match self.shortened_url {
                Some(short_url) if !short_url.is_empty() => Ok(short_url),
                _ => Err(ShortenError::MalformedResponse),
            },
            Some(ResponseStatus::Unknown) | None => Err(ShortenError::MalformedResponse),
        }
    }
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
