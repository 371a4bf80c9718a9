use crate::{
    Error, Result,
    error::NO_IMAGE_DATA_MESSAGE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Body of a `:predict` call. Always asks for a single sample.
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Instance,
    pub parameters: Parameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub sample_count: u32,
}

impl PredictRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            instances: Instance {
                prompt: prompt.into(),
            },
            parameters: Parameters { sample_count: 1 },
        }
    }
}

/// Body of a `:predict` reply. The body is kept untyped; only the fields the
/// proxy acts on are read, so an unexpected shape elsewhere never fails the
/// request.
#[derive(Debug, Clone, Default)]
pub struct PredictResponse {
    pub raw: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl PredictResponse {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Entries of `predictions` that look like predictions; anything else in
    /// the array is skipped.
    pub fn predictions(&self) -> Vec<Prediction> {
        self.raw
            .get("predictions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The `error` object, when it is an object.
    pub fn upstream_error(&self) -> Option<UpstreamError> {
        self.raw
            .get("error")
            .filter(|e| e.is_object())
            .and_then(|e| serde_json::from_value(e.clone()).ok())
    }

    /// Image bytes of the first prediction, if it carries any.
    pub fn first_image(&self) -> Option<&str> {
        self.raw
            .pointer("/predictions/0/bytesBase64Encoded")
            .and_then(Value::as_str)
            .filter(|bytes| !bytes.is_empty())
    }

    fn error_message(&self) -> Option<&str> {
        self.raw.pointer("/error/message").and_then(Value::as_str)
    }

    /// Turns the first prediction into a PNG data URI. Without one, the full
    /// body is logged and the upstream's error message (or a fixed fallback)
    /// becomes the error.
    pub fn into_image_url(self) -> Result<String> {
        if let Some(bytes) = self.first_image() {
            return Ok(format!("{}{}", DATA_URI_PREFIX, bytes));
        }

        let full_response =
            serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string());
        error!(
            "Imagen API returned no predictions. Full response: {}",
            full_response
        );

        let message = self.error_message().unwrap_or(NO_IMAGE_DATA_MESSAGE);

        Err(Error::empty_result(message))
    }
}
