//! Inline image data returned by the image model.

use base64::Engine;
use serde::{Deserialize, Serialize};

/// A base64-encoded image with its MIME type.
///
/// # Examples
///
/// ```
/// use socialnexus_core::ImagePayload;
///
/// let image = ImagePayload::from_bytes("image/png", &[0x89, 0x50, 0x4E, 0x47]);
/// let url = image.to_data_url();
/// assert!(url.starts_with("data:image/png;base64,"));
/// assert_eq!(ImagePayload::from_data_url(&url), Some(image));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// MIME type, e.g. `image/png`
    mime_type: String,
    /// Base64 data without any `data:` prefix
    data: String,
}

impl ImagePayload {
    /// Wrap already-encoded base64 data.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Encode raw bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(
            mime_type,
            base64::engine::general_purpose::STANDARD.encode(bytes),
        )
    }

    /// Parse a `data:<mime>;base64,<data>` URL.
    pub fn from_data_url(url: &str) -> Option<Self> {
        let rest = url.strip_prefix("data:")?;
        let (mime_type, data) = rest.split_once(";base64,")?;
        Some(Self::new(mime_type, data))
    }

    /// Render as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the base64 data.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.data)
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_data_urls_are_rejected() {
        assert!(ImagePayload::from_data_url("https://example.com/a.png").is_none());
        assert!(ImagePayload::from_data_url("data:image/png,raw").is_none());
    }

    #[test]
    fn decode_returns_original_bytes() {
        let bytes = b"not really a png";
        let image = ImagePayload::from_bytes("image/png", bytes);
        assert_eq!(image.decode().unwrap(), bytes.to_vec());
    }
}
