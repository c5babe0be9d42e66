use serde::{Deserialize, Serialize};

/// Value object holding a downsampled, compressed image as base64 text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap text that is already base64 encoded
    pub fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EncodedImage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
