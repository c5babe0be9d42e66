use async_trait::async_trait;

use crate::domain::error::ImageSourceError;

/// Opaque reference to an image the user selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(ImageRef),
    Cancelled,
}

/// Platform photo picker
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Show the picker and wait for the user to choose or cancel
    async fn pick(&self) -> PickOutcome;

    /// Fetch the raw bytes behind a reference returned by [`ImageSource::pick`]
    async fn open(&self, image: &ImageRef) -> Result<Vec<u8>, ImageSourceError>;
}
