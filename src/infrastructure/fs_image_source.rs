use std::{
    io::ErrorKind,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{
    error::ImageSourceError,
    services::image_source::{ImageRef, ImageSource, PickOutcome},
};

/// Image source backed by local file paths.
///
/// The selection is queued by the host before [`ImageSource::pick`] runs;
/// an empty queue reads as the user cancelling.
#[derive(Default)]
pub struct FsImageSource {
    selections: Mutex<Vec<PathBuf>>,
}

impl FsImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the path the next pick returns
    pub fn select(&self, path: impl Into<PathBuf>) {
        self.selections().push(path.into());
    }

    // the queue holds plain paths, so a panic elsewhere cannot leave it inconsistent
    fn selections(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.selections.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("image selection lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl ImageSource for FsImageSource {
    async fn pick(&self) -> PickOutcome {
        let next = {
            let mut selections = self.selections();
            (!selections.is_empty()).then(|| selections.remove(0))
        };
        match next {
            Some(path) => PickOutcome::Selected(ImageRef::new(path.to_string_lossy())),
            None => PickOutcome::Cancelled,
        }
    }

    async fn open(&self, image: &ImageRef) -> Result<Vec<u8>, ImageSourceError> {
        match tokio::fs::read(image.as_str()).await {
            Ok(bytes) => {
                debug!(path = image.as_str(), len = bytes.len(), "read picked image");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ImageSourceError::NotFound(image.as_str().to_string()))
            }
            Err(e) => Err(ImageSourceError::Unreadable(e.to_string())),
        }
    }
}
