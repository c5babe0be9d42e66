use tracing::info;

use crate::domain::{
    error::SessionError,
    models::encoded_image::EncodedImage,
    repositories::session_store::{KEY_IMAGE, KEY_IS_SIGNED_IN, KEY_NAME, SessionStore},
};

/// Snapshot of the locally cached session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub name: Option<String>,
    pub image: Option<EncodedImage>,
}

pub struct SessionUsecase<S: SessionStore> {
    session_store: S,
}

impl<S: SessionStore> SessionUsecase<S> {
    pub fn new(session_store: S) -> Self {
        Self { session_store }
    }

    /// Read the cached session on app start. `None` when nobody is signed in.
    pub fn restore(&self) -> Result<Option<SessionSnapshot>, SessionError> {
        if !self.session_store.get_bool(KEY_IS_SIGNED_IN)? {
            return Ok(None);
        }
        Ok(Some(SessionSnapshot {
            name: self.session_store.get_string(KEY_NAME)?,
            image: self.session_store.get_string(KEY_IMAGE)?.map(EncodedImage::new),
        }))
    }

    pub fn is_signed_in(&self) -> Result<bool, SessionError> {
        self.session_store.get_bool(KEY_IS_SIGNED_IN)
    }

    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.session_store.clear()?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::json_session_store::InMemorySessionStore;

    #[test]
    fn test_restore_without_session() {
        let usecase = SessionUsecase::new(InMemorySessionStore::new());
        assert_eq!(usecase.restore().unwrap(), None);
        assert!(!usecase.is_signed_in().unwrap());
    }

    #[test]
    fn test_restore_then_sign_out() {
        let store = InMemorySessionStore::new();
        store.put_bool(KEY_IS_SIGNED_IN, true).unwrap();
        store.put_string(KEY_NAME, "Sam").unwrap();
        store.put_string(KEY_IMAGE, "AAA").unwrap();
        let usecase = SessionUsecase::new(store);

        let snapshot = usecase.restore().unwrap().unwrap();
        assert_eq!(snapshot.name.as_deref(), Some("Sam"));
        assert_eq!(snapshot.image, Some(EncodedImage::new("AAA".to_string())));

        usecase.sign_out().unwrap();
        assert_eq!(usecase.restore().unwrap(), None);
    }
}
