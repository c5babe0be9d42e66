use std::time::Duration;

use tracing::{error, info, warn};

use crate::domain::{
    error::{SessionError, SubmitError},
    models::user::{DocumentId, UserRecord},
    repositories::{
        session_store::{KEY_IMAGE, KEY_IS_SIGNED_IN, KEY_NAME, SessionStore},
        user_repository::UserRepository,
    },
};

pub struct SignUpUsecase<R: UserRepository, S: SessionStore> {
    user_repository: R,
    session_store: S,
    submit_timeout: Duration,
}

impl<R: UserRepository, S: SessionStore> SignUpUsecase<R, S> {
    pub fn new(user_repository: R, session_store: S, submit_timeout: Duration) -> Self {
        Self {
            user_repository,
            session_store,
            submit_timeout,
        }
    }

    pub fn session_store(&self) -> &S {
        &self.session_store
    }

    /// Write the record once and, on success, remember the user locally.
    ///
    /// The write is bounded by the configured timeout and never retried.
    pub async fn sign_up(&self, record: &UserRecord) -> Result<DocumentId, SubmitError>
    where
        R: Send + Sync,
    {
        info!(email = %record.email, "submitting sign-up");

        let id = match tokio::time::timeout(
            self.submit_timeout,
            self.user_repository.add_user(record),
        )
        .await
        {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => {
                warn!(error = %e, "document store rejected sign-up");
                return Err(e.into());
            }
            Err(_) => {
                warn!(timeout = ?self.submit_timeout, "sign-up write timed out");
                return Err(SubmitError::Timeout(self.submit_timeout));
            }
        };

        // the record is already stored, so a local failure must not undo the sign-up
        if let Err(e) = self.remember(record) {
            error!(error = %e, document_id = %id, "failed to update session after sign-up");
        }

        info!(document_id = %id, "sign-up complete");
        Ok(id)
    }

    fn remember(&self, record: &UserRecord) -> Result<(), SessionError> {
        self.session_store.put_bool(KEY_IS_SIGNED_IN, true)?;
        self.session_store.put_string(KEY_NAME, &record.name)?;
        self.session_store.put_string(KEY_IMAGE, record.image.as_str())?;
        Ok(())
    }
}
