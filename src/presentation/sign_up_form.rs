//! Sign-up screen controller.
//!
//! Owns the draft being edited and drives it through
//! `Editing → Submitting → Done`, falling back to `Editing` when the store
//! write fails. The host shell renders from [`SignUpForm::state`],
//! [`SignUpForm::is_busy`] and the drained notices.

use std::sync::Arc;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::{
    domain::{
        error::{ImageSourceError, SubmitError, ValidationError},
        models::{
            encoded_image::EncodedImage,
            user::{DocumentId, UserProfileDraft, UserRecord},
            validation,
        },
        repositories::{session_store::SessionStore, user_repository::UserRepository},
        services::{
            image_pipeline,
            image_source::{ImageRef, ImageSource, PickOutcome},
        },
    },
    usecase::sign_up_usecase::SignUpUsecase,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Done,
}

/// Where the host should take the user next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Return to the sign-in screen
    Back,
    /// Open the main area and drop the sign-up screens from the back stack
    MainClearTask,
}

/// Result of a submit tap
#[derive(Debug)]
pub enum SubmitRequest {
    /// Validation passed; the record must now be written
    Started(UserRecord),
    Rejected(ValidationError),
    /// A submit is already in flight or the form is finished
    Ignored,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    SignedIn {
        document_id: DocumentId,
        navigation: Navigation,
    },
    Failed(SubmitError),
    Rejected(ValidationError),
    Ignored,
}

pub struct SignUpForm<R: UserRepository, S: SessionStore> {
    sign_up_usecase: Arc<SignUpUsecase<R, S>>,
    draft: UserProfileDraft,
    state: FormState,
    preview: Option<DynamicImage>,
    notices: Vec<String>,
}

impl<R: UserRepository, S: SessionStore> SignUpForm<R, S> {
    pub fn new(sign_up_usecase: Arc<SignUpUsecase<R, S>>) -> Self {
        Self {
            sign_up_usecase,
            draft: UserProfileDraft::new(),
            state: FormState::Editing,
            preview: None,
            notices: Vec::new(),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &UserProfileDraft {
        &self.draft
    }

    /// Busy indicator visibility
    pub fn is_busy(&self) -> bool {
        self.state == FormState::Submitting
    }

    pub fn is_submit_enabled(&self) -> bool {
        self.state == FormState::Editing
    }

    /// Picked image as decoded, before downsampling
    pub fn preview(&self) -> Option<&DynamicImage> {
        self.preview.as_ref()
    }

    pub fn shows_add_image_hint(&self) -> bool {
        self.preview.is_none()
    }

    /// Drain the transient messages waiting to be shown
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    pub fn is_submittable(&self) -> bool {
        validation::is_submittable(&self.draft)
    }

    pub fn on_sign_in_clicked(&self) -> Navigation {
        Navigation::Back
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> bool {
        self.edit(|d| d.name = value.into())
    }

    pub fn set_email(&mut self, value: impl Into<String>) -> bool {
        self.edit(|d| d.email = value.into())
    }

    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        self.edit(|d| d.password = value.into())
    }

    pub fn set_confirm_password(&mut self, value: impl Into<String>) -> bool {
        self.edit(|d| d.confirm_password = value.into())
    }

    fn edit(&mut self, f: impl FnOnce(&mut UserProfileDraft)) -> bool {
        if self.state != FormState::Editing {
            return false;
        }
        f(&mut self.draft);
        true
    }

    /// Run the photo picker and attach the chosen image to the draft.
    ///
    /// Cancellation and unreadable images leave the draft untouched.
    /// Returns whether an image was attached.
    pub async fn pick_image<I: ImageSource>(&mut self, source: &I) -> bool {
        if self.state != FormState::Editing {
            return false;
        }

        let image = match source.pick().await {
            PickOutcome::Selected(image) => image,
            PickOutcome::Cancelled => {
                debug!("image pick cancelled");
                return false;
            }
        };

        match Self::ingest(source, &image).await {
            Ok((preview, encoded)) => {
                self.preview = Some(preview);
                self.draft.encoded_image = Some(encoded);
                true
            }
            Err(e) => {
                warn!(image = image.as_str(), error = %e, "ignoring picked image");
                false
            }
        }
    }

    async fn ingest<I: ImageSource>(
        source: &I,
        image: &ImageRef,
    ) -> Result<(DynamicImage, EncodedImage), ImageSourceError> {
        let bytes = source.open(image).await?;
        let decoded = image_pipeline::decode_source_bytes(&bytes)?;
        let encoded = image_pipeline::encode(&decoded)?;
        Ok((decoded, encoded))
    }

    /// Validate and, if the draft passes, enter `Submitting`.
    ///
    /// Taps while a submit is in flight are dropped.
    pub fn request_submit(&mut self) -> SubmitRequest {
        if self.state != FormState::Editing {
            debug!(state = ?self.state, "submit ignored");
            return SubmitRequest::Ignored;
        }

        if let Err(e) = validation::validate(&self.draft) {
            self.notices.push(e.to_string());
            return SubmitRequest::Rejected(e);
        }

        let Some(image) = self.draft.encoded_image.clone() else {
            // validation guarantees the image
            return SubmitRequest::Rejected(ValidationError::MissingImage);
        };

        self.state = FormState::Submitting;
        SubmitRequest::Started(self.draft.to_record(image))
    }

    /// Apply the store's answer to a submit started by
    /// [`SignUpForm::request_submit`].
    pub fn finish_submit(&mut self, result: Result<DocumentId, SubmitError>) -> SubmitOutcome {
        if self.state != FormState::Submitting {
            warn!(state = ?self.state, "submit result without a pending submit");
            return SubmitOutcome::Ignored;
        }

        match result {
            Ok(document_id) => {
                info!(%document_id, "signed up");
                self.state = FormState::Done;
                SubmitOutcome::SignedIn {
                    document_id,
                    navigation: Navigation::MainClearTask,
                }
            }
            Err(e) => {
                self.state = FormState::Editing;
                self.notices.push(e.to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Validate, write the record and apply the result.
    pub async fn submit(&mut self) -> SubmitOutcome
    where
        R: Send + Sync,
    {
        let record = match self.request_submit() {
            SubmitRequest::Started(record) => record,
            SubmitRequest::Rejected(e) => return SubmitOutcome::Rejected(e),
            SubmitRequest::Ignored => return SubmitOutcome::Ignored,
        };

        let result = self.sign_up_usecase.sign_up(&record).await;
        self.finish_submit(result)
    }
}
