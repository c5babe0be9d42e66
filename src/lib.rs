//! Sign-up flow for a chat client: profile image ingestion, draft
//! validation, submission to a document store and the users list renderer.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod telemetry;
pub mod usecase;
