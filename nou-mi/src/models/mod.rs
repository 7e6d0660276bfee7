//! Data models for nou-mi (Member Import microservice)

pub mod import;
pub mod membre;

pub use import::{CreatedMembre, ImportDetails, ImportResult, ImportRow, SkippedRow, ValidationError};
pub use membre::NewMembre;
