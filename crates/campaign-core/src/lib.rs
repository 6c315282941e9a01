//! Campaign Core Library
//!
//! Brief composition, submission gates, outcome states and configuration
//! shared by the API client and the command-line front end.

pub mod brief_model;
pub mod config;
pub mod error;
pub mod models;
pub mod outcome;
pub mod validation;

// Re-export commonly used types
pub use brief_model::BriefModel;
pub use config::ClientConfig;
pub use error::CoreError;
pub use outcome::{AlreadyPending, FailureKind, SubmissionOutcome};
pub use validation::{
    can_submit_brief, can_submit_upload, validate_brief, validate_upload, ValidationFailure,
};
