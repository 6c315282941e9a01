//! Submission gates
//!
//! Structural checks run before any network call: every required field is
//! present and non-empty. Nothing here inspects file contents; the PNG
//! restriction belongs to file selection.

use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::{BriefField, CampaignBrief, ImageFile, ProductField, UploadDraft};

/// Message shown when an upload is missing its product name or file.
pub const UPLOAD_INCOMPLETE_MESSAGE: &str = "Please provide both a product name and a file.";

/// Problems found by a gate, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    problems: Vec<String>,
}

impl ValidationFailure {
    pub fn problems(&self) -> &[String] {
        &self.problems
    }

    pub fn summary(&self) -> String {
        self.problems.join("; ")
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed: {}", self.summary())
    }
}

impl std::error::Error for ValidationFailure {}

pub fn can_submit_brief(brief: &CampaignBrief) -> bool {
    brief.validate().is_ok()
}

pub fn can_submit_upload(product_name: &str, file: Option<&ImageFile>) -> bool {
    !product_name.is_empty() && file.is_some()
}

/// Check a brief. Problems are listed in wire order: the four scalar fields,
/// then each product by position.
pub fn validate_brief(brief: &CampaignBrief) -> Result<(), ValidationFailure> {
    let errors = match brief.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut problems = Vec::new();
    for field in BriefField::ALL {
        problems.extend(field_messages(&errors, &[rust_name_brief(field), field.as_str()]));
    }

    match lookup(&errors, &["products"]) {
        Some(ValidationErrorsKind::Field(errs)) => {
            problems.extend(errs.iter().map(message_of));
        }
        Some(ValidationErrorsKind::List(items)) => {
            for (index, item) in items {
                for field in ProductField::ALL {
                    for message in field_messages(item, &[rust_name_product(field), field.as_str()])
                    {
                        problems.push(format!("Product {}: {}", index + 1, message));
                    }
                }
            }
        }
        _ => {}
    }

    if problems.is_empty() {
        problems.push(errors.to_string());
    }
    Err(ValidationFailure { problems })
}

/// Check an upload draft: product name first, then the file.
pub fn validate_upload(draft: &UploadDraft) -> Result<(), ValidationFailure> {
    let errors = match draft.validate() {
        Ok(()) => return Ok(()),
        Err(errors) => errors,
    };

    let mut problems = field_messages(&errors, &["product_name", "productName"]);
    problems.extend(field_messages(&errors, &["file"]));
    if problems.is_empty() {
        problems.push(errors.to_string());
    }
    Err(ValidationFailure { problems })
}

fn rust_name_brief(field: BriefField) -> &'static str {
    match field {
        BriefField::CampaignName => "campaign_name",
        BriefField::TargetRegion => "target_region",
        BriefField::TargetAudience => "target_audience",
        BriefField::CampaignMessage => "campaign_message",
    }
}

fn rust_name_product(field: ProductField) -> &'static str {
    match field {
        ProductField::Name => "name",
        ProductField::Description => "description",
        ProductField::VisualStyle => "visual_style",
    }
}

fn lookup<'a>(errors: &'a ValidationErrors, keys: &[&str]) -> Option<&'a ValidationErrorsKind> {
    keys.iter().find_map(|key| errors.errors().get(*key))
}

fn field_messages(errors: &ValidationErrors, keys: &[&str]) -> Vec<String> {
    match lookup(errors, keys) {
        Some(ValidationErrorsKind::Field(errs)) => errs.iter().map(message_of).collect(),
        _ => Vec::new(),
    }
}

fn message_of(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}
