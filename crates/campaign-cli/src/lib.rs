use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use campaign_core::models::{
    BriefField, CampaignBrief, GenerateResponse, ImageFile, ProductEntry, ProductField,
    UploadResponse,
};
use campaign_core::{BriefModel, ClientConfig, SubmissionOutcome};

/// Separator between the parts of a `--product` value.
pub const PRODUCT_SEPARATOR: &str = "::";

/// Where the generation service writes its output, as told to users.
pub const OUTPUT_FOLDER_HINT: &str = "/assets/output";

/// Initialize tracing for CLI binaries. Logs go to stderr.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Environment config with command-line overrides applied.
pub fn build_config(base_url: Option<&str>, timeout_secs: Option<u64>) -> Result<ClientConfig> {
    if timeout_secs == Some(0) {
        return Err(anyhow::anyhow!("--timeout-secs must be greater than zero"));
    }
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = base_url {
        config = ClientConfig {
            timeout: config.timeout,
            ..ClientConfig::new(url)
        };
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

/// Parse `NAME::DESCRIPTION::STYLE`.
pub fn parse_product(raw: &str) -> Result<ProductEntry> {
    let parts: Vec<&str> = raw.split(PRODUCT_SEPARATOR).collect();
    match parts.as_slice() {
        [name, description, style] => Ok(ProductEntry::new(*name, *description, *style)),
        _ => Err(anyhow::anyhow!(
            "Invalid product '{}': expected NAME{sep}DESCRIPTION{sep}STYLE",
            raw,
            sep = PRODUCT_SEPARATOR
        )),
    }
}

/// Parse every `--product` value, failing on the first bad one.
pub fn parse_products(raw: &[String]) -> Result<Vec<ProductEntry>> {
    raw.iter().map(String::as_str).map(parse_product).collect()
}

/// Read a brief in its wire JSON shape.
pub fn load_brief(path: &Path) -> Result<CampaignBrief> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read brief: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid brief JSON: {}", path.display()))
}

/// Values given on the command line that replace or extend the loaded brief.
#[derive(Debug, Default, Clone)]
pub struct BriefOverrides {
    pub campaign_name: Option<String>,
    pub target_region: Option<String>,
    pub target_audience: Option<String>,
    pub campaign_message: Option<String>,
    pub products: Vec<ProductEntry>,
}

impl BriefOverrides {
    fn scalar_fields(&self) -> [(BriefField, Option<&String>); 4] {
        [
            (BriefField::CampaignName, self.campaign_name.as_ref()),
            (BriefField::TargetRegion, self.target_region.as_ref()),
            (BriefField::TargetAudience, self.target_audience.as_ref()),
            (BriefField::CampaignMessage, self.campaign_message.as_ref()),
        ]
    }
}

/// Apply overrides through the model's edit operations.
///
/// Extra products are appended; the first one fills the initial blank
/// product slot of a fresh brief instead of leaving it empty.
pub fn apply_overrides(model: &mut BriefModel, overrides: &BriefOverrides) -> Result<()> {
    for (field, value) in overrides.scalar_fields() {
        if let Some(value) = value {
            model.update_brief_field(field, value.as_str());
        }
    }

    for product in &overrides.products {
        let blank_slot = model.len() == 1 && model.products()[0] == ProductEntry::default();
        let index = if blank_slot { 0 } else { model.add_product() };
        for field in ProductField::ALL {
            model.update_product_field(index, field, product.field(field))?;
        }
    }
    Ok(())
}

pub fn is_png_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// File picker equivalent: only `.png` files can be selected.
pub fn select_png(path: &Path) -> Result<ImageFile> {
    if !is_png_path(path) {
        return Err(anyhow::anyhow!(
            "Only PNG files can be uploaded: {}",
            path.display()
        ));
    }
    Ok(ImageFile::from_path(path)?)
}

pub fn render_generate_outcome(outcome: &SubmissionOutcome<GenerateResponse>) -> String {
    match outcome {
        SubmissionOutcome::Success(body) => format!(
            "Campaign Generated Successfully\n{}\nProcessed {} product(s). Check your local {} folder for the files.",
            body.message, body.products_processed, OUTPUT_FOLDER_HINT
        ),
        SubmissionOutcome::Failure { message, .. } => format!(
            "Generation Failed\nError: {}\nPlease check the campaign brief and try again.",
            message
        ),
        SubmissionOutcome::Pending => "Generating Assets...".to_string(),
        SubmissionOutcome::Idle => String::new(),
    }
}

pub fn render_upload_outcome(outcome: &SubmissionOutcome<UploadResponse>) -> String {
    match outcome {
        SubmissionOutcome::Success(body) => format!("Success! {}", body.message),
        SubmissionOutcome::Failure { message, .. } => message.clone(),
        SubmissionOutcome::Pending => "Uploading...".to_string(),
        SubmissionOutcome::Idle => String::new(),
    }
}
