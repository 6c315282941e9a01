use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::CoreError;

/// A single product inside a campaign brief.
///
/// `name` is the exact-match key the generation backend uses to find a
/// previously uploaded asset, so it is transmitted byte-for-byte.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductEntry {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Visual style is required"))]
    pub visual_style: String,
}

impl ProductEntry {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        visual_style: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            visual_style: visual_style.into(),
        }
    }

    pub fn field(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Description => &self.description,
            ProductField::VisualStyle => &self.visual_style,
        }
    }

    pub(crate) fn set_field(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Name => self.name = value,
            ProductField::Description => self.description = value,
            ProductField::VisualStyle => self.visual_style = value,
        }
    }
}

/// Campaign brief as sent to `POST {base}/generate`.
///
/// Field order matches the wire document: the four scalar fields, then the
/// ordered product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBrief {
    #[validate(length(min = 1, message = "Campaign name is required"))]
    pub campaign_name: String,
    #[validate(length(min = 1, message = "Target region is required"))]
    pub target_region: String,
    #[validate(length(min = 1, message = "Target audience is required"))]
    pub target_audience: String,
    #[validate(length(min = 1, message = "Campaign message is required"))]
    pub campaign_message: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "At least one product is required"), nested)]
    pub products: Vec<ProductEntry>,
}

impl Default for CampaignBrief {
    /// Empty scalar fields and a single empty product, the state of a fresh form.
    fn default() -> Self {
        Self {
            campaign_name: String::new(),
            target_region: String::new(),
            target_audience: String::new(),
            campaign_message: String::new(),
            products: vec![ProductEntry::default()],
        }
    }
}

impl CampaignBrief {
    pub fn field(&self, field: BriefField) -> &str {
        match field {
            BriefField::CampaignName => &self.campaign_name,
            BriefField::TargetRegion => &self.target_region,
            BriefField::TargetAudience => &self.target_audience,
            BriefField::CampaignMessage => &self.campaign_message,
        }
    }

    pub(crate) fn set_field(&mut self, field: BriefField, value: String) {
        match field {
            BriefField::CampaignName => self.campaign_name = value,
            BriefField::TargetRegion => self.target_region = value,
            BriefField::TargetAudience => self.target_audience = value,
            BriefField::CampaignMessage => self.campaign_message = value,
        }
    }
}

/// Top-level scalar fields of a brief, addressed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BriefField {
    CampaignName,
    TargetRegion,
    TargetAudience,
    CampaignMessage,
}

impl BriefField {
    pub const ALL: [BriefField; 4] = [
        BriefField::CampaignName,
        BriefField::TargetRegion,
        BriefField::TargetAudience,
        BriefField::CampaignMessage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BriefField::CampaignName => "campaignName",
            BriefField::TargetRegion => "targetRegion",
            BriefField::TargetAudience => "targetAudience",
            BriefField::CampaignMessage => "campaignMessage",
        }
    }
}

impl fmt::Display for BriefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BriefField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BriefField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// Per-product fields, addressed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Description,
    VisualStyle,
}

impl ProductField {
    pub const ALL: [ProductField; 3] = [
        ProductField::Name,
        ProductField::Description,
        ProductField::VisualStyle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::VisualStyle => "visualStyle",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}
