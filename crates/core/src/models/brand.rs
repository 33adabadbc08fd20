//! Brands.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::types::{BrandId, Entity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(rename = "_id", alias = "id")]
    pub id: BrandId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "image")]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Entity for Brand {
    type Id = BrandId;

    fn id(&self) -> &BrandId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Create/update payload for a brand. The logo travels as a separate upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInput {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
}
