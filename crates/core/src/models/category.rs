//! Categories, optionally nested under a parent.

use serde::{Deserialize, Serialize};

use super::default_true;
use crate::types::{CategoryId, Entity, Ref};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "parentCategory")]
    pub parent: Option<Box<Ref<Category>>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Category {
    /// Id of the parent category, whichever shape the backend sent.
    #[must_use]
    pub fn parent_id(&self) -> Option<&CategoryId> {
        self.parent.as_deref().map(Ref::id)
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Create/update payload for a category. The image travels as a separate upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<CategoryId>,
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_as_id_or_object() {
        let bare: Category =
            serde_json::from_str(r#"{"_id":"c2","name":"Boots","parent":"c1"}"#).unwrap();
        assert_eq!(bare.parent_id().map(CategoryId::as_str), Some("c1"));

        let nested: Category = serde_json::from_str(
            r#"{"id":"c2","name":"Boots","parentCategory":{"_id":"c1","name":"Shoes"}}"#,
        )
        .unwrap();
        assert_eq!(nested.parent_id().map(CategoryId::as_str), Some("c1"));
        assert_eq!(
            nested.parent.as_deref().and_then(Ref::label),
            Some("Shoes")
        );
        assert!(nested.is_active);
    }
}
