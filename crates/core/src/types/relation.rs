//! Foreign-key relations that may or may not be populated.
//!
//! The backend sometimes expands a relation into the full nested record and
//! sometimes leaves the bare id. [`Ref`] accepts both shapes so callers never
//! have to guess which one a given endpoint returned.

use std::fmt::{Debug, Display};
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A record that has an identifier and a human-readable label.
pub trait Entity {
    /// The typed identifier for this record.
    type Id: Clone + Debug + Display + PartialEq + Eq + Hash;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// The name shown to people (product name, brand name, ...).
    fn label(&self) -> &str;
}

/// A relation to another entity, either populated or left as an id.
///
/// # Example
///
/// ```rust
/// use threadline_core::models::Brand;
/// use threadline_core::Ref;
///
/// let bare: Ref<Brand> = serde_json::from_str("\"b1\"").unwrap();
/// assert_eq!(bare.id().as_str(), "b1");
/// assert!(bare.populated().is_none());
///
/// let full: Ref<Brand> = serde_json::from_str(r#"{"_id":"b1","name":"Acme"}"#).unwrap();
/// assert_eq!(full.label(), Some("Acme"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[serde(bound(
    serialize = "T: Serialize, T::Id: Serialize",
    deserialize = "T: Deserialize<'de>, T::Id: Deserialize<'de>"
))]
pub enum Ref<T: Entity> {
    /// The backend expanded the relation.
    Populated(T),
    /// Only the foreign id was sent.
    Id(T::Id),
}

impl<T: Entity> Ref<T> {
    /// The referenced entity's id, whichever shape arrived.
    #[must_use]
    pub fn id(&self) -> &T::Id {
        match self {
            Self::Populated(entity) => entity.id(),
            Self::Id(id) => id,
        }
    }

    /// The nested record, when the backend populated it.
    #[must_use]
    pub const fn populated(&self) -> Option<&T> {
        match self {
            Self::Populated(entity) => Some(entity),
            Self::Id(_) => None,
        }
    }

    /// The referenced entity's label, when populated.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.populated().map(Entity::label)
    }

    /// The label when populated, otherwise the raw id.
    #[must_use]
    pub fn label_or_id(&self) -> String {
        self.label()
            .map_or_else(|| self.id().to_string(), ToOwned::to_owned)
    }
}

impl<T: Entity> From<T> for Ref<T> {
    fn from(entity: T) -> Self {
        Self::Populated(entity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{AttributeValue, Category};

    #[test]
    fn test_bare_id() {
        let category: Ref<Category> = serde_json::from_str("\"c-9\"").unwrap();
        assert_eq!(category.id().as_str(), "c-9");
        assert_eq!(category.label(), None);
        assert_eq!(category.label_or_id(), "c-9");
    }

    #[test]
    fn test_populated_object() {
        let json = r#"{"_id":"c-9","name":"Sneakers","slug":"sneakers"}"#;
        let category: Ref<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(category.id().as_str(), "c-9");
        assert_eq!(category.label(), Some("Sneakers"));
    }

    #[test]
    fn test_list_mixes_shapes() {
        let json = r##"["s-1", {"id":"s-2","name":"M","value":"#fff"}]"##;
        let sizes: Vec<Ref<AttributeValue>> = serde_json::from_str(json).unwrap();
        assert_eq!(sizes.len(), 2);
        assert!(sizes.first().unwrap().populated().is_none());
        assert_eq!(sizes.get(1).unwrap().label(), Some("M"));
    }
}
