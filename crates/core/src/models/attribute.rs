//! Attribute taxonomies (Color, Size, Material, ...).

use serde::{Deserialize, Serialize};

use crate::types::{AttributeId, Entity};

/// One catalog dimension used to describe products and variants.
///
/// Each kind has its own REST collection under `/attributes/{slug}` and, for
/// product-level kinds, a same-named field on the product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeKind {
    Color,
    Size,
    Material,
    Fit,
    Pattern,
    ShoeHeight,
    Occasion,
    CollarType,
    Gender,
    Season,
    Style,
}

impl AttributeKind {
    /// Every taxonomy, in the order admin screens list them.
    pub const ALL: [Self; 11] = [
        Self::Color,
        Self::Size,
        Self::Material,
        Self::Fit,
        Self::Pattern,
        Self::ShoeHeight,
        Self::Occasion,
        Self::CollarType,
        Self::Gender,
        Self::Season,
        Self::Style,
    ];

    /// Taxonomies stored on the product itself rather than on variants.
    pub const PRODUCT_LEVEL: [Self; 9] = [
        Self::Material,
        Self::Fit,
        Self::Pattern,
        Self::ShoeHeight,
        Self::Occasion,
        Self::CollarType,
        Self::Gender,
        Self::Season,
        Self::Style,
    ];

    /// Path segment of the taxonomy's collection.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Color => "colors",
            Self::Size => "sizes",
            Self::Material => "materials",
            Self::Fit => "fits",
            Self::Pattern => "patterns",
            Self::ShoeHeight => "shoe-heights",
            Self::Occasion => "occasions",
            Self::CollarType => "collar-types",
            Self::Gender => "genders",
            Self::Season => "seasons",
            Self::Style => "styles",
        }
    }

    /// Human-readable singular name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Size => "Size",
            Self::Material => "Material",
            Self::Fit => "Fit",
            Self::Pattern => "Pattern",
            Self::ShoeHeight => "Shoe height",
            Self::Occasion => "Occasion",
            Self::CollarType => "Collar type",
            Self::Gender => "Gender",
            Self::Season => "Season",
            Self::Style => "Style",
        }
    }

    /// Whether values of this kind carry a code (hex for colors).
    #[must_use]
    pub const fn has_code(self) -> bool {
        matches!(self, Self::Color)
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AttributeKind {
    type Err = String;

    /// Accepts the slug (`collar-types`), the singular (`collar-type`) or
    /// the label with any casing (`Collar Type`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Self::ALL
            .into_iter()
            .find(|kind| {
                let slug = kind.slug();
                slug == wanted
                    || slug.strip_suffix('s') == Some(wanted.as_str())
                    || kind.label().to_ascii_lowercase().replace(' ', "-") == wanted
            })
            .ok_or_else(|| format!("unknown attribute kind: {s}"))
    }
}

/// A single value within a taxonomy ("Cotton", "XL", "Navy").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    #[serde(rename = "_id", alias = "id")]
    pub id: AttributeId,
    pub name: String,
    /// Optional code, e.g. `#1f2a44` for a color.
    #[serde(default, alias = "code", alias = "hexCode")]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for AttributeValue {
    type Id = AttributeId;

    fn id(&self) -> &AttributeId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Create/update payload for an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        assert_eq!("collar-types".parse(), Ok(AttributeKind::CollarType));
        assert_eq!("collar_type".parse(), Ok(AttributeKind::CollarType));
        assert_eq!("Shoe Height".parse(), Ok(AttributeKind::ShoeHeight));
        assert_eq!("color".parse(), Ok(AttributeKind::Color));
        assert!("flavour".parse::<AttributeKind>().is_err());
    }

    #[test]
    fn test_serializes_as_product_field_name() {
        assert_eq!(
            serde_json::to_string(&AttributeKind::ShoeHeight).ok().as_deref(),
            Some("\"shoeHeight\"")
        );
    }

    #[test]
    fn test_value_accepts_hex_code_alias() {
        let json = r##"{"_id":"c1","name":"Navy","hexCode":"#1f2a44"}"##;
        let value: AttributeValue = serde_json::from_str(json).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(value.value.as_deref(), Some("#1f2a44"));
    }

    #[test]
    fn test_product_level_excludes_variant_kinds() {
        assert!(!AttributeKind::PRODUCT_LEVEL.contains(&AttributeKind::Size));
        assert!(!AttributeKind::PRODUCT_LEVEL.contains(&AttributeKind::Color));
    }
}
