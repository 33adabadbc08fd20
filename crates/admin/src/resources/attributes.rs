//! Attribute values, one collection per taxonomy.

use threadline_client::ApiClient;
use threadline_core::forms::optional;
use threadline_core::models::{AttributeInput, AttributeKind, AttributeValue};
use threadline_core::{AttributeId, FormErrors};

use crate::components::{DataTableConfig, TableRow, attributes_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::Result;
use crate::forms::FormModel;
use crate::resource::Resource;

/// Attribute value create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeForm {
    pub name: String,
    /// Code such as a hex color.
    pub value: String,
    pub description: String,
    /// Whether `value` must be filled (colors).
    pub requires_value: bool,
}

impl AttributeForm {
    /// A blank form for `kind`.
    #[must_use]
    pub fn for_kind(kind: AttributeKind) -> Self {
        Self {
            requires_value: kind.has_code(),
            ..Self::default()
        }
    }
}

impl FormModel for AttributeForm {
    type Record = AttributeValue;
    type Output = AttributeInput;

    fn from_record(record: &AttributeValue) -> Self {
        Self {
            name: record.name.clone(),
            value: record.value.clone().unwrap_or_default(),
            description: record.description.clone().unwrap_or_default(),
            requires_value: false,
        }
    }

    fn validate(&self) -> std::result::Result<AttributeInput, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let value = if self.requires_value {
            let code = errors.required("value", &self.value);
            if !code.is_empty() && !is_hex_color(&code) {
                errors.push("value", "value must be a hex color like #1f2a44");
            }
            Some(code)
        } else {
            optional(&self.value)
        };
        errors.into_result().map(|()| AttributeInput {
            name,
            value,
            description: optional(&self.description),
        })
    }
}

fn is_hex_color(code: &str) -> bool {
    code.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// The values of one taxonomy.
#[derive(Debug, Clone)]
pub struct Attributes {
    client: ApiClient,
    kind: AttributeKind,
}

impl Attributes {
    #[must_use]
    pub const fn new(client: ApiClient, kind: AttributeKind) -> Self {
        Self { client, kind }
    }

    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        self.kind
    }
}

impl Resource for Attributes {
    type Record = AttributeValue;
    type Form = AttributeForm;

    const NAME: &'static str = "attribute value";

    fn table(&self) -> DataTableConfig {
        attributes_table_config(self.kind)
    }

    fn row(&self, record: &AttributeValue) -> TableRow {
        TableRow::new(record.id.as_str())
            .cell("name", &record.name)
            .cell("value", record.value.as_deref().unwrap_or("-"))
            .cell("description", record.description.as_deref().unwrap_or_default())
    }

    fn blank_form(&self) -> AttributeForm {
        AttributeForm::for_kind(self.kind)
    }

    fn edit_form(&self, record: &AttributeValue) -> AttributeForm {
        AttributeForm {
            requires_value: self.kind.has_code(),
            ..AttributeForm::from_record(record)
        }
    }

    async fn list(&self) -> Result<Vec<AttributeValue>> {
        Ok(self.client.attributes().list(self.kind).await?)
    }

    async fn create(&self, input: AttributeInput) -> Result<AttributeValue> {
        Ok(self.client.attributes().create(self.kind, &input).await?)
    }

    async fn update(&self, id: &AttributeId, input: AttributeInput) -> Result<AttributeValue> {
        Ok(self.client.attributes().update(self.kind, id, &input).await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<AttributeId>) -> Result<()> {
        Ok(self.client.attributes().delete(self.kind, target.id()).await?)
    }
}
