//! Required-field validation for form models.
//!
//! Forms hold raw text exactly as typed. Validation collects every failing
//! field into [`FormErrors`] instead of stopping at the first, so a form can
//! show all problems at once.
//!
//! ```rust
//! use threadline_core::FormErrors;
//!
//! let mut errors = FormErrors::new();
//! let name = errors.required("name", "  ");
//! let price = errors.decimal("price", "12.50");
//! assert!(name.is_empty());
//! assert_eq!(price.to_string(), "12.50");
//! assert_eq!(errors.get("name"), Some("name is required"));
//! assert!(errors.into_result().is_err());
//! ```

use core::fmt;

use rust_decimal::Decimal;

use crate::types::Email;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Message suitable for showing next to the field.
    pub message: String,
}

/// All validation failures for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    /// An empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The first message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterate over the failures in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Trimmed text for a required field; records an error when blank.
    pub fn required(&mut self, field: &'static str, value: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{field} is required"));
        }
        value.to_owned()
    }

    /// A required selection (dropdown, id picker).
    pub fn selected<T: Clone>(&mut self, field: &'static str, value: Option<&T>) -> Option<T> {
        if value.is_none() {
            self.push(field, format!("{field} must be selected"));
        }
        value.cloned()
    }

    /// A required non-negative decimal amount.
    pub fn decimal(&mut self, field: &'static str, value: &str) -> Decimal {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{field} is required"));
            return Decimal::ZERO;
        }
        match value.parse::<Decimal>() {
            Ok(amount) if amount.is_sign_negative() => {
                self.push(field, format!("{field} cannot be negative"));
                Decimal::ZERO
            }
            Ok(amount) => amount,
            Err(_) => {
                self.push(field, format!("{field} must be a number"));
                Decimal::ZERO
            }
        }
    }

    /// An optional non-negative decimal; blank means `None`.
    pub fn optional_decimal(&mut self, field: &'static str, value: &str) -> Option<Decimal> {
        if value.trim().is_empty() {
            None
        } else {
            Some(self.decimal(field, value))
        }
    }

    /// A required whole number.
    pub fn count(&mut self, field: &'static str, value: &str) -> u32 {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{field} is required"));
            return 0;
        }
        value.parse().unwrap_or_else(|_| {
            self.push(field, format!("{field} must be a whole number"));
            0
        })
    }

    /// A required email address.
    pub fn email(&mut self, field: &'static str, value: &str) -> Option<Email> {
        match Email::parse(value) {
            Ok(email) => Some(email),
            Err(e) => {
                self.push(field, e.to_string());
                None
            }
        }
    }
}

/// Trimmed text for an optional field; blank means `None`.
#[must_use]
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// URL slug derived from a name: lowercase ASCII words joined by `-`.
///
/// ```rust
/// assert_eq!(threadline_core::forms::slugify("  Linen Shirt & Co. "), "linen-shirt-co");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            f.write_str(&error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

impl<'a> IntoIterator for &'a FormErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
