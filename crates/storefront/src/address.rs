//! Shipping address form shared by checkout and the address book.

use threadline_core::FormErrors;
use threadline_core::forms::optional;
use threadline_core::models::ShippingAddress;

/// Raw address fields as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    pub full_name: String,
    pub phone: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl AddressForm {
    /// Pre-fill from a saved or previously entered address.
    #[must_use]
    pub fn from_address(address: &ShippingAddress) -> Self {
        Self {
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            line1: address.line1.clone(),
            line2: address.line2.clone().unwrap_or_default(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }

    /// Check required fields (name, phone, line 1, city, state, postal code).
    ///
    /// # Errors
    ///
    /// Returns every missing field at once.
    pub fn validate(&self) -> Result<ShippingAddress, FormErrors> {
        let mut errors = FormErrors::new();
        let address = ShippingAddress {
            full_name: errors.required("full_name", &self.full_name),
            phone: errors.required("phone", &self.phone),
            line1: errors.required("line1", &self.line1),
            line2: optional(&self.line2),
            city: errors.required("city", &self.city),
            state: errors.required("state", &self.state),
            postal_code: errors.required("postal_code", &self.postal_code),
            country: self.country.trim().to_owned(),
        };
        errors.into_result().map(|()| address)
    }
}
