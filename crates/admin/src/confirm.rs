//! Two-step delete confirmation.
//!
//! [`CrudScreen::request_delete`](crate::CrudScreen::request_delete) hands out
//! a [`PendingDelete`] naming the record. The only way to obtain the
//! [`ConfirmedDelete`] that the delete call requires is
//! [`PendingDelete::confirm`]; dropping or cancelling the pending value
//! leaves the backend untouched.

use std::fmt::Display;

/// A delete that has been asked for but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "nothing is deleted until the pending delete is confirmed"]
pub struct PendingDelete<Id> {
    resource: &'static str,
    id: Id,
    label: String,
}

/// Proof that the operator confirmed a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete<Id> {
    resource: &'static str,
    id: Id,
}

impl<Id: Display> PendingDelete<Id> {
    pub(crate) fn new(resource: &'static str, id: Id, label: impl Into<String>) -> Self {
        Self {
            resource,
            id,
            label: label.into(),
        }
    }

    /// Question to show before deleting.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Delete {} \"{}\" ({})? This cannot be undone.",
            self.resource, self.label, self.id
        )
    }

    /// The record's display name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn id(&self) -> &Id {
        &self.id
    }

    /// The operator said yes.
    pub fn confirm(self) -> ConfirmedDelete<Id> {
        ConfirmedDelete {
            resource: self.resource,
            id: self.id,
        }
    }

    /// The operator said no.
    pub fn cancel(self) {
        tracing::debug!(resource = self.resource, id = %self.id, "Delete cancelled");
    }
}

impl<Id> ConfirmedDelete<Id> {
    #[must_use]
    pub const fn id(&self) -> &Id {
        &self.id
    }

    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }
}

#[cfg(test)]
mod tests {
    use threadline_core::BrandId;

    use super::*;

    #[test]
    fn test_prompt_names_the_record() {
        let pending = PendingDelete::new("brand", BrandId::new("b1"), "Northbound");
        assert_eq!(
            pending.prompt(),
            "Delete brand \"Northbound\" (b1)? This cannot be undone."
        );
        let confirmed = pending.confirm();
        assert_eq!(confirmed.id().as_str(), "b1");
        assert_eq!(confirmed.resource(), "brand");
    }
}
