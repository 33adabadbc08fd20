//! Form models behind the admin create and edit screens.

use threadline_core::FormErrors;

/// Raw, editable form state for one resource.
///
/// Fields hold text exactly as typed; [`FormModel::validate`] parses it into
/// what the backend expects and reports every failing field at once.
pub trait FormModel: Clone + Send + Sync {
    /// The record an edit form starts from.
    type Record;
    /// What a valid form turns into.
    type Output: Send;

    /// An edit form pre-populated from `record`.
    fn from_record(record: &Self::Record) -> Self;

    /// Parse the form.
    ///
    /// # Errors
    ///
    /// Returns every field that is missing or malformed.
    fn validate(&self) -> Result<Self::Output, FormErrors>;
}

/// Display text for an active flag.
pub(crate) const fn status_label(is_active: bool) -> &'static str {
    if is_active { "Active" } else { "Inactive" }
}
