//! Generic create/list/edit/delete screen.

use std::future::Future;

use threadline_core::{Entity, FormErrors};
use tracing::{info, instrument};

use crate::components::{DataTableConfig, ListView, TableRow};
use crate::confirm::{ConfirmedDelete, PendingDelete};
use crate::error::{AdminError, Result};
use crate::forms::FormModel;

/// Record id of a resource.
pub type IdOf<R> = <<R as Resource>::Record as Entity>::Id;

/// A backend collection managed from the admin.
pub trait Resource: Send + Sync {
    /// The record as listed by the backend.
    type Record: Entity<Id: Send + Sync> + Clone + Send + Sync;
    /// The create/edit form.
    type Form: FormModel<Record = Self::Record>;

    /// Singular name used in messages ("product", "brand").
    const NAME: &'static str;
    /// Whether new records can be created here.
    const CAN_CREATE: bool = true;

    /// Columns, filters and empty state of the list.
    fn table(&self) -> DataTableConfig;

    /// One list row.
    fn row(&self, record: &Self::Record) -> TableRow;

    /// A blank create form.
    fn blank_form(&self) -> Self::Form;

    /// An edit form for `record`.
    fn edit_form(&self, record: &Self::Record) -> Self::Form {
        Self::Form::from_record(record)
    }

    /// Every record.
    fn list(&self) -> impl Future<Output = Result<Vec<Self::Record>>> + Send;

    /// Create a record from a validated form.
    fn create(
        &self,
        input: <Self::Form as FormModel>::Output,
    ) -> impl Future<Output = Result<Self::Record>> + Send;

    /// Replace a record from a validated form.
    fn update(
        &self,
        id: &IdOf<Self>,
        input: <Self::Form as FormModel>::Output,
    ) -> impl Future<Output = Result<Self::Record>> + Send;

    /// Delete a record the operator has confirmed.
    fn delete(
        &self,
        target: &ConfirmedDelete<IdOf<Self>>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Whether the open form creates or edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode<Id> {
    Create,
    Edit(Id),
}

#[derive(Debug)]
struct Editor<F, Id> {
    mode: EditMode<Id>,
    form: F,
    errors: FormErrors,
}

/// List plus at most one open form for a [`Resource`].
pub struct CrudScreen<R: Resource> {
    resource: R,
    records: Vec<R::Record>,
    editor: Option<Editor<R::Form, IdOf<R>>>,
}

impl<R: Resource> CrudScreen<R> {
    #[must_use]
    pub const fn new(resource: R) -> Self {
        Self {
            resource,
            records: Vec::new(),
            editor: None,
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Fetch the list from the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails; the previous list is kept.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn load(&mut self) -> Result<&[R::Record]> {
        self.records = self.resource.list().await?;
        info!(count = self.records.len(), "Loaded");
        Ok(&self.records)
    }

    /// Records from the last load.
    #[must_use]
    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    /// A loaded record by id.
    #[must_use]
    pub fn find(&self, id: &IdOf<R>) -> Option<&R::Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// The loaded records as a table, optionally narrowed to labels
    /// containing `search` (case-insensitive).
    #[must_use]
    pub fn list_view(&self, search: Option<&str>) -> ListView {
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let rows = self
            .records
            .iter()
            .filter(|r| {
                needle
                    .as_ref()
                    .is_none_or(|n| r.label().to_lowercase().contains(n))
            })
            .map(|r| self.resource.row(r))
            .collect();
        ListView::new(&self.resource.table(), rows)
    }

    /// Open a blank create form, replacing any open form.
    ///
    /// # Errors
    ///
    /// Returns `CreateNotSupported` for read-only collections.
    pub fn open_create(&mut self) -> Result<&mut R::Form> {
        if !R::CAN_CREATE {
            return Err(AdminError::CreateNotSupported(R::NAME));
        }
        let editor = self.editor.insert(Editor {
            mode: EditMode::Create,
            form: self.resource.blank_form(),
            errors: FormErrors::new(),
        });
        Ok(&mut editor.form)
    }

    /// Open an edit form pre-populated from a loaded record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not in the loaded list.
    pub fn open_edit(&mut self, id: &IdOf<R>) -> Result<&mut R::Form> {
        let record = self
            .find(id)
            .ok_or_else(|| AdminError::not_found(R::NAME, id))?;
        let form = self.resource.edit_form(record);
        let editor = self.editor.insert(Editor {
            mode: EditMode::Edit(id.clone()),
            form,
            errors: FormErrors::new(),
        });
        Ok(&mut editor.form)
    }

    #[must_use]
    pub fn form(&self) -> Option<&R::Form> {
        self.editor.as_ref().map(|e| &e.form)
    }

    /// The open form, for editing fields.
    ///
    /// # Errors
    ///
    /// Returns `NoOpenForm` when nothing is open.
    pub fn form_mut(&mut self) -> Result<&mut R::Form> {
        self.editor
            .as_mut()
            .map(|e| &mut e.form)
            .ok_or(AdminError::NoOpenForm)
    }

    /// Whether the open form creates or edits.
    #[must_use]
    pub fn mode(&self) -> Option<&EditMode<IdOf<R>>> {
        self.editor.as_ref().map(|e| &e.mode)
    }

    /// Field errors from the last failed submit.
    #[must_use]
    pub fn errors(&self) -> Option<&FormErrors> {
        self.editor.as_ref().map(|e| &e.errors)
    }

    /// Validate and save the open form.
    ///
    /// On success the list is updated in place and the form closes. On
    /// failure the form stays open; validation failures are also kept in
    /// [`CrudScreen::errors`].
    ///
    /// # Errors
    ///
    /// Returns `NoOpenForm`, `Form` with every invalid field, or the backend
    /// error.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn submit(&mut self) -> Result<R::Record> {
        let editor = self.editor.as_mut().ok_or(AdminError::NoOpenForm)?;
        let input = match editor.form.validate() {
            Ok(input) => input,
            Err(errors) => {
                editor.errors = errors.clone();
                return Err(errors.into());
            }
        };
        editor.errors = FormErrors::new();

        let saved = match &editor.mode {
            EditMode::Create => self.resource.create(input).await?,
            EditMode::Edit(id) => self.resource.update(id, input).await?,
        };

        match self.records.iter_mut().find(|r| r.id() == saved.id()) {
            Some(slot) => *slot = saved.clone(),
            None => self.records.push(saved.clone()),
        }
        self.editor = None;
        info!(id = %saved.id(), "Saved");
        Ok(saved)
    }

    /// Discard the open form.
    pub fn close(&mut self) {
        self.editor = None;
    }

    /// Ask to delete a loaded record. Nothing is sent until the returned
    /// value is confirmed and passed to [`CrudScreen::confirm_delete`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is not in the loaded list.
    pub fn request_delete(&self, id: &IdOf<R>) -> Result<PendingDelete<IdOf<R>>> {
        let record = self
            .find(id)
            .ok_or_else(|| AdminError::not_found(R::NAME, id))?;
        Ok(PendingDelete::new(R::NAME, id.clone(), record.label()))
    }

    /// Delete a confirmed record and drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmationMismatch` if the confirmation names another
    /// resource, or the API error; the list is left unchanged.
    #[instrument(skip(self, target), fields(resource = R::NAME, id = %target.id()))]
    pub async fn confirm_delete(&mut self, target: ConfirmedDelete<IdOf<R>>) -> Result<()> {
        if target.resource() != R::NAME {
            return Err(AdminError::ConfirmationMismatch {
                resource: R::NAME,
                confirmed: target.resource(),
            });
        }
        self.resource.delete(&target).await?;
        self.records.retain(|r| r.id() != target.id());
        if matches!(self.mode(), Some(EditMode::Edit(id)) if id == target.id()) {
            self.editor = None;
        }
        info!("Deleted");
        Ok(())
    }
}
