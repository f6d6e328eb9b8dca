//! Draft editing for the settings form.
//!
//! Edits land in a draft owned by the form; the record applied to the
//! article only changes on [`SettingsFormController::commit`] or
//! [`SettingsFormController::reset`]. Closing the panel without committing
//! therefore leaves the applied record alone.

use crate::{OptionValue, SettingsError, SettingsField, SettingsRecord};

/// Actions raised by the form's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
}

#[derive(Debug, Clone)]
pub struct SettingsFormController {
    draft: SettingsRecord,
    defaults: SettingsRecord,
}

impl SettingsFormController {
    /// Starts a draft from the currently applied record.
    pub fn new(applied: &SettingsRecord, defaults: SettingsRecord) -> Self {
        Self {
            draft: applied.clone(),
            defaults,
        }
    }

    pub fn with_builtin_defaults(applied: &SettingsRecord) -> Self {
        Self::new(applied, SettingsRecord::default())
    }

    pub fn draft(&self) -> &SettingsRecord {
        &self.draft
    }

    pub fn defaults(&self) -> &SettingsRecord {
        &self.defaults
    }

    pub fn set_field(&mut self, field: SettingsField, value: OptionValue) {
        log::debug!("draft {field} -> {}", value.value);
        self.draft = self.draft.with_field(field, value);
    }

    /// Like [`set_field`](Self::set_field), with the field given by its record name.
    pub fn set_field_by_name(
        &mut self,
        name: &str,
        value: OptionValue,
    ) -> Result<(), SettingsError> {
        let field: SettingsField = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Applies the draft. The draft itself is kept as is.
    pub fn commit(&self, applied: &mut SettingsRecord) {
        *applied = self.draft.clone();
        log::info!("settings applied");
    }

    /// Returns both the draft and the applied record to the defaults.
    pub fn reset(&mut self, applied: &mut SettingsRecord) {
        self.draft = self.defaults.clone();
        *applied = self.defaults.clone();
        log::info!("settings reset to defaults");
    }

    /// Whether the draft holds edits that are not applied yet.
    pub fn is_dirty(&self, applied: &SettingsRecord) -> bool {
        self.draft != *applied
    }

    pub fn handle(&mut self, action: FormAction, applied: &mut SettingsRecord) {
        match action {
            FormAction::Submit => self.commit(applied),
            FormAction::Reset => self.reset(applied),
        }
    }
}
