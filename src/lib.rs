use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

pub mod catalog;
pub mod events;
pub mod form;
pub mod panel;

pub use catalog::{CatalogError, OptionCatalog};
pub use events::{EventHub, EventKind, InputEvent, Key, ListenerId};
pub use form::{FormAction, SettingsFormController};
pub use panel::{Boundary, PanelVisibilityController};

/// A selectable option for one of the article settings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionValue {
    /// Label shown in the form (e.g., "Open Sans", "Black")
    pub title: String,
    /// Value applied to the article (e.g., "Open Sans", "18px", "#000000")
    pub value: String,
    /// Style hook for the host view
    pub class_name: String,
}

impl OptionValue {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            class_name: class_name.into(),
        }
    }
}

/// Errors raised by the settings data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown settings field: {0}")]
    InvalidField(String),
}

/// The fixed set of fields in a [`SettingsRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    FontFamily,
    FontSize,
    FontColor,
    BackgroundColor,
    ContentWidth,
}

impl SettingsField {
    pub const ALL: [Self; 5] = [
        Self::FontFamily,
        Self::FontSize,
        Self::FontColor,
        Self::BackgroundColor,
        Self::ContentWidth,
    ];

    /// Field name as it appears in serialized records.
    pub fn name(self) -> &'static str {
        match self {
            Self::FontFamily => "fontFamilyOption",
            Self::FontSize => "fontSizeOption",
            Self::FontColor => "fontColor",
            Self::BackgroundColor => "backgroundColor",
            Self::ContentWidth => "contentWidth",
        }
    }

    /// Title of the form control editing this field.
    pub fn title(self) -> &'static str {
        match self {
            Self::FontFamily => "Font",
            Self::FontSize => "Font size",
            Self::FontColor => "Font color",
            Self::BackgroundColor => "Background color",
            Self::ContentWidth => "Content width",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SettingsField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| SettingsError::InvalidField(s.to_owned()))
    }
}

/// Article display settings. Every field always holds an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    pub font_family_option: OptionValue,
    pub font_size_option: OptionValue,
    pub font_color: OptionValue,
    pub background_color: OptionValue,
    pub content_width: OptionValue,
}

static DEFAULT_SETTINGS: LazyLock<SettingsRecord> =
    LazyLock::new(|| OptionCatalog::builtin().defaults);

impl SettingsRecord {
    pub fn get(&self, field: SettingsField) -> &OptionValue {
        match field {
            SettingsField::FontFamily => &self.font_family_option,
            SettingsField::FontSize => &self.font_size_option,
            SettingsField::FontColor => &self.font_color,
            SettingsField::BackgroundColor => &self.background_color,
            SettingsField::ContentWidth => &self.content_width,
        }
    }

    fn get_mut(&mut self, field: SettingsField) -> &mut OptionValue {
        match field {
            SettingsField::FontFamily => &mut self.font_family_option,
            SettingsField::FontSize => &mut self.font_size_option,
            SettingsField::FontColor => &mut self.font_color,
            SettingsField::BackgroundColor => &mut self.background_color,
            SettingsField::ContentWidth => &mut self.content_width,
        }
    }

    /// Returns a copy of this record with one field replaced.
    #[must_use]
    pub fn with_field(&self, field: SettingsField, value: OptionValue) -> Self {
        let mut record = self.clone();
        *record.get_mut(field) = value;
        record
    }
}

impl Default for SettingsRecord {
    /// The built-in default record, shared by the whole process.
    fn default() -> Self {
        DEFAULT_SETTINGS.clone()
    }
}
