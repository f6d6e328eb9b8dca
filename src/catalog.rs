//! Option sets for each settings field and the record they default to.

use crate::{OptionValue, SettingsField, SettingsRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or checking an option catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read option catalog '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse option catalog: {0}")]
    ParseError(#[from] ron::de::SpannedError),
    #[error("no options listed for {0}")]
    EmptyOptions(SettingsField),
    #[error("default {0} is not one of its options")]
    DefaultNotInOptions(SettingsField),
}

/// Every option the form offers, plus the record a reset returns to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCatalog {
    pub font_families: Vec<OptionValue>,
    pub font_sizes: Vec<OptionValue>,
    pub font_colors: Vec<OptionValue>,
    pub background_colors: Vec<OptionValue>,
    pub content_widths: Vec<OptionValue>,
    pub defaults: SettingsRecord,
}

const COLORS: [(&str, &str, &str); 9] = [
    ("Black", "#000000", "black"),
    ("White", "#FFFFFF", "white"),
    ("Gray", "#C4C4C4", "gray"),
    ("Pink", "#FEAFE8", "pink"),
    ("Fuchsia", "#FD24AF", "fuchsia"),
    ("Yellow", "#FFC802", "yellow"),
    ("Green", "#80D994", "green"),
    ("Blue", "#6FC1FD", "blue"),
    ("Purple", "#5F00DD", "purple"),
];

fn colors(class_prefix: &str) -> Vec<OptionValue> {
    COLORS
        .iter()
        .map(|(title, value, name)| {
            OptionValue::new(*title, *value, format!("{class_prefix}-{name}"))
        })
        .collect()
}

impl OptionCatalog {
    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        let font_families = vec![
            OptionValue::new("Open Sans", "Open Sans", "open-sans"),
            OptionValue::new("Ubuntu", "Ubuntu", "ubuntu"),
            OptionValue::new("Cormorant Garamond", "Cormorant Garamond", "cormorant-garamond"),
            OptionValue::new("Days One", "Days One", "days-one"),
            OptionValue::new("Merriweather", "Merriweather", "merriweather"),
        ];
        let font_sizes = vec![
            OptionValue::new("18px", "18px", "font-size-18"),
            OptionValue::new("25px", "25px", "font-size-25"),
            OptionValue::new("38px", "38px", "font-size-38"),
        ];
        let font_colors = colors("font");
        let background_colors = colors("bg");
        let content_widths = vec![
            OptionValue::new("Wide", "1394px", "width-wide"),
            OptionValue::new("Narrow", "948px", "width-narrow"),
        ];

        let defaults = SettingsRecord {
            font_family_option: font_families[0].clone(),
            font_size_option: font_sizes[0].clone(),
            font_color: font_colors[0].clone(),
            background_color: background_colors[1].clone(),
            content_width: content_widths[0].clone(),
        };

        Self {
            font_families,
            font_sizes,
            font_colors,
            background_colors,
            content_widths,
            defaults,
        }
    }

    /// Ordered options for a field.
    pub fn options(&self, field: SettingsField) -> &[OptionValue] {
        match field {
            SettingsField::FontFamily => &self.font_families,
            SettingsField::FontSize => &self.font_sizes,
            SettingsField::FontColor => &self.font_colors,
            SettingsField::BackgroundColor => &self.background_colors,
            SettingsField::ContentWidth => &self.content_widths,
        }
    }

    /// Checks that every field has options and that its default is one of them.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for field in SettingsField::ALL {
            let options = self.options(field);
            if options.is_empty() {
                return Err(CatalogError::EmptyOptions(field));
            }
            if !options.contains(self.defaults.get(field)) {
                return Err(CatalogError::DefaultNotInOptions(field));
            }
        }
        Ok(())
    }

    pub fn from_ron_str(source: &str) -> Result<Self, CatalogError> {
        let catalog: Self = ron::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads and validates a RON catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let source = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }
}
