//! Turns the applied settings into egui styling for the article.

use crate::constants::{FALLBACK_CONTENT_WIDTH, FALLBACK_FONT_SIZE};
use article_settings::{OptionCatalog, SettingsRecord};
use eframe::egui::{self, Color32, FontFamily};

/// Parses a CSS pixel length such as `"18px"`.
pub fn parse_px(value: &str) -> Option<f32> {
    let number = value.trim().strip_suffix("px")?.trim();
    number.parse::<f32>().ok().filter(|px| *px > 0.0)
}

/// Parses a `#RRGGBB` color.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Registers every catalog font family as a named egui family backed by
/// egui's proportional fonts.
pub fn install_font_families(ctx: &egui::Context, catalog: &OptionCatalog) {
    let mut fonts = egui::FontDefinitions::default();
    let proportional = fonts
        .families
        .get(&FontFamily::Proportional)
        .cloned()
        .unwrap_or_default();

    for option in &catalog.font_families {
        fonts
            .families
            .insert(FontFamily::Name(option.value.as_str().into()), proportional.clone());
    }

    ctx.set_fonts(fonts);
}

/// Resolved styling for one frame of the article view.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleStyle {
    pub family: FontFamily,
    pub font_size: f32,
    pub text_color: Color32,
    pub background: Color32,
    pub max_width: f32,
}

impl ArticleStyle {
    pub fn from_record(record: &SettingsRecord, catalog: &OptionCatalog) -> Self {
        let family_name = &record.font_family_option.value;
        let family = if catalog
            .font_families
            .iter()
            .any(|option| &option.value == family_name)
        {
            FontFamily::Name(family_name.as_str().into())
        } else {
            log::warn!("Font family '{family_name}' is not registered");
            FontFamily::Proportional
        };

        Self {
            family,
            font_size: px_or(&record.font_size_option.value, FALLBACK_FONT_SIZE),
            text_color: color_or(&record.font_color.value, Color32::BLACK),
            background: color_or(&record.background_color.value, Color32::WHITE),
            max_width: px_or(&record.content_width.value, FALLBACK_CONTENT_WIDTH),
        }
    }

    pub fn font_id(&self, scale: f32) -> egui::FontId {
        egui::FontId::new(self.font_size * scale, self.family.clone())
    }
}

fn px_or(value: &str, fallback: f32) -> f32 {
    parse_px(value).unwrap_or_else(|| {
        log::warn!("Unparsable length '{value}', using {fallback}px");
        fallback
    })
}

fn color_or(value: &str, fallback: Color32) -> Color32 {
    parse_hex_color(value).unwrap_or_else(|| {
        log::warn!("Unparsable color '{value}'");
        fallback
    })
}
