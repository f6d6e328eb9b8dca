//! Embedded article text and option catalog lookup.

use crate::constants::{ARTICLE_ASSET, CATALOG_FILE_NAME, CONFIG_DIR_NAME};
use article_settings::{CatalogError, OptionCatalog};
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Embeds all assets from the assets/ directory into the binary.
/// In debug mode, assets are loaded from the filesystem for faster iteration.
/// In release mode, assets are compressed and embedded in the binary.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// Errors that can occur when loading the article text.
#[derive(Error, Debug)]
pub enum ArticleLoadError {
    #[error("{0} not found in embedded assets")]
    NotFound(&'static str),
    #[error("invalid UTF-8 in article text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// The article shown behind the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl Article {
    /// First non-empty line is the title; blank lines separate paragraphs.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().skip_while(|line| line.trim().is_empty());
        let title = lines.next().map(str::trim).unwrap_or_default().to_owned();

        let mut paragraphs = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join(" "));
                    current.clear();
                }
            } else {
                current.push(line);
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join(" "));
        }

        Self { title, paragraphs }
    }
}

/// Loads the article from embedded assets.
pub fn load_article() -> Result<Article, ArticleLoadError> {
    let file = Assets::get(ARTICLE_ASSET).ok_or(ArticleLoadError::NotFound(ARTICLE_ASSET))?;
    let text = std::str::from_utf8(&file.data)?;
    Ok(Article::parse(text))
}

/// Picks the catalog file: the command line wins, then the user config dir.
fn catalog_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    let path = dirs::config_dir()?
        .join(CONFIG_DIR_NAME)
        .join(CATALOG_FILE_NAME);
    path.exists().then_some(path)
}

/// Loads the option catalog, falling back to the built-in one when no file is configured.
pub fn load_catalog(cli_path: Option<&Path>) -> Result<OptionCatalog, CatalogError> {
    match catalog_path(cli_path) {
        Some(path) => {
            let catalog = OptionCatalog::load(&path)?;
            log::info!("Loaded option catalog from {}", path.display());
            Ok(catalog)
        }
        None => {
            log::info!("Using built-in option catalog");
            Ok(OptionCatalog::builtin())
        }
    }
}
