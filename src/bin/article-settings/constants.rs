/// Width of the settings panel in pixels.
pub const PANEL_WIDTH: f32 = 360.0;

/// Side length of the square toggle button in pixels.
pub const TOGGLE_SIZE: f32 = 40.0;

/// Gap between the window edge or panel and the toggle button.
pub const TOGGLE_MARGIN: f32 = 12.0;

/// Title size relative to the body font size.
pub const TITLE_SCALE: f32 = 1.8;

/// Used when a font size option cannot be parsed.
pub const FALLBACK_FONT_SIZE: f32 = 18.0;

/// Used when a content width option cannot be parsed.
pub const FALLBACK_CONTENT_WIDTH: f32 = 948.0;

/// Directory under the user config dir holding the option catalog.
pub const CONFIG_DIR_NAME: &str = "article-settings";

/// File name of the option catalog.
pub const CATALOG_FILE_NAME: &str = "options.ron";

/// Embedded article text.
pub const ARTICLE_ASSET: &str = "article.txt";
