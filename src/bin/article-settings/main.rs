#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod article;
mod assets;
mod constants;
mod input;
mod ui;

use article::ArticleStyle;
use article_settings::{
    EventHub, OptionCatalog, PanelVisibilityController, SettingsFormController, SettingsRecord,
};
use assets::{Article, load_article, load_catalog};
use clap::Parser;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Article viewer with adjustable display settings")]
pub struct Cli {
    #[arg(help = "Option catalog (RON) to use instead of the built-in one.", long)]
    options: Option<PathBuf>,

    #[arg(help = "Start with the settings panel open.", long, default_value_t = false)]
    open: bool,
}

/// Main application state for the article viewer.
pub struct ArticleSettingsApp {
    catalog: OptionCatalog,
    /// Settings currently in effect on the article
    applied: SettingsRecord,
    form: SettingsFormController,
    hub: EventHub<egui::Pos2>,
    panel: PanelVisibilityController<egui::Pos2>,
    article: Option<Article>,
    style: ArticleStyle,
    /// Where the toggle button was drawn last frame
    toggle_rect: Option<egui::Rect>,
    toasts: Toasts,
}

impl ArticleSettingsApp {
    fn new(cc: &eframe::CreationContext<'_>, cli: Cli) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        let catalog = match load_catalog(cli.options.as_deref()) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("{err}; using built-in options");
                add_error_toast(&mut toasts, format!("{err}. Using built-in options."));
                OptionCatalog::builtin()
            }
        };

        let article = match load_article() {
            Ok(article) => Some(article),
            Err(err) => {
                log::warn!("{err}");
                add_error_toast(&mut toasts, err.to_string());
                None
            }
        };

        article::install_font_families(&cc.egui_ctx, &catalog);

        let applied = catalog.defaults.clone();
        let form = SettingsFormController::new(&applied, catalog.defaults.clone());
        let style = ArticleStyle::from_record(&applied, &catalog);

        let hub = EventHub::new();
        let panel = PanelVisibilityController::new(&hub);
        if cli.open {
            panel.toggle();
        }

        Self {
            catalog,
            applied,
            form,
            hub,
            panel,
            article,
            style,
            toggle_rect: None,
            toasts,
        }
    }

    /// Feeds this frame's raw presses into the hub before any widget runs.
    fn dispatch_input(&self, ctx: &egui::Context) {
        for event in input::collect_events(ctx) {
            self.hub.dispatch(&event);
        }
    }
}

fn add_error_toast(toasts: &mut Toasts, text: String) {
    toasts.add(Toast {
        kind: ToastKind::Error,
        text: text.into(),
        options: ToastOptions::default()
            .duration_in_seconds(10.0)
            .show_icon(true),
        ..Default::default()
    });
}

impl eframe::App for ArticleSettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dispatch_input(ctx);

        self.show_article(ctx);
        self.show_settings_panel(ctx);
        self.show_toggle(ctx);

        self.toasts.show(ctx);
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Article Settings"),
        ..Default::default()
    };

    eframe::run_native(
        "Article Settings",
        options,
        Box::new(move |cc| Ok(Box::new(ArticleSettingsApp::new(cc, cli)))),
    )
}
