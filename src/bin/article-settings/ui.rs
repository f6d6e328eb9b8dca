//! UI rendering methods for the article viewer.

use crate::ArticleSettingsApp;
use crate::article::{ArticleStyle, parse_hex_color};
use crate::constants::{PANEL_WIDTH, TITLE_SCALE, TOGGLE_MARGIN, TOGGLE_SIZE};
use crate::input::PanelBounds;
use article_settings::{FormAction, OptionValue, SettingsField};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions};

impl ArticleSettingsApp {
    /// Renders the article with the applied settings.
    pub fn show_article(&self, ctx: &egui::Context) {
        let style = &self.style;
        let frame = egui::Frame::central_panel(&ctx.style()).fill(style.background);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let Some(article) = &self.article else {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(style.text_color, "Article text is unavailable.");
                });
                return;
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                let width = style.max_width.min(ui.available_width());
                let side = ((ui.available_width() - width) / 2.0).max(0.0);

                ui.horizontal(|ui| {
                    ui.add_space(side);
                    ui.vertical(|ui| {
                        ui.set_width(width);
                        ui.add_space(TOGGLE_SIZE + TOGGLE_MARGIN * 2.0);
                        ui.label(
                            egui::RichText::new(&article.title)
                                .font(style.font_id(TITLE_SCALE))
                                .color(style.text_color)
                                .strong(),
                        );
                        for paragraph in &article.paragraphs {
                            ui.add_space(style.font_size * 0.75);
                            ui.label(
                                egui::RichText::new(paragraph)
                                    .font(style.font_id(1.0))
                                    .color(style.text_color),
                            );
                        }
                        ui.add_space(style.font_size * 2.0);
                    });
                });
            });
        });
    }

    /// Renders the arrow button that opens and closes the panel.
    pub fn show_toggle(&mut self, ctx: &egui::Context) {
        let is_open = self.panel.is_open();
        let x = if is_open {
            PANEL_WIDTH + TOGGLE_MARGIN
        } else {
            TOGGLE_MARGIN
        };

        let response = egui::Area::new(egui::Id::new("panel_toggle"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(x, TOGGLE_MARGIN))
            .show(ctx, |ui| {
                let icon = if is_open { "◀" } else { "▶" };
                ui.add(
                    egui::Button::new(egui::RichText::new(icon).size(TOGGLE_SIZE * 0.45))
                        .min_size(egui::vec2(TOGGLE_SIZE, TOGGLE_SIZE))
                        .corner_radius(TOGGLE_SIZE / 2.0),
                )
                .on_hover_text(if is_open {
                    "Close settings (Esc)"
                } else {
                    "Open settings"
                })
            })
            .inner;

        self.toggle_rect = Some(response.rect);

        if response.clicked() {
            self.panel.toggle();
        }
    }

    /// Renders the settings panel while it is open and hands its bounds to the controller.
    pub fn show_settings_panel(&mut self, ctx: &egui::Context) {
        if !self.panel.is_open() {
            self.panel.clear_root();
            return;
        }

        let screen = ctx.screen_rect();
        let response = egui::Area::new(egui::Id::new("settings_panel"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill)
                    .corner_radius(0.0)
                    .inner_margin(20.0)
                    .show(ui, |ui| {
                        ui.set_width(PANEL_WIDTH - 40.0);
                        ui.set_min_height(screen.height() - 40.0);
                        egui::ScrollArea::vertical().show(ui, |ui| {
                            self.show_form(ui);
                        });
                    });
            })
            .response;

        self.panel.set_root(PanelBounds {
            panel: response.rect,
            toggle: self.toggle_rect,
            ctx: ctx.clone(),
        });
    }

    /// Renders the form fields bound to the draft, plus the reset and apply buttons.
    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading(egui::RichText::new("SET THE PARAMETERS").strong());
        ui.add_space(16.0);

        let mut changes = Vec::new();
        for field in SettingsField::ALL {
            let selected = self.form.draft().get(field);
            let options = self.catalog.options(field);
            let changed = match field {
                SettingsField::FontSize => radio_group(ui, field, selected, options),
                _ => select(ui, field, selected, options),
            };
            if let Some(value) = changed {
                changes.push((field, value));
            }

            if field == SettingsField::FontColor {
                ui.add_space(8.0);
                ui.separator();
            }
            ui.add_space(12.0);
        }
        for (field, value) in changes {
            self.form.set_field(field, value);
        }

        if self.form.is_dirty(&self.applied) {
            ui.weak("Changes not applied yet");
        }
        ui.add_space(8.0);

        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("Reset").clicked() {
                action = Some(FormAction::Reset);
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Apply").clicked() {
                    action = Some(FormAction::Submit);
                }
            });
        });

        if let Some(action) = action {
            self.handle_form_action(action);
        }
    }

    fn handle_form_action(&mut self, action: FormAction) {
        self.form.handle(action, &mut self.applied);
        self.style = ArticleStyle::from_record(&self.applied, &self.catalog);

        let text = match action {
            FormAction::Submit => "Settings applied",
            FormAction::Reset => "Settings reset",
        };
        self.toasts.add(Toast {
            kind: ToastKind::Info,
            text: text.into(),
            options: ToastOptions::default().duration_in_seconds(2.0),
            ..Default::default()
        });
    }
}

/// A labeled drop-down; returns the newly picked option, if any.
fn select(
    ui: &mut egui::Ui,
    field: SettingsField,
    selected: &OptionValue,
    options: &[OptionValue],
) -> Option<OptionValue> {
    let mut choice = None;

    ui.strong(field.title());
    egui::ComboBox::from_id_salt(field.name())
        .selected_text(selected.title.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for option in options {
                let clicked = ui
                    .horizontal(|ui| {
                        color_swatch(ui, field, option);
                        ui.selectable_label(option == selected, option.title.as_str())
                            .clicked()
                    })
                    .inner;
                if clicked && option != selected {
                    choice = Some(option.clone());
                }
            }
        });

    choice
}

/// A labeled row of radio buttons; returns the newly picked option, if any.
fn radio_group(
    ui: &mut egui::Ui,
    field: SettingsField,
    selected: &OptionValue,
    options: &[OptionValue],
) -> Option<OptionValue> {
    let mut choice = None;

    ui.strong(field.title());
    ui.horizontal(|ui| {
        for option in options {
            if ui.radio(option == selected, option.title.as_str()).clicked() && option != selected {
                choice = Some(option.clone());
            }
        }
    });

    choice
}

/// Paints a small color preview for color fields.
fn color_swatch(ui: &mut egui::Ui, field: SettingsField, option: &OptionValue) {
    if !matches!(
        field,
        SettingsField::FontColor | SettingsField::BackgroundColor
    ) {
        return;
    }
    let Some(color) = parse_hex_color(&option.value) else {
        return;
    };

    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.painter().rect_stroke(
        rect,
        2.0,
        egui::Stroke::new(1.0, egui::Color32::GRAY),
        egui::StrokeKind::Inside,
    );
}
