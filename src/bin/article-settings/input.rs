//! Bridges egui input into the panel's event hub.

use article_settings::{Boundary, InputEvent, Key};
use eframe::egui;

/// Collects this frame's pointer presses and key presses, in delivery order.
pub fn collect_events(ctx: &egui::Context) -> Vec<InputEvent<egui::Pos2>> {
    ctx.input(|i| i.events.iter().filter_map(translate).collect())
}

fn translate(event: &egui::Event) -> Option<InputEvent<egui::Pos2>> {
    match event {
        egui::Event::PointerButton {
            pos, pressed: true, ..
        } => Some(InputEvent::PointerDown { target: *pos }),
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            ..
        } => Some(InputEvent::KeyDown {
            key: translate_key(*key),
        }),
        _ => None,
    }
}

fn translate_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Escape => Key::Escape,
        egui::Key::Enter => Key::Enter,
        egui::Key::Tab => Key::Tab,
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Character(c.to_ascii_lowercase()),
                _ => Key::Other,
            }
        }
    }
}

/// Screen regions that count as inside the settings panel.
pub struct PanelBounds {
    pub panel: egui::Rect,
    /// The toggle button sits outside the panel; pressing it must not count
    /// as an outside press, or the press would close the panel and the
    /// following click would reopen it.
    pub toggle: Option<egui::Rect>,
    pub ctx: egui::Context,
}

impl Boundary<egui::Pos2> for PanelBounds {
    fn contains(&self, target: &egui::Pos2) -> bool {
        if self.panel.contains(*target) || self.toggle.is_some_and(|rect| rect.contains(*target)) {
            return true;
        }
        // Combo box popups open on their own layers above the panel.
        self.ctx
            .layer_id_at(*target)
            .is_some_and(|layer| layer.order != egui::Order::Background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(key: egui::Key, pressed: bool, repeat: bool) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn presses_become_pointer_down() {
        let pos = egui::pos2(10.0, 20.0);
        let press = egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        };
        let release = egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        };

        assert_eq!(translate(&press), Some(InputEvent::PointerDown { target: pos }));
        assert_eq!(translate(&release), None);
    }

    #[test]
    fn key_presses_are_translated_once() {
        assert_eq!(
            translate(&key_event(egui::Key::Escape, true, false)),
            Some(InputEvent::KeyDown { key: Key::Escape })
        );
        assert_eq!(translate(&key_event(egui::Key::Escape, true, true)), None);
        assert_eq!(translate(&key_event(egui::Key::Escape, false, false)), None);
        assert_eq!(
            translate(&key_event(egui::Key::A, true, false)),
            Some(InputEvent::KeyDown {
                key: Key::Character('a')
            })
        );
        assert_eq!(
            translate(&key_event(egui::Key::ArrowLeft, true, false)),
            Some(InputEvent::KeyDown { key: Key::Other })
        );
    }

    #[test]
    fn bounds_cover_panel_and_toggle() {
        let bounds = PanelBounds {
            panel: egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(360.0, 700.0)),
            toggle: Some(egui::Rect::from_min_size(
                egui::pos2(372.0, 12.0),
                egui::vec2(40.0, 40.0),
            )),
            ctx: egui::Context::default(),
        };

        assert!(bounds.contains(&egui::pos2(100.0, 300.0)));
        assert!(bounds.contains(&egui::pos2(390.0, 30.0)));
        assert!(!bounds.contains(&egui::pos2(800.0, 300.0)));
    }
}
