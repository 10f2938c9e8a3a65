use egui::{Align, Layout, RichText, Ui};

use crate::marker::PixelCoord;
use crate::state::Session;
use crate::theme::{AppTheme, WidthClass};
use crate::ui_controls;

pub const READY_TEXT: &str = "Ready - Load an image or drag & drop";

pub fn should_show_path(width_class: WidthClass, available_width: f32) -> bool {
    match width_class {
        WidthClass::Compact => available_width >= 480.0,
        WidthClass::Regular | WidthClass::Wide => true,
    }
}

pub fn coordinate_text(hover: Option<PixelCoord>) -> String {
    match hover {
        Some(pixel) => format!("x: {}  y: {}", pixel.x, pixel.y),
        None => "x: -  y: -".to_string(),
    }
}

pub fn zoom_text(zoom: f32) -> String {
    format!("{:.0}%", zoom * 100.0)
}

pub fn show_status_bar(ui: &mut Ui, session: &Session, theme: &AppTheme, width_class: WidthClass) {
    let show_path = should_show_path(width_class, ui.available_width());

    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        if let Some(message) = session.status_text() {
            ui.label(RichText::new(message).color(theme.text.primary).size(12.0));
            ui.add_space(theme.layout.space_2);
        }

        if show_path {
            let path = session
                .image
                .as_ref()
                .and_then(|image| image.path.as_ref())
                .map(|path| path.display().to_string());
            match path {
                Some(path) => {
                    ui.label(RichText::new(path).color(theme.text.muted).size(12.0));
                }
                None if !session.has_image() && session.status_text().is_none() => {
                    ui.label(RichText::new(READY_TEXT).color(theme.text.muted).size(12.0));
                }
                None => {}
            }
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if session.has_image() {
                ui.label(
                    RichText::new(zoom_text(session.view.zoom()))
                        .monospace()
                        .color(theme.text.secondary),
                );
                ui_controls::vertical_divider(ui, theme, 14.0);
            }
            ui.label(
                RichText::new(coordinate_text(session.hover))
                    .monospace()
                    .color(theme.text.secondary),
            );
        });
    });
}
