use egui::{Align2, Context, Grid, RichText, Vec2};

use crate::theme::AppTheme;
use crate::ui_controls;

pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+O", "Load image"),
    ("P", "Cycle Hand / Point / Box mode"),
    ("B", "Toggle Box mode"),
    ("Ctrl+R", "Reset all markers"),
    ("Ctrl+Shift+R", "Fit view"),
    ("Ctrl+Z", "Undo last marker"),
    ("Ctrl+C", "Copy marker coordinates (JSON)"),
    ("Ctrl+W", "Close image"),
    ("Ctrl+/  F1", "Shortcut guide"),
    ("Esc", "Cancel box in progress"),
    ("Left click (Hand)", "Pan image"),
    ("Left click (Point)", "Mark point"),
    ("Left click (Box)", "Place box corner"),
    ("Ctrl+drag / middle drag", "Pan in any mode"),
    ("Right click", "Cancel box, else undo last marker"),
    ("Double click (Hand)", "Fit view"),
    ("Mouse wheel", "Zoom around cursor"),
    ("Drag and drop", "Load image file"),
];

pub fn show_shortcut_window(ctx: &Context, theme: &AppTheme, open: &mut bool) {
    if !*open {
        return;
    }

    egui::Window::new("Shortcut Guide")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .frame(ui_controls::card_frame(theme))
        .show(ctx, |ui| {
            Grid::new("shortcut_guide")
                .num_columns(2)
                .striped(true)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Shortcut").strong().color(theme.text.secondary));
                    ui.label(RichText::new("Action").strong().color(theme.text.secondary));
                    ui.end_row();

                    for (keys, action) in SHORTCUTS {
                        ui_controls::keycap(ui, theme, keys);
                        ui.label(*action);
                        ui.end_row();
                    }
                });
        });
}
