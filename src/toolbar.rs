use egui::{vec2, Align, Layout, RichText, ScrollArea, Ui};

use crate::marker::{InteractionMode, Marker};
use crate::state::Session;
use crate::theme::{AppTheme, WidthClass};
use crate::ui_controls;

#[derive(Default)]
pub struct ToolbarOutput {
    pub load: bool,
    pub reset_markers: bool,
    pub fit_view: bool,
    pub copy_coordinates: bool,
    pub show_shortcuts: bool,
    pub remove_marker: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
pub struct ToolbarPlan {
    pub show_counts: bool,
    pub show_mode_label: bool,
    pub show_copy_inline: bool,
}

pub fn plan_toolbar_items(width_class: WidthClass) -> ToolbarPlan {
    ToolbarPlan {
        show_counts: width_class != WidthClass::Compact,
        show_mode_label: width_class != WidthClass::Compact,
        show_copy_inline: width_class == WidthClass::Wide,
    }
}

pub fn counts_label(session: &Session) -> String {
    let store = &session.markers;
    format!("Points: {}  Boxes: {}", store.point_count(), store.box_count())
}

pub fn show_toolbar(
    ui: &mut Ui,
    session: &mut Session,
    theme: &AppTheme,
    width_class: WidthClass,
) -> ToolbarOutput {
    let plan = plan_toolbar_items(width_class);
    let mut out = ToolbarOutput::default();
    let button_size = vec2(0.0, theme.layout.chip_h);

    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        ui.spacing_mut().interact_size.y = theme.layout.chip_h;
        ui.spacing_mut().item_spacing = vec2(theme.layout.control_gap, 0.0);

        if ui_controls::ghost_button(ui, theme, "Load Image", button_size)
            .on_hover_text("Ctrl+O")
            .clicked()
        {
            out.load = true;
        }

        ui_controls::vertical_divider(ui, theme, 20.0);
        render_mode_group(ui, session, theme);
        ui_controls::vertical_divider(ui, theme, 20.0);

        if ui_controls::ghost_button(ui, theme, "All Points Reset", button_size)
            .on_hover_text("Ctrl+R")
            .clicked()
        {
            out.reset_markers = true;
        }
        if ui_controls::ghost_button(ui, theme, "Fit View", button_size)
            .on_hover_text("Ctrl+Shift+R")
            .clicked()
        {
            out.fit_view = true;
        }

        ui_controls::vertical_divider(ui, theme, 20.0);
        render_marker_menu(ui, session, theme, plan, &mut out);

        if plan.show_counts {
            ui.label(
                RichText::new(counts_label(session))
                    .color(theme.text.secondary)
                    .size(13.0),
            );
        }
        if plan.show_mode_label {
            ui.label(
                RichText::new(session.mode.label())
                    .color(theme.mode_color(session.mode))
                    .strong()
                    .size(13.0),
            );
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui_controls::ghost_button(ui, theme, "Shortcuts", button_size)
                .on_hover_text("Ctrl+/ or F1")
                .clicked()
            {
                out.show_shortcuts = true;
            }
        });
    });

    out
}

fn render_mode_group(ui: &mut Ui, session: &mut Session, theme: &AppTheme) {
    for mode in InteractionMode::ALL {
        let hint = match mode {
            InteractionMode::Hand => "Hand: drag to pan, double-click to fit (P cycles modes)",
            InteractionMode::Point => "Point: click to mark a point (P cycles modes)",
            InteractionMode::Box => "Box: click two corners (B toggles box mode)",
        };
        if ui_controls::mode_chip(ui, theme, mode.label(), session.mode == mode)
            .on_hover_text(hint)
            .clicked()
        {
            session.set_mode(mode);
        }
    }
}

fn render_marker_menu(
    ui: &mut Ui,
    session: &Session,
    theme: &AppTheme,
    plan: ToolbarPlan,
    out: &mut ToolbarOutput,
) {
    let markers = session.markers.markers();
    let title = format!("Markers ({})", markers.len());

    ui.add_enabled_ui(!markers.is_empty(), |ui| {
        ui.menu_button(title, |ui| {
            ui.set_min_width(260.0);
            ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                for (index, marker) in markers.iter().enumerate() {
                    ui.horizontal(|ui| {
                        let kind = match marker {
                            Marker::Point(_) => "Point",
                            Marker::Box(_) => "Box",
                        };
                        let line = format!("{:>3}. {kind:<5} {}", index + 1, marker.label());
                        ui.label(RichText::new(line).monospace());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.small_button("✕").on_hover_text("Remove").clicked() {
                                out.remove_marker = Some(index);
                                ui.close_menu();
                            }
                        });
                    });
                }
            });

            if !plan.show_copy_inline {
                ui.separator();
                if ui.button("Copy Coordinates").clicked() {
                    out.copy_coordinates = true;
                    ui.close_menu();
                }
            }
        });
    });

    if plan.show_copy_inline {
        let enabled = !markers.is_empty();
        let copy = ui.add_enabled_ui(enabled, |ui| {
            ui_controls::ghost_button(ui, theme, "Copy", vec2(0.0, theme.layout.chip_h))
                .on_hover_text("Copy coordinates as JSON (Ctrl+C)")
        });
        if copy.inner.clicked() {
            out.copy_coordinates = true;
        }
    }
}
