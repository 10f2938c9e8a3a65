use egui::epaint::Shadow;
use egui::{
    vec2, Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals,
};

use crate::marker::InteractionMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthClass {
    Compact,
    Regular,
    Wide,
}

#[derive(Clone, Debug)]
pub struct AppTheme {
    pub surfaces: SurfaceTokens,
    pub text: TextTokens,
    pub markers: MarkerTokens,
    pub controls: ControlTokens,
    pub layout: LayoutTokens,
    pub breakpoints: Breakpoints,
    pub motion: MotionTokens,
}

#[derive(Clone, Debug)]
pub struct SurfaceTokens {
    pub panel_bg: Color32,
    pub card_bg: Color32,
    pub button_bg: Color32,
    pub button_hover: Color32,
    pub canvas_bg: Color32,
    pub stroke_soft: Color32,
    pub stroke_strong: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub shadow: Color32,
}

#[derive(Clone, Debug)]
pub struct TextTokens {
    pub primary: Color32,
    pub secondary: Color32,
    pub muted: Color32,
    pub hand_mode: Color32,
    pub point_mode: Color32,
    pub box_mode: Color32,
}

#[derive(Clone, Debug)]
pub struct MarkerTokens {
    pub point_fill: Color32,
    pub point_stroke: Color32,
    pub point_radius: f32,
    pub box_stroke: Color32,
    pub box_width: f32,
    pub pending: Color32,
    pub label_bg: Color32,
    pub box_label_bg: Color32,
    pub label_text: Color32,
    pub label_size: f32,
    pub crosshair: Color32,
    pub overlay_bg: Color32,
    pub overlay_size: f32,
}

#[derive(Clone, Debug)]
pub struct ControlTokens {
    pub card_rounding: f32,
    pub button_rounding: f32,
    pub chip_rounding: f32,
}

#[derive(Clone, Debug)]
pub struct LayoutTokens {
    pub space_1: f32,
    pub space_2: f32,
    pub space_3: f32,
    pub space_4: f32,
    pub panel_padding_x: f32,
    pub panel_padding_y: f32,
    pub control_gap: f32,
    pub toolbar_height: f32,
    pub status_bar_height: f32,
    pub chip_h: f32,
    pub chip_w_mode: f32,
}

#[derive(Clone, Debug)]
pub struct Breakpoints {
    pub compact_max: f32,
    pub regular_max: f32,
}

#[derive(Clone, Debug)]
pub struct MotionTokens {
    pub normal_ms: u32,
}

impl AppTheme {
    pub fn width_class(&self, width: f32) -> WidthClass {
        width_class(width, &self.breakpoints)
    }

    pub fn mode_color(&self, mode: InteractionMode) -> Color32 {
        match mode {
            InteractionMode::Hand => self.text.hand_mode,
            InteractionMode::Point => self.text.point_mode,
            InteractionMode::Box => self.text.box_mode,
        }
    }
}

pub fn width_class(width: f32, breakpoints: &Breakpoints) -> WidthClass {
    if width <= breakpoints.compact_max {
        WidthClass::Compact
    } else if width <= breakpoints.regular_max {
        WidthClass::Regular
    } else {
        WidthClass::Wide
    }
}

pub fn navigator_dark_theme() -> AppTheme {
    AppTheme {
        surfaces: SurfaceTokens {
            panel_bg: Color32::from_rgb(0x2B, 0x2B, 0x2B),
            card_bg: Color32::from_rgb(0x35, 0x35, 0x35),
            button_bg: Color32::from_rgb(0x3C, 0x3C, 0x3C),
            button_hover: Color32::from_rgb(0x4A, 0x4A, 0x4A),
            canvas_bg: Color32::from_rgb(0x28, 0x28, 0x28),
            stroke_soft: Color32::from_rgb(0x44, 0x44, 0x44),
            stroke_strong: Color32::from_rgb(0x77, 0x77, 0x77),
            accent: Color32::from_rgb(0xE0, 0x50, 0x50),
            accent_soft: Color32::from_rgb(0xC8, 0x32, 0x32),
            shadow: Color32::from_rgba_unmultiplied(0, 0, 0, 110),
        },
        text: TextTokens {
            primary: Color32::from_rgb(0xDD, 0xDD, 0xDD),
            secondary: Color32::from_rgb(0xAA, 0xAA, 0xAA),
            muted: Color32::from_rgb(0x88, 0x88, 0x88),
            hand_mode: Color32::from_rgb(0x88, 0xCC, 0xFF),
            point_mode: Color32::from_rgb(0xFF, 0x66, 0x66),
            box_mode: Color32::from_rgb(0x66, 0xDD, 0x88),
        },
        markers: MarkerTokens {
            point_fill: Color32::from_rgba_unmultiplied(255, 50, 50, 200),
            point_stroke: Color32::from_rgb(255, 50, 50),
            point_radius: 4.0,
            box_stroke: Color32::from_rgb(80, 220, 120),
            box_width: 2.0,
            pending: Color32::from_rgb(255, 210, 60),
            label_bg: Color32::from_rgba_unmultiplied(200, 50, 50, 200),
            box_label_bg: Color32::from_rgba_unmultiplied(40, 140, 70, 210),
            label_text: Color32::WHITE,
            label_size: 11.0,
            crosshair: Color32::from_rgba_unmultiplied(255, 255, 255, 110),
            overlay_bg: Color32::from_rgba_unmultiplied(0, 0, 0, 180),
            overlay_size: 13.0,
        },
        controls: ControlTokens {
            card_rounding: 6.0,
            button_rounding: 4.0,
            chip_rounding: 4.0,
        },
        layout: LayoutTokens {
            space_1: 4.0,
            space_2: 8.0,
            space_3: 12.0,
            space_4: 16.0,
            panel_padding_x: 8.0,
            panel_padding_y: 4.0,
            control_gap: 8.0,
            toolbar_height: 40.0,
            status_bar_height: 26.0,
            chip_h: 28.0,
            chip_w_mode: 56.0,
        },
        breakpoints: Breakpoints {
            compact_max: 860.0,
            regular_max: 1100.0,
        },
        motion: MotionTokens { normal_ms: 150 },
    }
}

pub fn apply_theme(ctx: &Context, theme: &AppTheme) {
    let mut style: Style = (*ctx.style()).clone();

    style.spacing.item_spacing = vec2(theme.layout.control_gap, theme.layout.space_2);
    style.spacing.button_padding = vec2(theme.layout.space_3, theme.layout.space_1);
    style.spacing.menu_margin = egui::Margin::symmetric(theme.layout.space_2, theme.layout.space_2);
    style.spacing.window_margin =
        egui::Margin::symmetric(theme.layout.space_3, theme.layout.space_3);
    style.animation_time = theme.motion.normal_ms as f32 / 1000.0;

    style.visuals = Visuals::dark();
    style.visuals.override_text_color = Some(theme.text.primary);
    style.visuals.panel_fill = theme.surfaces.panel_bg;
    style.visuals.window_fill = theme.surfaces.card_bg;
    style.visuals.faint_bg_color = theme.surfaces.panel_bg;
    style.visuals.extreme_bg_color = theme.surfaces.canvas_bg;
    style.visuals.window_rounding = Rounding::same(theme.controls.card_rounding);
    style.visuals.window_stroke = Stroke::new(1.0, theme.surfaces.stroke_soft);

    style.visuals.widgets.noninteractive.bg_fill = theme.surfaces.panel_bg;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, theme.text.secondary);
    style.visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_soft);

    style.visuals.widgets.inactive.bg_fill = theme.surfaces.button_bg;
    style.visuals.widgets.inactive.weak_bg_fill = theme.surfaces.button_bg;
    style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_soft);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, theme.text.primary);

    style.visuals.widgets.hovered.bg_fill = theme.surfaces.button_hover;
    style.visuals.widgets.hovered.weak_bg_fill = theme.surfaces.button_hover;
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, theme.surfaces.stroke_strong);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, theme.text.primary);

    style.visuals.widgets.active.bg_fill = theme.surfaces.accent_soft;
    style.visuals.widgets.active.bg_stroke = Stroke::new(1.0, theme.surfaces.accent);
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    style.visuals.selection.bg_fill = theme.surfaces.accent_soft;
    style.visuals.selection.stroke = Stroke::new(1.0, theme.surfaces.accent);
    style.visuals.popup_shadow = Shadow {
        offset: vec2(0.0, 6.0),
        blur: 16.0,
        spread: 0.0,
        color: theme.surfaces.shadow,
    };
    style.visuals.window_shadow = Shadow {
        offset: vec2(0.0, 10.0),
        blur: 24.0,
        spread: 0.0,
        color: theme.surfaces.shadow,
    };

    let rounding = Rounding::same(theme.controls.button_rounding);
    style.visuals.widgets.noninteractive.rounding = rounding;
    style.visuals.widgets.inactive.rounding = rounding;
    style.visuals.widgets.hovered.rounding = rounding;
    style.visuals.widgets.active.rounding = rounding;
    style.visuals.widgets.open.rounding = rounding;

    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(13.0, FontFamily::Proportional));
    style.text_styles.insert(
        TextStyle::Button,
        FontId::new(13.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        TextStyle::Small,
        FontId::new(12.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        TextStyle::Monospace,
        FontId::new(12.0, FontFamily::Monospace),
    );

    ctx.set_style(style);
}
