use egui::{
    vec2, Align2, Color32, Context, CursorIcon, FontId, Painter, PointerButton, Pos2, Rect,
    Response, Sense, Shape, Stroke, TextureHandle, TextureId, Ui, Vec2,
};

use crate::marker::{InteractionMode, Marker, PixelCoord};
use crate::state::{CanvasEvent, Session};
use crate::theme::AppTheme;
use crate::view::{ViewTransform, ZOOM_STEP};

// Scroll points per wheel notch.
const WHEEL_NOTCH_POINTS: f32 = 50.0;
const MAX_WHEEL_STEPS: f32 = 3.0;
const OVERLAY_OFFSET: Vec2 = Vec2::new(15.0, -10.0);

pub fn show_canvas(ui: &mut Ui, ctx: &Context, session: &mut Session, theme: &AppTheme) {
    let (canvas_rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let painter = ui.painter_at(canvas_rect);
    painter.rect_filled(canvas_rect, 0.0, theme.surfaces.canvas_bg);

    let texture_id = match session.image.as_mut() {
        Some(image) => {
            image.ensure_texture(ctx);
            image.texture.as_ref().map(TextureHandle::id)
        }
        None => None,
    };
    let Some(texture_id) = texture_id else {
        draw_empty_canvas(&painter, canvas_rect, theme);
        return;
    };

    session.set_viewport(canvas_rect.size());

    for event in collect_events(ctx, &response, canvas_rect, session.panning) {
        if session.handle_event(event) {
            ctx.request_repaint();
        }
    }

    if response.hovered() || session.panning {
        ctx.set_cursor_icon(cursor_for(session));
    }

    let origin = canvas_rect.min.to_vec2();
    draw_image(&painter, texture_id, &session.view, origin);
    draw_markers(&painter, session, origin, theme);
    draw_pending_box(&painter, session, origin, theme);
    draw_crosshair(&painter, session, canvas_rect, theme);
    draw_coordinate_overlay(&painter, session, origin, theme);
}

fn collect_events(
    ctx: &Context,
    response: &Response,
    canvas_rect: Rect,
    panning: bool,
) -> Vec<CanvasEvent> {
    let (pointer, scroll_y, zoom_delta, pan_modifier) = ctx.input(|input| {
        (
            input.pointer.clone(),
            input.raw_scroll_delta.y,
            input.zoom_delta(),
            input.modifiers.command || input.modifiers.ctrl,
        )
    });
    let to_local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();
    let mut events = Vec::new();

    match pointer.hover_pos().filter(|pos| canvas_rect.contains(*pos)) {
        Some(pos) => events.push(CanvasEvent::Hover { pos: to_local(pos) }),
        None => events.push(CanvasEvent::Leave),
    }

    if response.hovered() {
        if let Some(pos) = pointer.interact_pos().map(to_local) {
            if pointer.button_pressed(PointerButton::Primary) {
                events.push(CanvasEvent::PrimaryPress { pos, pan_modifier });
            }
            if pointer.button_pressed(PointerButton::Middle) {
                events.push(CanvasEvent::MiddlePress { pos });
            }
            if pointer.button_pressed(PointerButton::Secondary) {
                events.push(CanvasEvent::SecondaryPress);
            }
            if response.double_clicked() {
                events.push(CanvasEvent::DoubleClick { pos });
            }

            let steps = zoom_steps(scroll_y, zoom_delta, pan_modifier);
            if steps != 0.0 {
                events.push(CanvasEvent::Wheel { pos, steps });
            }
        }
    }

    if panning {
        let delta = pointer.delta();
        if delta != Vec2::ZERO {
            events.push(CanvasEvent::Drag { delta });
        }
    }

    if pointer.any_released() {
        events.push(CanvasEvent::Release);
    }

    events
}

// egui folds a ctrl/cmd wheel notch into both the scroll delta and the zoom
// factor, so only one of them may count.
pub fn zoom_steps(scroll_y: f32, zoom_delta: f32, zoom_modifier: bool) -> f32 {
    if zoom_modifier {
        pinch_steps(zoom_delta)
    } else {
        wheel_steps(scroll_y) + pinch_steps(zoom_delta)
    }
}

pub fn wheel_steps(scroll_y: f32) -> f32 {
    (scroll_y / WHEEL_NOTCH_POINTS).clamp(-MAX_WHEEL_STEPS, MAX_WHEEL_STEPS)
}

pub fn pinch_steps(zoom_delta: f32) -> f32 {
    if zoom_delta <= 0.0 || (zoom_delta - 1.0).abs() <= f32::EPSILON {
        return 0.0;
    }
    (zoom_delta.ln() / ZOOM_STEP.ln()).clamp(-MAX_WHEEL_STEPS, MAX_WHEEL_STEPS)
}

fn cursor_for(session: &Session) -> CursorIcon {
    if session.panning {
        return CursorIcon::Grabbing;
    }
    match session.mode {
        InteractionMode::Hand => CursorIcon::Grab,
        InteractionMode::Point | InteractionMode::Box => CursorIcon::Crosshair,
    }
}

fn draw_empty_canvas(painter: &Painter, rect: Rect, theme: &AppTheme) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "Load an image (Ctrl+O) or drop a file here",
        FontId::proportional(17.0),
        theme.text.muted,
    );
}

fn draw_image(painter: &Painter, texture_id: TextureId, view: &ViewTransform, origin: Vec2) {
    let Some(image_rect) = view.image_rect() else {
        return;
    };
    painter.image(
        texture_id,
        image_rect.translate(origin),
        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
        Color32::WHITE,
    );
}

fn pixel_center(view: &ViewTransform, pixel: PixelCoord, origin: Vec2) -> Pos2 {
    view.to_screen(pixel.to_pos2() + vec2(0.5, 0.5)) + origin
}

fn pixel_corner(view: &ViewTransform, pixel: PixelCoord, origin: Vec2) -> Pos2 {
    view.to_screen(pixel.to_pos2()) + origin
}

fn draw_markers(painter: &Painter, session: &Session, origin: Vec2, theme: &AppTheme) {
    for marker in session.markers.markers() {
        draw_marker(painter, marker, &session.view, origin, theme);
    }
}

fn draw_marker(
    painter: &Painter,
    marker: &Marker,
    view: &ViewTransform,
    origin: Vec2,
    theme: &AppTheme,
) {
    let tokens = &theme.markers;
    match marker {
        Marker::Point(coord) => {
            let center = pixel_center(view, *coord, origin);
            painter.circle(
                center,
                tokens.point_radius,
                tokens.point_fill,
                Stroke::new(1.5, tokens.point_stroke),
            );
            draw_label(
                painter,
                center + vec2(tokens.point_radius + 4.0, -8.0),
                marker.label(),
                tokens.label_bg,
                theme,
            );
        }
        Marker::Box(corners) => {
            let rect = Rect::from_min_max(
                pixel_corner(view, corners.min, origin),
                pixel_corner(view, corners.max, origin),
            );
            painter.rect_stroke(rect, 0.0, Stroke::new(tokens.box_width, tokens.box_stroke));
            draw_label(
                painter,
                rect.min + vec2(0.0, -18.0),
                marker.label(),
                tokens.box_label_bg,
                theme,
            );
        }
    }
}

fn draw_pending_box(painter: &Painter, session: &Session, origin: Vec2, theme: &AppTheme) {
    let Some(corner) = session.markers.pending_corner() else {
        return;
    };
    let tokens = &theme.markers;
    let anchor = pixel_corner(&session.view, corner, origin);

    if let Some(pointer) = session.pointer {
        let current = pixel_corner(&session.view, session.view.to_pixel(pointer), origin);
        let preview = Rect::from_two_pos(anchor, current);
        let outline = [
            preview.left_top(),
            preview.right_top(),
            preview.right_bottom(),
            preview.left_bottom(),
            preview.left_top(),
        ];
        painter.extend(Shape::dashed_line(
            &outline,
            Stroke::new(1.5, tokens.pending),
            6.0,
            4.0,
        ));
    }

    painter.circle(
        anchor,
        tokens.point_radius,
        tokens.pending,
        Stroke::new(1.0, Color32::BLACK),
    );
    draw_label(
        painter,
        anchor + vec2(tokens.point_radius + 4.0, -8.0),
        corner.label(),
        tokens.overlay_bg,
        theme,
    );
}

fn draw_crosshair(painter: &Painter, session: &Session, canvas_rect: Rect, theme: &AppTheme) {
    let Some(pointer) = session.pointer else {
        return;
    };
    let pos = pointer + canvas_rect.min.to_vec2();
    let stroke = Stroke::new(1.0, theme.markers.crosshair);
    painter.hline(canvas_rect.x_range(), pos.y, stroke);
    painter.vline(pos.x, canvas_rect.y_range(), stroke);
}

fn draw_coordinate_overlay(painter: &Painter, session: &Session, origin: Vec2, theme: &AppTheme) {
    let (Some(pixel), Some(pointer)) = (session.hover, session.pointer) else {
        return;
    };
    let idx = painter.add(Shape::Noop);
    let text_rect = painter.text(
        pointer + origin + OVERLAY_OFFSET,
        Align2::LEFT_TOP,
        pixel.label(),
        FontId::monospace(theme.markers.overlay_size),
        Color32::WHITE,
    );
    painter.set(
        idx,
        Shape::rect_filled(text_rect.expand(3.0), 2.0, theme.markers.overlay_bg),
    );
}

fn draw_label(painter: &Painter, pos: Pos2, text: String, background: Color32, theme: &AppTheme) {
    let idx = painter.add(Shape::Noop);
    let text_rect = painter.text(
        pos,
        Align2::LEFT_TOP,
        text,
        FontId::monospace(theme.markers.label_size),
        theme.markers.label_text,
    );
    painter.set(idx, Shape::rect_filled(text_rect.expand(2.0), 2.0, background));
}
