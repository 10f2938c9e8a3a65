use egui::{Pos2, Rect, Vec2};

use crate::marker::PixelCoord;

pub const ZOOM_STEP: f32 = 1.15;
pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 50.0;

// screen = image * zoom + pan, in viewport-local points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    zoom: f32,
    pan: Vec2,
    image_size: Option<Vec2>,
    viewport: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            image_size: None,
            viewport: Vec2::ZERO,
        }
    }
}

impl ViewTransform {
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn fit(&mut self, viewport: Vec2, image_size: Vec2) {
        if image_size.x <= 0.0 || image_size.y <= 0.0 {
            return;
        }
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }

        let width_scale = viewport.x / image_size.x;
        let height_scale = viewport.y / image_size.y;
        self.zoom = width_scale.min(height_scale).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = (viewport - image_size * self.zoom) * 0.5;
        self.image_size = Some(image_size);
        self.viewport = viewport;
    }

    pub fn zoom_at(&mut self, pivot: Pos2, steps: f32) {
        let anchor = self.to_image(pivot);
        self.zoom = (self.zoom * ZOOM_STEP.powf(steps)).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pivot.to_vec2() - anchor.to_vec2() * self.zoom;
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn to_image(&self, screen: Pos2) -> Pos2 {
        ((screen.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    pub fn to_screen(&self, image: Pos2) -> Pos2 {
        (image.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn to_pixel(&self, screen: Pos2) -> PixelCoord {
        PixelCoord::from_image_pos(self.to_image(screen))
    }

    pub fn image_rect(&self) -> Option<Rect> {
        let size = self.image_size?;
        Some(Rect::from_min_size(self.pan.to_pos2(), size * self.zoom))
    }

    pub fn contains_pixel(&self, pixel: PixelCoord) -> bool {
        let Some(size) = self.image_size else {
            return false;
        };
        pixel.x >= 0
            && pixel.y >= 0
            && (pixel.x as f32) < size.x
            && (pixel.y as f32) < size.y
    }
}

#[cfg(test)]
mod tests {
    use egui::{vec2, Pos2};

    use super::{ViewTransform, MAX_ZOOM, MIN_ZOOM};
    use crate::marker::PixelCoord;

    const EPS: f32 = 1e-3;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    fn fitted(viewport: (f32, f32), image: (f32, f32)) -> ViewTransform {
        let mut view = ViewTransform::default();
        view.fit(vec2(viewport.0, viewport.1), vec2(image.0, image.1));
        view
    }

    #[test]
    fn fit_wide_image_in_square_viewport() {
        let view = fitted((500.0, 500.0), (1000.0, 500.0));
        assert!(close(view.zoom(), 0.5));

        let rect = view.image_rect().expect("image rect");
        assert!(close(rect.min.x, 0.0));
        assert!(close(rect.min.y, 125.0));
        assert!(close(rect.max.x, 500.0));
        assert!(close(rect.max.y, 375.0));

        assert_eq!(view.to_pixel(Pos2::new(250.0, 250.0)), PixelCoord::new(500, 250));
    }

    #[test]
    fn fit_stays_inside_viewport_and_touches_an_axis() {
        for (viewport, image) in [
            ((800.0, 600.0), (1920.0, 1080.0)),
            ((300.0, 900.0), (64.0, 64.0)),
            ((1024.0, 768.0), (480.0, 2000.0)),
        ] {
            let view = fitted(viewport, image);
            let rect = view.image_rect().expect("image rect");
            assert!(rect.min.x >= -EPS && rect.min.y >= -EPS);
            assert!(rect.max.x <= viewport.0 + EPS && rect.max.y <= viewport.1 + EPS);
            let touches_x = close(rect.width(), viewport.0);
            let touches_y = close(rect.height(), viewport.1);
            assert!(touches_x || touches_y);
        }
    }

    #[test]
    fn fit_ignores_empty_image() {
        let mut view = ViewTransform::default();
        view.fit(vec2(500.0, 500.0), vec2(0.0, 120.0));
        assert_eq!(view, ViewTransform::default());
    }

    #[test]
    fn screen_image_round_trip() {
        let mut view = fitted((640.0, 480.0), (333.0, 777.0));
        view.zoom_at(Pos2::new(100.0, 40.0), 3.0);
        view.pan(vec2(-17.5, 9.25));

        for screen in [
            Pos2::new(0.0, 0.0),
            Pos2::new(320.0, 240.0),
            Pos2::new(639.0, 479.0),
            Pos2::new(12.5, 401.75),
        ] {
            let back = view.to_screen(view.to_image(screen));
            assert!(close(back.x, screen.x), "{back:?} != {screen:?}");
            assert!(close(back.y, screen.y), "{back:?} != {screen:?}");
        }
    }

    #[test]
    fn zoom_keeps_pivot_and_is_reversible() {
        let mut view = fitted((800.0, 600.0), (1600.0, 900.0));
        let before = view;
        let pivot = Pos2::new(310.0, 205.0);
        let image_under_pivot = view.to_image(pivot);

        view.zoom_at(pivot, 4.0);
        let still_under = view.to_image(pivot);
        assert!(close(still_under.x, image_under_pivot.x));
        assert!(close(still_under.y, image_under_pivot.y));

        view.zoom_at(pivot, -4.0);
        assert!(close(view.zoom(), before.zoom()));
        assert!(close(view.pan_offset().x, before.pan_offset().x));
        assert!(close(view.pan_offset().y, before.pan_offset().y));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = fitted((500.0, 500.0), (500.0, 500.0));
        view.zoom_at(Pos2::new(10.0, 10.0), 500.0);
        assert!(close(view.zoom(), MAX_ZOOM));
        view.zoom_at(Pos2::new(10.0, 10.0), -1000.0);
        assert!(close(view.zoom(), MIN_ZOOM));
    }

    #[test]
    fn contains_pixel_checks_image_bounds() {
        let view = fitted((100.0, 100.0), (10.0, 20.0));
        assert!(view.contains_pixel(PixelCoord::new(0, 0)));
        assert!(view.contains_pixel(PixelCoord::new(9, 19)));
        assert!(!view.contains_pixel(PixelCoord::new(10, 5)));
        assert!(!view.contains_pixel(PixelCoord::new(-1, 5)));
    }
}
