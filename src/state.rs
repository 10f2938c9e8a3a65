use std::path::{Path, PathBuf};

use egui::{ColorImage, Context as EguiContext, Pos2, TextureHandle, TextureOptions, Vec2};
use image::DynamicImage;

use crate::image_io::{self, CoordinatePayload};
use crate::marker::{InteractionMode, Marker, PixelCoord};
use crate::marker_store::{MarkerStore, Undone};
use crate::view::ViewTransform;

pub const STATUS_MESSAGE_SECS: f64 = 4.0;
pub const APP_TITLE: &str = "Image Navigator";

#[derive(Default)]
pub struct AppUiFlags {
    pub ask_replace_image: Option<PathBuf>,
    pub show_shortcuts: bool,
}

pub struct LoadedImage {
    pub dynamic: DynamicImage,
    pub path: Option<PathBuf>,
    pub texture: Option<TextureHandle>,
}

impl LoadedImage {
    pub fn new(dynamic: DynamicImage, path: Option<PathBuf>) -> Self {
        Self {
            dynamic,
            path,
            texture: None,
        }
    }

    pub fn size_vec2(&self) -> Vec2 {
        Vec2::new(self.dynamic.width() as f32, self.dynamic.height() as f32)
    }

    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn ensure_texture(&mut self, ctx: &EguiContext) {
        if self.texture.is_some() {
            return;
        }
        let rgba = self.dynamic.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        let color = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
        // Nearest sampling keeps individual pixels readable when zoomed in.
        let texture = ctx.load_texture("navigator_image", color, TextureOptions::NEAREST);
        self.texture = Some(texture);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CanvasEvent {
    PrimaryPress { pos: Pos2, pan_modifier: bool },
    SecondaryPress,
    MiddlePress { pos: Pos2 },
    Drag { delta: Vec2 },
    Release,
    DoubleClick { pos: Pos2 },
    Wheel { pos: Pos2, steps: f32 },
    Hover { pos: Pos2 },
    Leave,
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub until: f64,
}

pub struct Session {
    pub image: Option<LoadedImage>,
    pub view: ViewTransform,
    pub markers: MarkerStore,
    pub mode: InteractionMode,
    pub pointer: Option<Pos2>,
    pub hover: Option<PixelCoord>,
    pub panning: bool,
    pub fit_to_view: bool,
    pub status: Option<StatusMessage>,
    now: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            image: None,
            view: ViewTransform::default(),
            markers: MarkerStore::new(),
            mode: InteractionMode::Hand,
            pointer: None,
            hover: None,
            panning: false,
            fit_to_view: false,
            status: None,
            now: 0.0,
        }
    }
}

impl Session {
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn tick(&mut self, now: f64) {
        self.now = now;
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.until < now)
        {
            self.status = None;
        }
    }

    pub fn notify(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            until: self.now + STATUS_MESSAGE_SECS,
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|status| status.until >= self.now)
            .map(|status| status.text.as_str())
    }

    pub fn window_title(&self) -> String {
        match self.image.as_ref().and_then(LoadedImage::file_name) {
            Some(name) => format!("{APP_TITLE} - {name}"),
            None => APP_TITLE.to_string(),
        }
    }

    pub fn open_image(&mut self, path: &Path) -> bool {
        match image_io::read_image_from_path(path) {
            Ok(dynamic) => {
                log::info!(
                    "loaded {} ({}x{})",
                    path.display(),
                    dynamic.width(),
                    dynamic.height()
                );
                self.set_image(LoadedImage::new(dynamic, Some(path.to_path_buf())));
                true
            }
            Err(err) => {
                log::warn!("image load failed: {err:#}");
                self.notify(format!("Cannot load image: {err:#}"));
                false
            }
        }
    }

    pub fn set_image(&mut self, image: LoadedImage) {
        let viewport = self.view.viewport();
        self.image = Some(image);
        self.markers.clear_all();
        self.view = ViewTransform::default();
        self.hover = None;
        self.panning = false;
        self.fit_to_view = true;
        self.set_viewport(viewport);
    }

    pub fn clear_image(&mut self) {
        let viewport = self.view.viewport();
        self.image = None;
        self.markers.clear_all();
        self.view = ViewTransform::default();
        self.view.set_viewport(viewport);
        self.hover = None;
        self.pointer = None;
        self.panning = false;
        self.fit_to_view = false;
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.view.set_viewport(viewport);
        if !self.fit_to_view {
            return;
        }
        let Some(image_size) = self.image.as_ref().map(LoadedImage::size_vec2) else {
            return;
        };
        if viewport.x > 0.0 && viewport.y > 0.0 {
            self.view.fit(viewport, image_size);
            self.fit_to_view = false;
        }
    }

    pub fn fit_view(&mut self) {
        if self.image.is_none() {
            return;
        }
        self.fit_to_view = true;
        let viewport = self.view.viewport();
        self.set_viewport(viewport);
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode == mode {
            return;
        }
        if self.markers.cancel_pending().is_some() {
            log::debug!("pending box corner discarded by mode switch");
        }
        self.mode = mode;
        self.panning = false;
        log::debug!("interaction mode: {}", mode.label());
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    pub fn undo(&mut self) -> Option<Undone> {
        let undone = self.markers.undo_last();
        match &undone {
            Some(Undone::PendingCorner(_)) => self.notify("Box cancelled"),
            Some(Undone::Marker(marker)) => self.notify(format!("Removed {}", marker.label())),
            None => self.notify("Nothing to undo"),
        }
        undone
    }

    pub fn clear_markers(&mut self) {
        let removed = self.markers.len();
        self.markers.clear_all();
        log::info!("cleared {removed} markers");
        self.notify("All markers cleared");
    }

    pub fn remove_marker(&mut self, index: usize) -> Option<Marker> {
        let removed = self.markers.remove(index)?;
        self.notify(format!("Removed {}", removed.label()));
        Some(removed)
    }

    pub fn coordinate_payload(&self) -> CoordinatePayload {
        CoordinatePayload::from_markers(self.markers.markers())
    }

    pub fn handle_event(&mut self, event: CanvasEvent) -> bool {
        if self.image.is_none() {
            return false;
        }

        match event {
            CanvasEvent::PrimaryPress { pos, pan_modifier } => {
                if pan_modifier || self.mode == InteractionMode::Hand {
                    self.panning = true;
                    return false;
                }
                let pixel = self.view.to_pixel(pos);
                match self.mode {
                    InteractionMode::Point => {
                        self.markers.add_point(pixel);
                        log::debug!("point marked at {}", pixel.label());
                    }
                    InteractionMode::Box => {
                        if let Some(marker) = self.markers.click_box(pixel) {
                            log::debug!("box marked at {}", marker.label());
                        }
                    }
                    InteractionMode::Hand => {}
                }
                true
            }
            CanvasEvent::MiddlePress { .. } => {
                self.panning = true;
                false
            }
            CanvasEvent::Drag { delta } => {
                if !self.panning {
                    return false;
                }
                self.view.pan(delta);
                true
            }
            CanvasEvent::Release => {
                self.panning = false;
                false
            }
            CanvasEvent::SecondaryPress => {
                self.undo();
                true
            }
            CanvasEvent::DoubleClick { .. } => {
                if self.mode != InteractionMode::Hand {
                    return false;
                }
                self.fit_view();
                true
            }
            CanvasEvent::Wheel { pos, steps } => {
                if steps == 0.0 {
                    return false;
                }
                self.view.zoom_at(pos, steps);
                self.update_hover(pos);
                true
            }
            CanvasEvent::Hover { pos } => self.update_hover(pos),
            CanvasEvent::Leave => {
                let had_pointer = self.pointer.is_some();
                self.pointer = None;
                self.hover = None;
                had_pointer
            }
        }
    }

    fn update_hover(&mut self, pos: Pos2) -> bool {
        let moved = self.pointer != Some(pos);
        self.pointer = Some(pos);
        let pixel = self.view.to_pixel(pos);
        self.hover = self.view.contains_pixel(pixel).then_some(pixel);
        moved
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use egui::{vec2, Pos2};
    use image::DynamicImage;

    use super::{CanvasEvent, LoadedImage, Session};
    use crate::marker::{BoxCorners, InteractionMode, Marker, PixelCoord};
    use crate::marker_store::Undone;
    use crate::view::ViewTransform;

    fn session_with_image(width: u32, height: u32, viewport: (f32, f32)) -> Session {
        let mut session = Session::default();
        session.set_viewport(vec2(viewport.0, viewport.1));
        session.set_image(LoadedImage::new(
            DynamicImage::new_rgba8(width, height),
            Some("/tmp/sample.png".into()),
        ));
        session
    }

    fn press(session: &mut Session, x: f32, y: f32) -> bool {
        session.handle_event(CanvasEvent::PrimaryPress {
            pos: Pos2::new(x, y),
            pan_modifier: false,
        })
    }

    #[test]
    fn point_click_after_fit_marks_expected_pixel() {
        let mut session = session_with_image(1000, 500, (500.0, 500.0));
        assert!((session.view.zoom() - 0.5).abs() < 1e-6);

        session.set_mode(InteractionMode::Point);
        assert!(press(&mut session, 250.0, 250.0));
        assert_eq!(
            session.markers.markers(),
            &[Marker::Point(PixelCoord::new(500, 250))]
        );
    }

    #[test]
    fn fit_waits_for_viewport_size() {
        let mut session = Session::default();
        session.set_image(LoadedImage::new(DynamicImage::new_rgba8(200, 100), None));
        assert!(session.fit_to_view);

        session.set_viewport(vec2(100.0, 100.0));
        assert!(!session.fit_to_view);
        assert!((session.view.zoom() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn events_without_image_are_ignored() {
        let mut session = Session::default();
        session.set_mode(InteractionMode::Point);
        assert!(!press(&mut session, 10.0, 10.0));
        assert!(!session.handle_event(CanvasEvent::SecondaryPress));
        assert!(session.markers.is_empty());
    }

    #[test]
    fn hand_mode_press_and_drag_pans() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        let before = session.view.pan_offset();

        assert!(!press(&mut session, 10.0, 10.0));
        assert!(session.panning);
        assert!(session.handle_event(CanvasEvent::Drag {
            delta: vec2(15.0, -5.0)
        }));
        session.handle_event(CanvasEvent::Release);
        assert!(!session.panning);
        assert!(!session.handle_event(CanvasEvent::Drag {
            delta: vec2(1.0, 1.0)
        }));

        assert_eq!(session.view.pan_offset(), before + vec2(15.0, -5.0));
        assert!(session.markers.is_empty());
    }

    #[test]
    fn ctrl_press_pans_in_point_mode() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        session.handle_event(CanvasEvent::PrimaryPress {
            pos: Pos2::new(5.0, 5.0),
            pan_modifier: true,
        });
        assert!(session.panning);
        assert!(session.markers.is_empty());
    }

    #[test]
    fn box_mode_right_click_cancels_then_undoes() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        session.set_mode(InteractionMode::Box);

        press(&mut session, 60.0, 70.0);
        press(&mut session, 20.0, 10.0);
        press(&mut session, 5.0, 5.0);
        assert_eq!(session.markers.len(), 1);
        assert_eq!(session.markers.pending_corner(), Some(PixelCoord::new(5, 5)));

        session.handle_event(CanvasEvent::SecondaryPress);
        assert_eq!(session.markers.pending_corner(), None);
        assert_eq!(
            session.markers.markers(),
            &[Marker::Box(BoxCorners::from_corners(
                PixelCoord::new(20, 10),
                PixelCoord::new(60, 70),
            ))]
        );

        session.handle_event(CanvasEvent::SecondaryPress);
        assert!(session.markers.is_empty());
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn mode_switch_discards_pending_corner() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        session.set_mode(InteractionMode::Box);
        press(&mut session, 30.0, 30.0);
        assert!(session.markers.pending_corner().is_some());

        session.cycle_mode();
        assert_eq!(session.mode, InteractionMode::Hand);
        assert_eq!(session.markers.pending_corner(), None);
        assert!(session.markers.is_empty());
    }

    #[test]
    fn double_click_fits_only_in_hand_mode() {
        let mut session = session_with_image(400, 200, (200.0, 200.0));
        session.handle_event(CanvasEvent::Wheel {
            pos: Pos2::new(50.0, 50.0),
            steps: 3.0,
        });
        let zoomed = session.view.zoom();
        assert!(zoomed > 0.5);

        session.set_mode(InteractionMode::Point);
        assert!(!session.handle_event(CanvasEvent::DoubleClick {
            pos: Pos2::new(1.0, 1.0)
        }));
        assert_eq!(session.view.zoom(), zoomed);

        session.set_mode(InteractionMode::Hand);
        assert!(session.handle_event(CanvasEvent::DoubleClick {
            pos: Pos2::new(1.0, 1.0)
        }));
        assert!((session.view.zoom() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hover_tracks_pixel_only_inside_image() {
        let mut session = session_with_image(1000, 500, (500.0, 500.0));
        session.handle_event(CanvasEvent::Hover {
            pos: Pos2::new(250.0, 250.0),
        });
        assert_eq!(session.hover, Some(PixelCoord::new(500, 250)));

        session.handle_event(CanvasEvent::Hover {
            pos: Pos2::new(250.0, 20.0),
        });
        assert_eq!(session.hover, None);
        assert_eq!(session.pointer, Some(Pos2::new(250.0, 20.0)));

        assert!(session.handle_event(CanvasEvent::Leave));
        assert_eq!(session.pointer, None);
    }

    #[test]
    fn failed_load_keeps_image_and_markers() {
        let mut session = session_with_image(10, 10, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 50.0, 50.0);

        assert!(!session.open_image(Path::new("/definitely/not/here.png")));
        assert!(session.has_image());
        assert_eq!(session.markers.len(), 1);
        assert!(session
            .status_text()
            .is_some_and(|text| text.starts_with("Cannot load image")));
    }

    #[test]
    fn new_image_clears_markers() {
        let mut session = session_with_image(10, 10, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 50.0, 50.0);
        session.set_image(LoadedImage::new(DynamicImage::new_rgba8(20, 20), None));
        assert!(session.markers.is_empty());
        assert_eq!(session.window_title(), "Image Navigator");
    }

    #[test]
    fn status_message_expires() {
        let mut session = Session::default();
        session.tick(10.0);
        session.notify("hello");
        assert_eq!(session.status_text(), Some("hello"));
        session.tick(10.0 + super::STATUS_MESSAGE_SECS + 0.1);
        assert_eq!(session.status_text(), None);
    }

    #[test]
    fn undo_reports_removed_marker() {
        let mut session = session_with_image(10, 10, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 0.0, 0.0);
        assert_eq!(
            session.undo(),
            Some(Undone::Marker(Marker::Point(PixelCoord::new(0, 0))))
        );
        assert_eq!(session.status_text(), Some("Removed (0, 0)"));
        assert_eq!(session.window_title(), "Image Navigator - sample.png");
    }

    #[test]
    fn clear_image_resets_view_but_keeps_viewport() {
        let mut session = session_with_image(100, 50, (200.0, 200.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 100.0, 100.0);
        session.handle_event(CanvasEvent::Hover {
            pos: Pos2::new(100.0, 100.0),
        });

        session.clear_image();
        assert!(!session.has_image());
        assert!(session.markers.is_empty());
        assert_eq!(session.pointer, None);
        assert_eq!(session.hover, None);
        assert!(!session.fit_to_view);

        let mut expected = ViewTransform::default();
        expected.set_viewport(vec2(200.0, 200.0));
        assert_eq!(session.view, expected);
        assert_eq!(session.window_title(), "Image Navigator");
    }

    #[test]
    fn clear_markers_drops_pending_corner_too() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 10.0, 10.0);
        session.set_mode(InteractionMode::Box);
        press(&mut session, 40.0, 40.0);
        assert!(session.markers.pending_corner().is_some());

        session.clear_markers();
        assert!(session.markers.is_empty());
        assert_eq!(session.markers.pending_corner(), None);
        assert_eq!(session.status_text(), Some("All markers cleared"));
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn remove_marker_takes_the_indexed_entry() {
        let mut session = session_with_image(100, 100, (100.0, 100.0));
        session.set_mode(InteractionMode::Point);
        press(&mut session, 1.0, 1.0);
        press(&mut session, 2.0, 2.0);
        press(&mut session, 3.0, 3.0);

        assert_eq!(
            session.remove_marker(1),
            Some(Marker::Point(PixelCoord::new(2, 2)))
        );
        assert_eq!(session.status_text(), Some("Removed (2, 2)"));
        assert_eq!(
            session.markers.markers(),
            &[
                Marker::Point(PixelCoord::new(1, 1)),
                Marker::Point(PixelCoord::new(3, 3)),
            ]
        );
        assert_eq!(session.remove_marker(7), None);
        assert_eq!(session.markers.len(), 2);
    }
}
