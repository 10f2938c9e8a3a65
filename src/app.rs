use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use eframe::egui::{self, Context as EguiContext, Key, RichText, TopBottomPanel};
use eframe::{App, Frame};

use crate::canvas;
use crate::image_io;
use crate::marker::InteractionMode;
use crate::shortcuts;
use crate::state::{AppUiFlags, Session};
use crate::status_bar;
use crate::theme;
use crate::toolbar::{self, ToolbarOutput};
use crate::ui_controls;

#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub image: Option<PathBuf>,
    pub start_mode: InteractionMode,
}

pub struct NavigatorApp {
    pub session: Session,
    ui_flags: AppUiFlags,
    theme: theme::AppTheme,
    title: String,
}

impl NavigatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, launch: LaunchOptions) -> Self {
        let theme = theme::navigator_dark_theme();
        theme::apply_theme(&cc.egui_ctx, &theme);

        let mut app = Self {
            session: Session::default(),
            ui_flags: AppUiFlags::default(),
            theme,
            title: String::new(),
        };
        app.session.set_mode(launch.start_mode);

        if let Some(path) = launch.image {
            if path.is_file() && image_io::is_supported_image(&path) {
                app.load_path(&path);
            } else {
                log::warn!("ignoring launch argument {}", path.display());
            }
        }

        app
    }

    fn load_path(&mut self, path: &Path) {
        if self.session.open_image(path) {
            self.ui_flags.ask_replace_image = None;
        }
    }

    fn request_open(&mut self, path: PathBuf) {
        if !image_io::is_supported_image(&path) {
            let ext = image_io::display_extension(&path);
            log::warn!("unsupported file type {ext}: {}", path.display());
            self.session
                .notify(format!("Unsupported file type {ext}: {}", path.display()));
            return;
        }

        if self.session.has_image() && !self.session.markers.is_empty() {
            self.ui_flags.ask_replace_image = Some(path);
        } else {
            self.load_path(&path);
        }
    }

    fn pick_image_file(&mut self) {
        let file = rfd::FileDialog::new()
            .set_title("Open Image")
            .add_filter("Images", image_io::SUPPORTED_EXTENSIONS)
            .add_filter("All Files", &["*"])
            .pick_file();

        if let Some(path) = file {
            self.request_open(path);
        }
    }

    fn handle_dropped_files(&mut self, ctx: &EguiContext) {
        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.request_open(path);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &EguiContext) {
        let cmd = ctx.input(|input| input.modifiers.command || input.modifiers.ctrl);
        let shift = ctx.input(|input| input.modifiers.shift);

        let copy_requested = ctx.input(|input| {
            input
                .events
                .iter()
                .any(|event| matches!(event, egui::Event::Copy))
                || (cmd && input.key_pressed(Key::C))
        });
        if copy_requested {
            self.copy_coordinates_or_report();
        }

        if ctx.input(|input| input.key_pressed(Key::F1)) {
            self.ui_flags.show_shortcuts = true;
        }

        if !cmd {
            if ctx.input(|input| input.key_pressed(Key::Escape)) {
                if self.ui_flags.show_shortcuts {
                    self.ui_flags.show_shortcuts = false;
                } else if self.session.markers.cancel_pending().is_some() {
                    self.session.notify("Box cancelled");
                }
            }
            if ctx.input(|input| input.key_pressed(Key::P)) {
                self.session.cycle_mode();
            }
            if ctx.input(|input| input.key_pressed(Key::B)) {
                let mode = if self.session.mode == InteractionMode::Box {
                    InteractionMode::Hand
                } else {
                    InteractionMode::Box
                };
                self.session.set_mode(mode);
            }
            return;
        }

        if ctx.input(|input| input.key_pressed(Key::O)) {
            self.pick_image_file();
        }

        if ctx.input(|input| input.key_pressed(Key::R)) {
            if shift {
                self.session.fit_view();
            } else {
                self.session.clear_markers();
            }
        }

        if ctx.input(|input| input.key_pressed(Key::Z)) {
            self.session.undo();
        }

        if ctx.input(|input| input.key_pressed(Key::W)) && self.session.has_image() {
            log::info!("image closed");
            self.session.clear_image();
        }

        if ctx.input(|input| input.key_pressed(Key::Slash)) {
            self.ui_flags.show_shortcuts = !self.ui_flags.show_shortcuts;
        }
    }

    fn apply_toolbar_output(&mut self, output: ToolbarOutput) {
        if output.load {
            self.pick_image_file();
        }
        if output.reset_markers {
            self.session.clear_markers();
        }
        if output.fit_view {
            self.session.fit_view();
        }
        if output.copy_coordinates {
            self.copy_coordinates_or_report();
        }
        if output.show_shortcuts {
            self.ui_flags.show_shortcuts = true;
        }
        if let Some(index) = output.remove_marker {
            self.session.remove_marker(index);
        }
    }

    fn copy_coordinates(&mut self) -> Result<usize> {
        let payload = self.session.coordinate_payload();
        let count = payload.points.len() + payload.boxes.len();
        image_io::write_text_to_clipboard(&payload.to_json()?)?;
        Ok(count)
    }

    fn copy_coordinates_or_report(&mut self) {
        if self.session.markers.is_empty() {
            self.session.notify("No markers to copy");
            return;
        }
        match self.copy_coordinates() {
            Ok(count) => {
                log::info!("copied {count} markers to clipboard");
                self.session
                    .notify(format!("Copied {count} markers to clipboard"));
            }
            Err(err) => {
                log::warn!("copy failed: {err:#}");
                self.session.notify(format!("Copy failed: {err:#}"));
            }
        }
    }

    fn sync_title(&mut self, ctx: &EguiContext) {
        let title = self.session.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn show_replace_dialog(
        ctx: &EguiContext,
        app_theme: &theme::AppTheme,
        pending: &mut Option<PathBuf>,
    ) -> Option<PathBuf> {
        let mut out = None;

        let Some(path) = pending.as_ref() else {
            return out;
        };
        let message = format!(
            "Replace the current image with\n{}?\nExisting markers will be cleared.",
            path.display()
        );

        egui::Window::new("Load Image")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .frame(ui_controls::card_frame(app_theme))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(message)
                        .color(app_theme.text.primary)
                        .size(14.0),
                );
                ui.add_space(app_theme.layout.space_2);
                ui.horizontal(|ui| {
                    if ui_controls::primary_button(
                        ui,
                        app_theme,
                        "Replace",
                        egui::vec2(104.0, 30.0),
                    )
                    .clicked()
                    {
                        out = pending.take();
                    }
                    if ui_controls::ghost_button(
                        ui,
                        app_theme,
                        "Keep Current",
                        egui::vec2(120.0, 30.0),
                    )
                    .clicked()
                    {
                        *pending = None;
                    }
                });
            });

        out
    }
}

impl App for NavigatorApp {
    fn update(&mut self, ctx: &EguiContext, _frame: &mut Frame) {
        self.session.tick(ctx.input(|input| input.time));
        self.handle_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        if let Some(path) =
            Self::show_replace_dialog(ctx, &self.theme, &mut self.ui_flags.ask_replace_image)
        {
            self.load_path(&path);
        }
        shortcuts::show_shortcut_window(ctx, &self.theme, &mut self.ui_flags.show_shortcuts);

        let toolbar_output = TopBottomPanel::top("toolbar")
            .exact_height(self.theme.layout.toolbar_height)
            .frame(ui_controls::toolbar_frame(&self.theme))
            .show(ctx, |ui| {
                let width_class = self.theme.width_class(ui.available_width());
                toolbar::show_toolbar(ui, &mut self.session, &self.theme, width_class)
            })
            .inner;
        self.apply_toolbar_output(toolbar_output);

        TopBottomPanel::bottom("status_bar")
            .exact_height(self.theme.layout.status_bar_height)
            .frame(ui_controls::status_bar_frame(&self.theme))
            .show(ctx, |ui| {
                let width_class = self.theme.width_class(ui.available_width());
                status_bar::show_status_bar(ui, &self.session, &self.theme, width_class);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.surfaces.canvas_bg))
            .show(ctx, |ui| {
                canvas::show_canvas(ui, ctx, &mut self.session, &self.theme);
            });

        self.sync_title(ctx);

        if self.session.status.is_some() {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
