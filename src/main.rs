mod app;
mod canvas;
mod image_io;
mod marker;
mod marker_store;
mod shortcuts;
mod state;
mod status_bar;
mod theme;
mod toolbar;
mod ui_controls;
mod view;

use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use crate::marker::InteractionMode;

/// Inspect pixel coordinates and mark points and boxes on an image.
#[derive(Parser, Debug)]
#[command(name = "image-navigator", version)]
struct Args {
    /// Image to open on launch (png, jpg, jpeg, bmp, tiff, tif, webp).
    image: Option<PathBuf>,

    /// Start in Box mode instead of Hand mode.
    #[arg(long)]
    box_mode: bool,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let launch = app::LaunchOptions {
        image: args.image,
        start_mode: if args.box_mode {
            InteractionMode::Box
        } else {
            InteractionMode::Hand
        },
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title(state::APP_TITLE)
        .with_inner_size([1200.0, 800.0])
        .with_min_inner_size([800.0, 600.0])
        .with_drag_and_drop(true);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        state::APP_TITLE,
        options,
        Box::new(move |cc| Box::new(app::NavigatorApp::new(cc, launch))),
    )
}
