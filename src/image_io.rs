use std::path::Path;

use anyhow::{Context, Result};
use arboard::Clipboard;
use image::DynamicImage;
use serde::Serialize;

use crate::marker::Marker;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"];

pub fn read_image_from_path(path: &Path) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("cannot decode image {}", path.display()))
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn display_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_else(|| "(none)".to_string())
}

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct CoordinatePayload {
    pub points: Vec<[i32; 2]>,
    pub boxes: Vec<[i32; 4]>,
}

impl CoordinatePayload {
    pub fn from_markers(markers: &[Marker]) -> Self {
        let mut payload = Self::default();
        for marker in markers {
            match marker {
                Marker::Point(coord) => payload.points.push([coord.x, coord.y]),
                Marker::Box(corners) => payload.boxes.push([
                    corners.min.x,
                    corners.min.y,
                    corners.max.x,
                    corners.max.y,
                ]),
            }
        }
        payload
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("cannot serialize marker coordinates")
    }
}

pub fn write_text_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("cannot initialize clipboard")?;
    clipboard
        .set_text(text.to_owned())
        .context("cannot write text to clipboard")
}
