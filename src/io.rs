use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rfd::FileDialog;
use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasShape, CanvasState, MAX_GRID_SIZE, MIN_GRID_SIZE, TRANSPARENT_INDEX};
use crate::components::colors::Palette;

/// Current project file format version.  Matches the files written by the
/// original web editor so both tools can open each other's output.
pub const PROJECT_VERSION: u32 = 4;

/// Upscale factor for PNG export: every grid cell becomes an 8×8 block.
pub const EXPORT_SCALE: u32 = 8;

// ============================================================================
// PROJECT FILE FORMAT (.json)
// ============================================================================

/// On-disk project document.  Field names are fixed by the existing file
/// corpus; `currentShape` is optional because older files predate shapes.
#[derive(Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u32,
    #[serde(rename = "gridSize")]
    pub grid_size: u32,
    #[serde(rename = "pixelData")]
    pub pixel_data: Vec<u8>,
    #[serde(rename = "currentShape", default, skip_serializing_if = "Option::is_none")]
    pub current_shape: Option<String>,
}

/// Error type for project file and export operations.
#[derive(Debug)]
pub enum ProjectError {
    Io(std::io::Error),
    Json(String),
    InvalidFormat(String),
    Encode(String),
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectError::Io(e) => write!(f, "I/O error: {}", e),
            ProjectError::Json(e) => write!(f, "Invalid project file: {}", e),
            ProjectError::InvalidFormat(e) => write!(f, "Invalid format: {}", e),
            ProjectError::Encode(e) => write!(f, "Image encode error: {}", e),
        }
    }
}

impl std::error::Error for ProjectError {}

impl From<std::io::Error> for ProjectError {
    fn from(e: std::io::Error) -> Self {
        ProjectError::Io(e)
    }
}

impl From<serde_json::Error> for ProjectError {
    fn from(e: serde_json::Error) -> Self {
        ProjectError::Json(e.to_string())
    }
}

impl From<image::ImageError> for ProjectError {
    fn from(e: image::ImageError) -> Self {
        ProjectError::Encode(e.to_string())
    }
}

/// Serialize the canvas into a project document.
pub fn build_project_file(state: &CanvasState) -> ProjectFile {
    ProjectFile {
        version: PROJECT_VERSION,
        grid_size: state.grid_size(),
        pixel_data: state.pixels().to_vec(),
        current_shape: Some(state.shape.as_str().to_string()),
    }
}

/// Write the canvas as a JSON project file.
pub fn save_project(state: &CanvasState, path: &Path) -> Result<(), ProjectError> {
    let project = build_project_file(state);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &project)?;
    writer.flush()?;
    Ok(())
}

/// Validated contents of a loaded project, ready to replace the session.
pub struct LoadedProject {
    pub grid_size: u32,
    pub pixels: Vec<u8>,
    pub shape: CanvasShape,
}

/// Read and validate a project file.  On any failure the caller's session
/// must stay untouched, so nothing here mutates state.
pub fn load_project(path: &Path) -> Result<LoadedProject, ProjectError> {
    let file = File::open(path)?;
    let project: ProjectFile = serde_json::from_reader(BufReader::new(file))?;
    validate_project(project)
}

/// Validate a parsed document: version, size range, and buffer length.
pub fn validate_project(project: ProjectFile) -> Result<LoadedProject, ProjectError> {
    if project.version > PROJECT_VERSION {
        return Err(ProjectError::InvalidFormat(format!(
            "unsupported project version {} (newest supported is {})",
            project.version, PROJECT_VERSION
        )));
    }
    if project.grid_size < MIN_GRID_SIZE || project.grid_size > MAX_GRID_SIZE {
        return Err(ProjectError::InvalidFormat(format!(
            "grid size {} outside the accepted range {}..={}",
            project.grid_size, MIN_GRID_SIZE, MAX_GRID_SIZE
        )));
    }
    let expected = (project.grid_size * project.grid_size) as usize;
    if project.pixel_data.len() != expected {
        return Err(ProjectError::InvalidFormat(format!(
            "pixel data length {} does not match {}×{} grid",
            project.pixel_data.len(),
            project.grid_size,
            project.grid_size
        )));
    }

    let shape = project
        .current_shape
        .as_deref()
        .map(CanvasShape::from_name)
        .unwrap_or_default();

    Ok(LoadedProject {
        grid_size: project.grid_size,
        pixels: project.pixel_data,
        shape,
    })
}

// ============================================================================
// PNG EXPORT — nearest-neighbor upscale, transparent outside the mask
// ============================================================================

/// Rasterize the sprite at `scale`× and return the RGBA image.  Cells outside
/// the shape mask or holding the transparent index stay fully transparent.
pub fn rasterize(state: &CanvasState, palette: &Palette, scale: u32) -> RgbaImage {
    let grid = state.grid_size();
    let mut img = RgbaImage::from_pixel(grid * scale, grid * scale, Rgba([0, 0, 0, 0]));

    for y in 0..grid as i32 {
        for x in 0..grid as i32 {
            let color_index = match state.pixel(x, y) {
                Some(c) => c,
                None => continue,
            };
            if color_index == TRANSPARENT_INDEX || !state.shape.contains(x, y, grid) {
                continue;
            }
            let rgba = Rgba(palette.rgba(color_index));
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(x as u32 * scale + dx, y as u32 * scale + dy, rgba);
                }
            }
        }
    }

    img
}

/// Rasterize and write a PNG file.
pub fn export_png(
    state: &CanvasState,
    palette: &Palette,
    path: &Path,
    scale: u32,
) -> Result<(), ProjectError> {
    let img = rasterize(state, palette, scale);
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

// ============================================================================
// FILE DIALOGS — interactive path selection
// ============================================================================

/// Default export name encodes shape and size, e.g. `sprite_heart_32x32`.
pub fn default_export_name(state: &CanvasState) -> String {
    format!(
        "sprite_{}_{}x{}",
        state.shape.as_str(),
        state.grid_size(),
        state.grid_size()
    )
}

pub fn default_project_name(state: &CanvasState) -> String {
    format!(
        "sprite_project_{}x{}",
        state.grid_size(),
        state.grid_size()
    )
}

pub fn ask_png_save_path(state: &CanvasState) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PNG image", &["png"])
        .set_file_name(&format!("{}.png", default_export_name(state)))
        .save_file()
}

pub fn ask_project_save_path(state: &CanvasState) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PixelMaker project", &["json"])
        .set_file_name(&format!("{}.json", default_project_name(state)))
        .save_file()
}

pub fn ask_project_open_path() -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("PixelMaker project", &["json"])
        .pick_file()
}
