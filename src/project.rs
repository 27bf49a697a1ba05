use std::path::PathBuf;

use crate::canvas::CanvasState;

/// The single open editor session.
pub struct Project {
    pub canvas_state: CanvasState,
    /// `None` for unsaved/untitled sprites.
    pub path: Option<PathBuf>,
    pub is_dirty: bool,
    /// Display name (derived from path or "Untitled")
    pub name: String,
}

impl Project {
    pub fn new_untitled(grid_size: u32) -> Self {
        Self {
            canvas_state: CanvasState::new(grid_size),
            path: None,
            is_dirty: false,
            name: "Untitled".to_string(),
        }
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn update_name_from_path(&mut self) {
        if let Some(ref path) = self.path {
            self.name = path
                .file_name()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Unknown".to_string());
        }
    }

    /// Get the display title (name with dirty indicator)
    pub fn display_title(&self) -> String {
        if self.is_dirty {
            format!("{}*", self.name)
        } else {
            self.name.clone()
        }
    }
}
