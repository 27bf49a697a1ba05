use eframe::egui;

use crate::canvas::{stamp_circle, stamp_rectangle, CanvasShape, CanvasState, TRANSPARENT_INDEX};

// ============================================================================
// TOOLS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Brush,
    Bucket,
    Rectangle,
    CircleTool,
}

impl Tool {
    pub fn label(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Brush => "Brush",
            Tool::Bucket => "Bucket",
            Tool::Rectangle => "Rectangle",
            Tool::CircleTool => "Circle",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[
            Tool::Pencil,
            Tool::Eraser,
            Tool::Brush,
            Tool::Bucket,
            Tool::Rectangle,
            Tool::CircleTool,
        ]
    }

    /// Rectangle and circle drag out a live preview and commit on release.
    pub fn is_shape_tool(&self) -> bool {
        matches!(self, Tool::Rectangle | Tool::CircleTool)
    }
}

// ============================================================================
// TOOL ENGINE — pointer gestures → buffer mutations
// ============================================================================

/// In-flight gesture state.  Freehand tools mutate the buffer on every
/// sample; shape tools carry a snapshot of the buffer taken at gesture start
/// (the preview base) and only commit on release.
enum DragState {
    Freehand,
    Shape {
        start: (i32, i32),
        last: (i32, i32),
        base: Vec<u8>,
    },
}

/// Interprets pointer gestures into [`CanvasState`] mutations for the active
/// tool.  Owns the shape-tool preview buffer; the renderer shows it instead
/// of the authoritative pixels while a shape drag is in progress.
pub struct ToolEngine {
    pub active_tool: Tool,
    pub active_color: u8,
    drag: Option<DragState>,
    preview: Option<Vec<u8>>,
}

impl Default for ToolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolEngine {
    pub fn new() -> Self {
        Self {
            active_tool: Tool::Pencil,
            active_color: 1,
            drag: None,
            preview: None,
        }
    }

    /// Select a tool.  The eraser always paints the transparent index.
    pub fn select_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
        if tool == Tool::Eraser {
            self.active_color = TRANSPARENT_INDEX;
        }
    }

    /// Select a palette index.  Picking a real color while the eraser is
    /// active switches back to the pencil.
    pub fn select_color(&mut self, index: u8) {
        self.active_color = index;
        if self.active_tool == Tool::Eraser && index != TRANSPARENT_INDEX {
            self.active_tool = Tool::Pencil;
        }
    }

    /// Shape-tool live preview, shown in place of the real buffer.
    pub fn preview_data(&self) -> Option<&[u8]> {
        self.preview.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Abandon any in-flight gesture without committing.  Used when the
    /// buffer is about to be replaced under the gesture (project load,
    /// resize).
    pub fn cancel(&mut self) {
        self.drag = None;
        self.preview = None;
    }

    /// Gesture start at a grid cell.
    pub fn pointer_down(&mut self, state: &mut CanvasState, x: i32, y: i32) {
        match self.active_tool {
            Tool::Bucket => {
                // Single shot: fill and stay idle.
                state.flood_fill(x, y, self.active_color);
            }
            Tool::Rectangle | Tool::CircleTool => {
                self.drag = Some(DragState::Shape {
                    start: (x, y),
                    last: (x, y),
                    base: state.pixels().to_vec(),
                });
                self.refresh_preview(state);
            }
            Tool::Pencil | Tool::Eraser | Tool::Brush => {
                self.drag = Some(DragState::Freehand);
                self.apply_freehand(state, x, y);
            }
        }
    }

    /// Gesture continues at a grid cell.  Samples are applied as-is, one per
    /// move event; strokes are not rasterized between samples.
    pub fn pointer_moved(&mut self, state: &mut CanvasState, x: i32, y: i32) {
        match &mut self.drag {
            None => {}
            Some(DragState::Freehand) => self.apply_freehand(state, x, y),
            Some(DragState::Shape { last, .. }) => {
                *last = (x, y);
                self.refresh_preview(state);
            }
        }
    }

    /// Gesture end.  Shape tools commit the final stamp at the last observed
    /// cell; a pointer that left the surface mid-drag commits the same way.
    pub fn pointer_up(&mut self, state: &mut CanvasState) {
        if let Some(DragState::Shape { start, last, base }) = self.drag.take() {
            // Roll back to the preview base, then stamp permanently.
            let mut data = base;
            stamp(
                self.active_tool,
                &mut data,
                state.grid_size(),
                state.shape,
                start,
                last,
                self.active_color,
            );
            // A stamp that painted nothing (fully clipped, or repainting the
            // same cells) must not register as a change.
            if data.as_slice() != state.pixels() {
                let grid = state.grid_size();
                let shape = state.shape;
                state.replace(grid, data, shape);
            }
        }
        self.drag = None;
        self.preview = None;
    }

    fn apply_freehand(&mut self, state: &mut CanvasState, x: i32, y: i32) {
        match self.active_tool {
            Tool::Pencil | Tool::Eraser => state.set_pixel(x, y, self.active_color),
            Tool::Brush => state.brush(x, y, self.active_color),
            _ => {}
        }
    }

    /// Recompute preview = base + current shape stamp.  Never touches the
    /// authoritative buffer.
    fn refresh_preview(&mut self, state: &CanvasState) {
        if let Some(DragState::Shape { start, last, base }) = &self.drag {
            let mut data = base.clone();
            stamp(
                self.active_tool,
                &mut data,
                state.grid_size(),
                state.shape,
                *start,
                *last,
                self.active_color,
            );
            self.preview = Some(data);
        }
    }
}

fn stamp(
    tool: Tool,
    data: &mut [u8],
    grid: u32,
    shape: CanvasShape,
    start: (i32, i32),
    end: (i32, i32),
    color: u8,
) {
    match tool {
        Tool::Rectangle => stamp_rectangle(data, grid, shape, start, end, color),
        Tool::CircleTool => stamp_circle(data, grid, shape, start, end, color),
        _ => {}
    }
}

// ============================================================================
// TOOLS PANEL — tool + shape buttons
// ============================================================================

/// Action reported back to the app after the panel was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolAction {
    ToolSelected(Tool),
    ShapeSelected(CanvasShape),
}

/// Toolbar strip: one selectable button per tool and per canvas shape.
pub struct ToolsPanel {
    pub engine: ToolEngine,
}

impl Default for ToolsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolsPanel {
    pub fn new() -> Self {
        Self {
            engine: ToolEngine::new(),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, current_shape: CanvasShape) -> Option<ToolAction> {
        let mut action = None;

        ui.label("Tools:");
        for &tool in Tool::all() {
            let selected = self.engine.active_tool == tool;
            if ui.selectable_label(selected, tool.label()).clicked() {
                self.engine.select_tool(tool);
                action = Some(ToolAction::ToolSelected(tool));
            }
        }

        ui.separator();

        ui.label("Canvas:");
        for &shape in CanvasShape::all() {
            let selected = current_shape == shape;
            if ui.selectable_label(selected, shape.label()).clicked() {
                action = Some(ToolAction::ShapeSelected(shape));
            }
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasState;

    fn engine_with(tool: Tool, color: u8) -> ToolEngine {
        let mut e = ToolEngine::new();
        e.select_tool(tool);
        e.active_color = color;
        e
    }

    #[test]
    fn eraser_forces_transparent_color() {
        let mut e = engine_with(Tool::Pencil, 7);
        e.select_tool(Tool::Eraser);
        assert_eq!(e.active_color, TRANSPARENT_INDEX);
    }

    #[test]
    fn picking_a_color_leaves_the_eraser() {
        let mut e = ToolEngine::new();
        e.select_tool(Tool::Eraser);
        e.select_color(12);
        assert_eq!(e.active_tool, Tool::Pencil);
        assert_eq!(e.active_color, 12);
    }

    #[test]
    fn pencil_drag_paints_each_sample() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::Pencil, 3);

        e.pointer_down(&mut state, 1, 1);
        e.pointer_moved(&mut state, 2, 1);
        e.pointer_moved(&mut state, 5, 5);
        e.pointer_up(&mut state);

        assert_eq!(state.pixel(1, 1), Some(3));
        assert_eq!(state.pixel(2, 1), Some(3));
        assert_eq!(state.pixel(5, 5), Some(3));
        // Samples are not interpolated: cells between them stay untouched.
        assert_eq!(state.pixel(3, 3), Some(0));
    }

    #[test]
    fn bucket_is_single_shot() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::Bucket, 4);

        e.pointer_down(&mut state, 0, 0);
        assert!(!e.is_dragging());
        assert!(state.pixels().iter().all(|&p| p == 4));

        // Moves after a bucket press must not fill again.
        state.set_pixel(0, 0, 1);
        e.pointer_moved(&mut state, 0, 0);
        assert_eq!(state.pixel(0, 0), Some(1));
    }

    #[test]
    fn shape_preview_does_not_mutate_buffer() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::Rectangle, 5);

        e.pointer_down(&mut state, 2, 2);
        e.pointer_moved(&mut state, 4, 4);

        // Buffer untouched while the preview carries the stamped rectangle.
        assert!(state.pixels().iter().all(|&p| p == 0));
        let preview = e.preview_data().expect("preview during shape drag");
        assert_eq!(preview.iter().filter(|&&p| p == 5).count(), 9);
    }

    #[test]
    fn rectangle_commits_nine_cells_on_release() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::Rectangle, 5);

        e.pointer_down(&mut state, 2, 2);
        e.pointer_moved(&mut state, 4, 4);
        e.pointer_up(&mut state);

        assert!(e.preview_data().is_none());
        for y in 0..8 {
            for x in 0..8 {
                let expect = (2..=4).contains(&x) && (2..=4).contains(&y);
                assert_eq!(state.pixel(x, y) == Some(5), expect, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn shape_commit_uses_last_observed_cell() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::Rectangle, 6);

        e.pointer_down(&mut state, 0, 0);
        e.pointer_moved(&mut state, 6, 6);
        e.pointer_moved(&mut state, 1, 1); // shrink back before release
        e.pointer_up(&mut state);

        assert_eq!(state.pixels().iter().filter(|&&p| p == 6).count(), 4);
    }

    #[test]
    fn shape_commit_restores_preview_base_first() {
        let mut state = CanvasState::new(8);
        state.set_pixel(7, 7, 9);
        let mut e = engine_with(Tool::Rectangle, 5);

        e.pointer_down(&mut state, 0, 0);
        e.pointer_moved(&mut state, 1, 1);
        e.pointer_up(&mut state);

        // Pre-existing content outside the stamp survives the rollback.
        assert_eq!(state.pixel(7, 7), Some(9));
        assert_eq!(state.pixel(0, 0), Some(5));
    }

    #[test]
    fn circle_commit_matches_inscribed_disc() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::CircleTool, 2);

        e.pointer_down(&mut state, 0, 0);
        e.pointer_moved(&mut state, 7, 7);
        e.pointer_up(&mut state);

        for y in 0i32..8 {
            for x in 0i32..8 {
                let dist_sq = (x as f32 - 3.5).powi(2) + (y as f32 - 3.5).powi(2);
                assert_eq!(state.pixel(x, y) == Some(2), dist_sq <= 12.25);
            }
        }
    }

    #[test]
    fn fully_clipped_shape_commit_does_not_bump_revision() {
        let mut state = CanvasState::new(16);
        state.set_shape(crate::canvas::CanvasShape::Circle);
        let rev = state.revision();
        let mut e = engine_with(Tool::Rectangle, 5);

        // Both corners of the drag sit outside the circle mask, so the
        // stamp paints nothing.
        e.pointer_down(&mut state, 0, 0);
        e.pointer_moved(&mut state, 1, 0);
        e.pointer_up(&mut state);

        assert!(state.pixels().iter().all(|&p| p == 0));
        assert_eq!(state.revision(), rev, "no-op commit must not look dirty");
    }

    #[test]
    fn cancel_discards_gesture_and_preview() {
        let mut state = CanvasState::new(8);
        let mut e = engine_with(Tool::CircleTool, 3);

        e.pointer_down(&mut state, 1, 1);
        e.pointer_moved(&mut state, 6, 6);
        e.cancel();

        assert!(!e.is_dragging());
        assert!(e.preview_data().is_none());
        assert!(state.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn brush_drag_respects_mask_per_cell() {
        let mut state = CanvasState::new(16);
        state.set_shape(crate::canvas::CanvasShape::Circle);
        let mut e = engine_with(Tool::Brush, 8);

        // Brush block straddling the mask edge: only in-mask cells painted.
        e.pointer_down(&mut state, 1, 8);
        e.pointer_up(&mut state);
        assert!(!crate::canvas::CanvasShape::Circle.contains(0, 8, 16));
        for (x, y) in [(0, 7), (1, 7), (0, 8), (1, 8)] {
            let expect = crate::canvas::CanvasShape::Circle.contains(x, y, 16);
            assert_eq!(state.pixel(x, y) == Some(8), expect, "({}, {})", x, y);
        }
    }
}
