use std::collections::VecDeque;

use eframe::egui;
use egui::{Color32, ColorImage, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2};

use crate::components::colors::Palette;

/// Smallest grid edge accepted by the editor.
pub const MIN_GRID_SIZE: u32 = 8;
/// Largest grid edge accepted by the editor.
pub const MAX_GRID_SIZE: u32 = 256;

/// Palette index that means "no pixel here".
pub const TRANSPARENT_INDEX: u8 = 0;

/// Fixed edge length of the on-screen drawing surface, in points.
const DISPLAY_SIZE: f32 = 500.0;

// ============================================================================
// CANVAS SHAPE — mask limiting which cells are paintable
// ============================================================================

/// Outline the sprite is drawn inside.  Cells outside the shape render dimmed
/// and reject color (erasing is still allowed everywhere).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CanvasShape {
    #[default]
    Square,
    Circle,
    Heart,
    Octagon,
}

impl CanvasShape {
    pub fn label(&self) -> &'static str {
        match self {
            CanvasShape::Square => "Square",
            CanvasShape::Circle => "Circle",
            CanvasShape::Heart => "Heart",
            CanvasShape::Octagon => "Octagon",
        }
    }

    /// Name used in the project file format.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasShape::Square => "square",
            CanvasShape::Circle => "circle",
            CanvasShape::Heart => "heart",
            CanvasShape::Octagon => "octagon",
        }
    }

    /// Parse a project-file shape name.  Unknown names fall back to `Square`
    /// so files written by newer versions still open.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" => CanvasShape::Circle,
            "heart" => CanvasShape::Heart,
            "octagon" => CanvasShape::Octagon,
            _ => CanvasShape::Square,
        }
    }

    pub fn all() -> &'static [CanvasShape] {
        &[
            CanvasShape::Square,
            CanvasShape::Circle,
            CanvasShape::Heart,
            CanvasShape::Octagon,
        ]
    }

    /// Whether grid cell (x, y) lies inside this shape on a `grid`-sized
    /// canvas.  Pure and O(1); evaluated for every cell on every redraw.
    pub fn contains(&self, x: i32, y: i32, grid: u32) -> bool {
        if *self == CanvasShape::Square {
            return true;
        }
        // Normalization divides by grid - 1; a 1×1 grid cannot be produced
        // through the UI but must not crash on malformed load data.
        if grid <= 1 {
            return true;
        }

        // Grid coordinates → [-1, 1] about the canvas center.
        let xn = (x as f32 / (grid - 1) as f32) * 2.0 - 1.0;
        let yn = (y as f32 / (grid - 1) as f32) * 2.0 - 1.0;

        match self {
            CanvasShape::Square => true,
            CanvasShape::Circle => xn * xn + yn * yn <= 1.0,
            CanvasShape::Heart => {
                // Flip Y and shift up so the lobes sit at the top.
                let hx = xn * 1.3;
                let hy = -yn * 1.3 + 0.3;
                let left = hx * hx + hy * hy - 1.0;
                left * left * left - hx * hx * hy * hy * hy <= 0.0
            }
            CanvasShape::Octagon => {
                // Square with the four corner squares of half-width L cut off.
                const L: f32 = 0.35;
                !((xn > 1.0 - L && yn > 1.0 - L)
                    || (xn < -1.0 + L && yn > 1.0 - L)
                    || (xn > 1.0 - L && yn < -1.0 + L)
                    || (xn < -1.0 + L && yn < -1.0 + L))
            }
        }
    }
}

// ============================================================================
// CANVAS STATE — flat palette-indexed pixel buffer
// ============================================================================

/// The authoritative sprite data: a row-major `grid_size²` buffer of palette
/// indices plus the active shape mask.  All mutation goes through the methods
/// here so bounds, mask, and change tracking stay consistent.
pub struct CanvasState {
    grid_size: u32,
    pixels: Vec<u8>,
    pub shape: CanvasShape,
    /// Bumped on every visible change; the renderer compares it to decide
    /// whether the display texture needs a rebuild.
    revision: u64,
}

impl CanvasState {
    /// Create an all-transparent canvas.  `grid_size` is clamped to the
    /// accepted range.
    pub fn new(grid_size: u32) -> Self {
        let grid_size = grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        Self {
            grid_size,
            pixels: vec![TRANSPARENT_INDEX; (grid_size * grid_size) as usize],
            shape: CanvasShape::Square,
            revision: 0,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Force a redraw without changing pixel data (e.g. after a shape change).
    pub fn mark_dirty(&mut self) {
        self.revision += 1;
    }

    pub fn set_shape(&mut self, shape: CanvasShape) {
        if self.shape != shape {
            self.shape = shape;
            self.mark_dirty();
        }
    }

    /// Palette index at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.grid_size as i32 || y >= self.grid_size as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.grid_size + x as u32) as usize])
    }

    /// Throw away the current contents and start over at `grid_size`
    /// (clamped), all cells transparent.
    pub fn resize(&mut self, grid_size: u32) {
        let grid_size = grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.grid_size = grid_size;
        self.pixels = vec![TRANSPARENT_INDEX; (grid_size * grid_size) as usize];
        self.mark_dirty();
    }

    /// Replace the whole buffer with loaded project data.  The caller has
    /// already validated `pixels.len() == grid_size²`.
    pub fn replace(&mut self, grid_size: u32, pixels: Vec<u8>, shape: CanvasShape) {
        debug_assert_eq!(pixels.len(), (grid_size * grid_size) as usize);
        self.grid_size = grid_size;
        self.pixels = pixels;
        self.shape = shape;
        self.mark_dirty();
    }

    /// Write one cell.  No-ops: out of bounds, painting color outside the
    /// shape mask (erasing is always permitted), or writing the value the
    /// cell already holds.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if x < 0 || y < 0 || x >= self.grid_size as i32 || y >= self.grid_size as i32 {
            return;
        }
        if color != TRANSPARENT_INDEX && !self.shape.contains(x, y, self.grid_size) {
            return;
        }
        let idx = (y as u32 * self.grid_size + x as u32) as usize;
        if self.pixels[idx] == color {
            return;
        }
        self.pixels[idx] = color;
        self.revision += 1;
    }

    /// Paint a fixed 2×2 block whose bottom-right cell is (x, y).  Each cell
    /// goes through `set_pixel`, so bounds and mask apply independently.
    pub fn brush(&mut self, x: i32, y: i32, color: u8) {
        for by in (y - 1)..=y {
            for bx in (x - 1)..=x {
                self.set_pixel(bx, by, color);
            }
        }
    }

    /// Queue-based 4-connected flood fill from (x, y).  Stays inside the
    /// connected component of the start cell's original color and inside the
    /// shape mask.  No-op when the start cell is outside the mask or already
    /// holds `new_color`.
    pub fn flood_fill(&mut self, x: i32, y: i32, new_color: u8) {
        let grid = self.grid_size as i32;
        if x < 0 || y < 0 || x >= grid || y >= grid {
            return;
        }
        if !self.shape.contains(x, y, self.grid_size) {
            return;
        }

        let target = self.pixels[(y * grid + x) as usize];
        if target == new_color {
            return;
        }

        let mut changed = 0u32;
        let mut queue = VecDeque::new();
        queue.push_back((x, y));

        // The recolored value doubles as the visited marker: a cell that no
        // longer matches `target` is skipped when it comes off the queue.
        while let Some((cx, cy)) = queue.pop_front() {
            if cx < 0 || cx >= grid || cy < 0 || cy >= grid {
                continue;
            }
            let idx = (cy * grid + cx) as usize;
            if self.pixels[idx] != target || !self.shape.contains(cx, cy, self.grid_size) {
                continue;
            }

            self.pixels[idx] = new_color;
            changed += 1;

            queue.push_back((cx + 1, cy));
            queue.push_back((cx - 1, cy));
            queue.push_back((cx, cy + 1));
            queue.push_back((cx, cy - 1));
        }

        if changed > 0 {
            self.revision += 1;
        }
    }
}

// ============================================================================
// SHAPE STAMPS — shared by live preview and final commit
// ============================================================================

/// Fill the axis-aligned bounding box spanned by the two corners into a raw
/// buffer, each cell gated by grid bounds and the shape mask.
pub fn stamp_rectangle(
    data: &mut [u8],
    grid: u32,
    shape: CanvasShape,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    color: u8,
) {
    let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
    let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));

    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            if x >= 0 && x < grid as i32 && y >= 0 && y < grid as i32 && shape.contains(x, y, grid)
            {
                data[(y as u32 * grid + x as u32) as usize] = color;
            }
        }
    }
}

/// Fill the circle inscribed in the bounding box spanned by the two corners:
/// center at the box midpoint, radius half the longer side.  Each cell gated
/// by grid bounds and the shape mask.
pub fn stamp_circle(
    data: &mut [u8],
    grid: u32,
    shape: CanvasShape,
    (x0, y0): (i32, i32),
    (x1, y1): (i32, i32),
    color: u8,
) {
    let (lo_x, hi_x) = (x0.min(x1), x0.max(x1));
    let (lo_y, hi_y) = (y0.min(y1), y0.max(y1));

    let cx = (lo_x + hi_x) as f32 / 2.0;
    let cy = (lo_y + hi_y) as f32 / 2.0;
    let radius = (hi_x - lo_x).max(hi_y - lo_y) as f32 / 2.0;
    let radius_sq = radius * radius;

    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            let dist_sq = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);
            if dist_sq <= radius_sq
                && x >= 0
                && x < grid as i32
                && y >= 0
                && y < grid as i32
                && shape.contains(x, y, grid)
            {
                data[(y as u32 * grid + x as u32) as usize] = color;
            }
        }
    }
}

// ============================================================================
// CANVAS VIEW — egui display surface + pointer → grid mapping
// ============================================================================

/// A pointer event on the drawing surface, in grid coordinates.  Coordinates
/// can fall outside the grid while a drag continues past the edge; the
/// per-cell bounds checks downstream handle that.
#[derive(Clone, Copy, Debug)]
pub enum CanvasEvent {
    Pressed(i32, i32),
    Moved(i32, i32),
    Released,
}

/// Renders the pixel buffer (or a preview snapshot) into a fixed-size square
/// and reports pointer gestures in grid coordinates.
pub struct Canvas {
    texture: Option<TextureHandle>,
    /// (revision, grid_size, shape) the texture was last built from.
    cached: Option<(u64, u32, CanvasShape)>,
    /// True while the last uploaded image was a preview snapshot, which
    /// forces a rebuild once the preview goes away.
    showed_preview: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            texture: None,
            cached: None,
            showed_preview: false,
        }
    }

    /// Draw the canvas and translate pointer interaction into [`CanvasEvent`]s.
    /// When `preview` is set it is rendered instead of the authoritative
    /// buffer (shape-tool live preview); the buffer itself is not touched.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &CanvasState,
        preview: Option<&[u8]>,
        palette: &Palette,
    ) -> Vec<CanvasEvent> {
        let key = (state.revision(), state.grid_size(), state.shape);
        let needs_rebuild = preview.is_some()
            || self.showed_preview
            || self.cached != Some(key)
            || self.texture.is_none();

        if needs_rebuild {
            let data = preview.unwrap_or_else(|| state.pixels());
            let img = compose_image(data, state.grid_size(), state.shape, palette);
            match &mut self.texture {
                Some(tex) => tex.set(img, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture(
                        "pixel-canvas",
                        img,
                        TextureOptions::NEAREST,
                    ));
                }
            }
            self.cached = Some(key);
            self.showed_preview = preview.is_some();
        }

        let (response, painter) =
            ui.allocate_painter(Vec2::splat(DISPLAY_SIZE), Sense::click_and_drag());

        if let Some(tex) = &self.texture {
            painter.image(
                tex.id(),
                response.rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        painter.rect_stroke(response.rect, 0.0, (1.0, ui.visuals().window_stroke.color));

        let mut events = Vec::new();
        let to_grid = |pos: Pos2| -> (i32, i32) {
            let cell = DISPLAY_SIZE / state.grid_size() as f32;
            let rel = pos - response.rect.min;
            ((rel.x / cell).floor() as i32, (rel.y / cell).floor() as i32)
        };

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_grid(pos);
                events.push(CanvasEvent::Pressed(x, y));
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (x, y) = to_grid(pos);
                events.push(CanvasEvent::Moved(x, y));
            }
        }
        if response.drag_released() {
            events.push(CanvasEvent::Released);
        }

        events
    }
}

/// Composite buffer + mask + palette into the display image:
///   in mask, colored      → the palette color
///   in mask, transparent  → white / faint checker tint by (x + y) parity
///   outside mask          → one uniform dark tone
fn compose_image(data: &[u8], grid: u32, shape: CanvasShape, palette: &Palette) -> ColorImage {
    let n = grid as usize;
    let mut img = ColorImage::new([n, n], Color32::WHITE);

    // Masked-out cells may still hold color (erase works everywhere, and the
    // shape can change under painted cells); the stored value must never show
    // through the overlay.
    const MASKED_OUT: Color32 = Color32::from_gray(102);

    for y in 0..n {
        for x in 0..n {
            let color_index = data[y * n + x];
            img.pixels[y * n + x] = if !shape.contains(x as i32, y as i32, grid) {
                MASKED_OUT
            } else if color_index != TRANSPARENT_INDEX {
                let [r, g, b, _] = palette.rgba(color_index);
                Color32::from_rgb(r, g, b)
            } else if (x + y) % 2 == 0 {
                Color32::from_gray(242)
            } else {
                Color32::WHITE
            };
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(grid: u32, shape: CanvasShape) -> CanvasState {
        let mut s = CanvasState::new(grid);
        s.set_shape(shape);
        s
    }

    #[test]
    fn mask_is_symmetric_under_rotation() {
        // Circle and square masks are invariant under 90° rotation about the
        // grid center: (x, y) → (grid-1-y, x).
        for &shape in &[CanvasShape::Square, CanvasShape::Circle] {
            for grid in [8u32, 17, 32] {
                let g = grid as i32;
                for y in 0..g {
                    for x in 0..g {
                        assert_eq!(
                            shape.contains(x, y, grid),
                            shape.contains(g - 1 - y, x, grid),
                            "{:?} grid={} ({}, {})",
                            shape,
                            grid,
                            x,
                            y
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn octagon_is_symmetric_under_reflection() {
        for grid in [8u32, 16, 33] {
            let g = grid as i32;
            for y in 0..g {
                for x in 0..g {
                    let v = CanvasShape::Octagon.contains(x, y, grid);
                    assert_eq!(v, CanvasShape::Octagon.contains(g - 1 - x, y, grid));
                    assert_eq!(v, CanvasShape::Octagon.contains(x, g - 1 - y, grid));
                }
            }
        }
    }

    #[test]
    fn heart_is_symmetric_across_vertical_axis() {
        let grid = 16u32;
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(
                    CanvasShape::Heart.contains(x, y, grid),
                    CanvasShape::Heart.contains(15 - x, y, grid)
                );
            }
        }
    }

    #[test]
    fn degenerate_grid_does_not_panic() {
        // grid <= 1 would divide by zero in normalization.
        for &shape in CanvasShape::all() {
            assert!(shape.contains(0, 0, 1));
            assert!(shape.contains(0, 0, 0));
        }
    }

    #[test]
    fn set_pixel_is_idempotent() {
        let mut s = state(8, CanvasShape::Square);
        s.set_pixel(3, 4, 7);
        let rev = s.revision();
        let snapshot = s.pixels().to_vec();
        s.set_pixel(3, 4, 7);
        assert_eq!(s.pixels(), &snapshot[..]);
        assert_eq!(s.revision(), rev, "equal-value write must not bump revision");
    }

    #[test]
    fn set_pixel_out_of_bounds_is_noop() {
        let mut s = state(8, CanvasShape::Square);
        s.set_pixel(-1, 0, 5);
        s.set_pixel(0, 8, 5);
        assert!(s.pixels().iter().all(|&p| p == TRANSPARENT_INDEX));
    }

    #[test]
    fn painting_outside_mask_is_noop_but_erasing_works() {
        let mut s = state(16, CanvasShape::Circle);
        // (0, 0) is a corner, well outside the inscribed circle.
        assert!(!CanvasShape::Circle.contains(0, 0, 16));
        s.set_pixel(0, 0, 9);
        assert_eq!(s.pixel(0, 0), Some(TRANSPARENT_INDEX));

        // Erasing the same masked-out cell is always permitted.
        s.shape = CanvasShape::Square;
        s.set_pixel(0, 0, 9);
        s.shape = CanvasShape::Circle;
        s.set_pixel(0, 0, TRANSPARENT_INDEX);
        assert_eq!(s.pixel(0, 0), Some(TRANSPARENT_INDEX));
    }

    #[test]
    fn brush_paints_two_by_two_anchored_bottom_right() {
        let mut s = state(8, CanvasShape::Square);
        s.brush(3, 3, 5);
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            assert_eq!(s.pixel(x, y), Some(5));
        }
        assert_eq!(s.pixel(4, 3), Some(0));
        assert_eq!(s.pixel(1, 2), Some(0));
    }

    #[test]
    fn flood_fill_respects_component_and_mask() {
        let mut s = state(8, CanvasShape::Square);
        // Vertical wall of color 1 at x = 4 splits the grid.
        for y in 0..8 {
            s.set_pixel(4, y, 1);
        }
        s.flood_fill(0, 0, 2);
        // Left of the wall filled, wall and right side untouched.
        assert_eq!(s.pixel(3, 7), Some(2));
        assert_eq!(s.pixel(4, 3), Some(1));
        assert_eq!(s.pixel(5, 0), Some(0));

        // Fill never crosses the mask, even where cells are reachable.
        let mut c = state(16, CanvasShape::Circle);
        c.flood_fill(8, 8, 3);
        for y in 0..16 {
            for x in 0..16 {
                let filled = c.pixel(x, y) == Some(3);
                assert_eq!(filled, CanvasShape::Circle.contains(x, y, 16));
            }
        }
    }

    #[test]
    fn flood_fill_same_color_is_noop() {
        let mut s = state(8, CanvasShape::Square);
        s.set_pixel(2, 2, 4);
        let rev = s.revision();
        s.flood_fill(2, 2, 4);
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn flood_fill_outside_mask_is_noop() {
        let mut s = state(16, CanvasShape::Circle);
        s.flood_fill(0, 0, 6);
        assert!(s.pixels().iter().all(|&p| p == TRANSPARENT_INDEX));
    }

    #[test]
    fn rectangle_stamp_fills_exact_bounding_box() {
        let s = state(8, CanvasShape::Square);
        let mut data = s.pixels().to_vec();
        stamp_rectangle(&mut data, 8, CanvasShape::Square, (2, 2), (4, 4), 5);

        let mut painted = 0;
        for y in 0..8 {
            for x in 0..8 {
                let v = data[y * 8 + x];
                if (2..=4).contains(&x) && (2..=4).contains(&y) {
                    assert_eq!(v, 5);
                    painted += 1;
                } else {
                    assert_eq!(v, 0);
                }
            }
        }
        assert_eq!(painted, 9);
    }

    #[test]
    fn rectangle_stamp_corner_order_does_not_matter() {
        let mut a = vec![0u8; 64];
        let mut b = vec![0u8; 64];
        stamp_rectangle(&mut a, 8, CanvasShape::Square, (2, 2), (4, 4), 5);
        stamp_rectangle(&mut b, 8, CanvasShape::Square, (4, 4), (2, 2), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn circle_stamp_matches_hand_computed_disc() {
        // Bounding box (0,0)-(7,7): center (3.5, 3.5), radius 3.5.
        let mut data = vec![0u8; 64];
        stamp_circle(&mut data, 8, CanvasShape::Square, (0, 0), (7, 7), 9);

        for y in 0i32..8 {
            for x in 0i32..8 {
                let dist_sq = (x as f32 - 3.5).powi(2) + (y as f32 - 3.5).powi(2);
                let expect = dist_sq <= 3.5 * 3.5;
                assert_eq!(
                    data[(y * 8 + x) as usize] == 9,
                    expect,
                    "cell ({}, {})",
                    x,
                    y
                );
            }
        }
        // The four extreme corners are outside the disc.
        for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7)] {
            assert_eq!(data[y * 8 + x], 0);
        }
    }

    #[test]
    fn stamps_clip_to_bounds_and_mask() {
        let mut data = vec![0u8; 64];
        stamp_rectangle(&mut data, 8, CanvasShape::Square, (-3, -3), (2, 2), 7);
        assert_eq!(data.iter().filter(|&&v| v == 7).count(), 9); // [0,2]×[0,2]

        let mut masked = vec![0u8; 16 * 16];
        stamp_rectangle(&mut masked, 16, CanvasShape::Circle, (0, 0), (15, 15), 7);
        for y in 0..16 {
            for x in 0..16 {
                let painted = masked[(y * 16 + x) as usize] == 7;
                assert_eq!(painted, CanvasShape::Circle.contains(x, y, 16));
            }
        }
    }

    #[test]
    fn resize_discards_contents() {
        let mut s = state(8, CanvasShape::Square);
        s.set_pixel(1, 1, 3);
        s.resize(16);
        assert_eq!(s.grid_size(), 16);
        assert_eq!(s.pixels().len(), 256);
        assert!(s.pixels().iter().all(|&p| p == TRANSPARENT_INDEX));
    }

    #[test]
    fn resize_clamps_to_accepted_range() {
        let mut s = CanvasState::new(32);
        s.resize(4);
        assert_eq!(s.grid_size(), MIN_GRID_SIZE);
        s.resize(1000);
        assert_eq!(s.grid_size(), MAX_GRID_SIZE);
    }

    #[test]
    fn compose_image_covers_all_three_render_cases() {
        let palette = Palette::generate();
        let mut s = CanvasState::new(16);
        s.set_pixel(0, 0, 5); // cube color, about to be masked out
        s.set_pixel(8, 8, 1); // black, stays inside the circle
        s.set_shape(CanvasShape::Circle);

        let img = compose_image(s.pixels(), 16, s.shape, &palette);

        // In mask, colored: the palette color.
        let [r, g, b, _] = palette.rgba(1);
        assert_eq!(img.pixels[8 * 16 + 8], Color32::from_rgb(r, g, b));

        // In mask, transparent: white / checker tint by (x + y) parity.
        assert_eq!(img.pixels[8 * 16 + 7], Color32::WHITE); // 7 + 8 odd
        assert_eq!(img.pixels[6 * 16 + 8], Color32::from_gray(242)); // 8 + 6 even

        // Outside the mask: one uniform dark tone, whether the cell still
        // holds color 5 at (0, 0) or is transparent at (15, 0).
        assert!(!CanvasShape::Circle.contains(0, 0, 16));
        assert!(!CanvasShape::Circle.contains(15, 0, 16));
        assert_eq!(img.pixels[0], Color32::from_gray(102));
        assert_eq!(img.pixels[15], img.pixels[0]);
    }

    #[test]
    fn shape_name_round_trip() {
        for &shape in CanvasShape::all() {
            assert_eq!(CanvasShape::from_name(shape.as_str()), shape);
        }
        assert_eq!(CanvasShape::from_name("pentagon"), CanvasShape::Square);
    }
}
