use eframe::egui;
use egui::{Color32, Sense, Vec2};

use crate::canvas::TRANSPARENT_INDEX;

/// Number of entries in the fixed palette.
pub const PALETTE_SIZE: usize = 256;

/// Swatches per row in the palette panel.
const SWATCHES_PER_ROW: usize = 8;
const SWATCH_SIZE: f32 = 18.0;

// ============================================================================
// PALETTE — fixed 256-entry color table
// ============================================================================

/// The fixed 8-bit palette every sprite indexes into.
///
/// Layout: index 0 is transparent, indices 1..=216 are the 6×6×6 color cube
/// over channel values {0, 51, 102, 153, 204, 255} (red-major), and the
/// remaining slots are a grayscale ramp.  Generated once at startup and
/// never mutated.
pub struct Palette {
    colors: Vec<[u8; 4]>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::generate()
    }
}

impl Palette {
    pub fn generate() -> Self {
        let mut colors = Vec::with_capacity(PALETTE_SIZE);

        // Index 0: transparent.
        colors.push([255, 255, 255, 0]);

        // 216-color cube.
        const VALUES: [u8; 6] = [0, 51, 102, 153, 204, 255];
        for r in VALUES {
            for g in VALUES {
                for b in VALUES {
                    colors.push([r, g, b, 255]);
                }
            }
        }

        // Grayscale ramp fills the remaining slots.
        let needed = PALETTE_SIZE - colors.len();
        let step = 255 / (needed + 1);
        for i in 1..=needed {
            let v = (i * step) as u8;
            colors.push([v, v, v, 255]);
        }

        debug_assert_eq!(colors.len(), PALETTE_SIZE);
        Self { colors }
    }

    /// RGBA bytes for a palette index.
    pub fn rgba(&self, index: u8) -> [u8; 4] {
        self.colors[index as usize]
    }

    pub fn color32(&self, index: u8) -> Color32 {
        let [r, g, b, a] = self.rgba(index);
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

// ============================================================================
// COLORS PANEL — swatch grid UI
// ============================================================================

/// Action reported back to the app after the panel was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorAction {
    /// A swatch was clicked; the new index is already applied.
    Selected(u8),
}

/// Scrollable grid of palette swatches with the active index highlighted.
pub struct ColorsPanel {
    pub selected_index: u8,
}

impl Default for ColorsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorsPanel {
    pub fn new() -> Self {
        // Index 1 is black in the generated cube — the default pen color.
        Self { selected_index: 1 }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, palette: &Palette) -> Option<ColorAction> {
        let mut action = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("palette_swatches")
                .spacing(Vec2::splat(2.0))
                .show(ui, |ui| {
                    for index in 0..palette.len() {
                        let index = index as u8;
                        let (rect, response) = ui
                            .allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());

                        if index == TRANSPARENT_INDEX {
                            paint_transparent_swatch(ui, rect);
                        } else {
                            ui.painter().rect_filled(rect, 2.0, palette.color32(index));
                        }

                        if index == self.selected_index {
                            ui.painter().rect_stroke(rect, 2.0, (2.0, Color32::WHITE));
                            ui.painter()
                                .rect_stroke(rect.expand(1.0), 2.0, (1.0, Color32::BLACK));
                        }

                        if response.clicked() {
                            self.selected_index = index;
                            action = Some(ColorAction::Selected(index));
                        }

                        if (index as usize + 1) % SWATCHES_PER_ROW == 0 {
                            ui.end_row();
                        }
                    }
                });
        });

        action
    }
}

/// Checkerboard swatch for the transparent entry, with a red border so it
/// stands out as "not a color".
fn paint_transparent_swatch(ui: &egui::Ui, rect: egui::Rect) {
    let half = rect.size() / 2.0;
    for (i, corner) in [
        rect.min,
        rect.min + Vec2::new(half.x, 0.0),
        rect.min + Vec2::new(0.0, half.y),
        rect.min + half,
    ]
    .iter()
    .enumerate()
    {
        let color = if i == 0 || i == 3 {
            Color32::from_gray(204)
        } else {
            Color32::WHITE
        };
        ui.painter().rect_filled(
            egui::Rect::from_min_size(*corner, half),
            0.0,
            color,
        );
    }
    ui.painter()
        .rect_stroke(rect, 2.0, (1.0, Color32::from_rgb(239, 68, 68)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_exactly_256_entries() {
        assert_eq!(Palette::generate().len(), PALETTE_SIZE);
    }

    #[test]
    fn index_zero_is_the_only_transparent_entry() {
        let palette = Palette::generate();
        assert_eq!(palette.rgba(0)[3], 0);
        for i in 1..=255u8 {
            assert_eq!(palette.rgba(i)[3], 255, "index {} must be opaque", i);
        }
    }

    #[test]
    fn cube_section_is_red_major() {
        let palette = Palette::generate();
        // Index 1 is the first cube entry: black.
        assert_eq!(palette.rgba(1), [0, 0, 0, 255]);
        // Blue varies fastest: index 2 is (0, 0, 51).
        assert_eq!(palette.rgba(2), [0, 0, 51, 255]);
        // Last cube entry (index 216) is white.
        assert_eq!(palette.rgba(216), [255, 255, 255, 255]);
    }

    #[test]
    fn tail_is_a_grayscale_ramp() {
        let palette = Palette::generate();
        // 256 - 217 = 39 grays with step floor(255 / 40) = 6.
        for i in 1..=39usize {
            let v = (i * 6) as u8;
            assert_eq!(palette.rgba((216 + i) as u8), [v, v, v, 255]);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = Palette::generate();
        let b = Palette::generate();
        for i in 0..=255u8 {
            assert_eq!(a.rgba(i), b.rgba(i));
        }
    }
}
