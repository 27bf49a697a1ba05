use eframe::egui;

use crate::canvas::{Canvas, CanvasEvent, CanvasShape, MAX_GRID_SIZE, MIN_GRID_SIZE};
use crate::components::colors::{ColorAction, ColorsPanel, Palette};
use crate::components::tools::{ToolAction, ToolsPanel};
use crate::io;
use crate::project::Project;
use crate::{log_err, log_info};

/// Grid sizes offered as one-click presets.
const SIZE_PRESETS: [u32; 4] = [8, 16, 32, 64];

/// How long a status message stays visible, matching the web editor.
const STATUS_SECS: f64 = 3.0;

struct StatusMessage {
    text: String,
    is_error: bool,
    expires_at: f64,
}

pub struct PixelMakerApp {
    project: Project,
    canvas: Canvas,
    palette: Palette,

    // UI Components
    tools_panel: ToolsPanel,
    colors_panel: ColorsPanel,

    // Custom grid size entry
    show_custom_size: bool,
    custom_size_text: String,

    // Transient status line at the bottom of the window
    status: Option<StatusMessage>,
}

impl PixelMakerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            project: Project::new_untitled(32),
            canvas: Canvas::new(),
            palette: Palette::generate(),
            tools_panel: ToolsPanel::new(),
            colors_panel: ColorsPanel::new(),
            show_custom_size: false,
            custom_size_text: String::new(),
            status: None,
        }
    }

    fn show_message(&mut self, ctx: &egui::Context, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error,
            expires_at: ctx.input(|i| i.time) + STATUS_SECS,
        });
    }

    /// Start a fresh sprite at `grid_size`, discarding the current contents.
    /// Any in-flight gesture is cancelled first so it cannot commit into the
    /// new buffer.
    fn start_new_project(&mut self, ctx: &egui::Context, grid_size: u32) {
        self.tools_panel.engine.cancel();
        self.project.canvas_state.resize(grid_size);
        self.project.path = None;
        self.project.name = "Untitled".to_string();
        self.project.mark_clean();
        let n = self.project.canvas_state.grid_size();
        self.show_message(ctx, format!("Started new {}x{} project.", n, n), false);
    }

    fn apply_custom_size(&mut self, ctx: &egui::Context) {
        match self.custom_size_text.trim().parse::<u32>() {
            Ok(n) if (MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&n) => {
                self.start_new_project(ctx, n);
                self.show_custom_size = false;
            }
            _ => {
                self.show_message(
                    ctx,
                    format!("Size must be between {} and {}.", MIN_GRID_SIZE, MAX_GRID_SIZE),
                    true,
                );
            }
        }
    }

    fn select_shape(&mut self, ctx: &egui::Context, shape: CanvasShape) {
        self.project.canvas_state.set_shape(shape);
        self.show_message(
            ctx,
            format!("Canvas shape changed to {}.", shape.as_str()),
            false,
        );
    }

    fn export_png(&mut self, ctx: &egui::Context) {
        let path = match io::ask_png_save_path(&self.project.canvas_state) {
            Some(p) => p,
            None => return, // user cancelled
        };
        match io::export_png(
            &self.project.canvas_state,
            &self.palette,
            &path,
            io::EXPORT_SCALE,
        ) {
            Ok(()) => {
                log_info!("Exported PNG to {}", path.display());
                self.show_message(ctx, "Sprite exported successfully as PNG!", false);
            }
            Err(e) => {
                log_err!("PNG export failed: {}", e);
                self.show_message(ctx, format!("Error exporting PNG: {}", e), true);
            }
        }
    }

    fn save_project(&mut self, ctx: &egui::Context) {
        let path = match io::ask_project_save_path(&self.project.canvas_state) {
            Some(p) => p,
            None => return,
        };
        match io::save_project(&self.project.canvas_state, &path) {
            Ok(()) => {
                log_info!("Saved project to {}", path.display());
                self.project.path = Some(path);
                self.project.update_name_from_path();
                self.project.mark_clean();
                self.show_message(ctx, "Project saved successfully as JSON!", false);
            }
            Err(e) => {
                log_err!("Project save failed: {}", e);
                self.show_message(ctx, format!("Error saving project: {}", e), true);
            }
        }
    }

    fn load_project(&mut self, ctx: &egui::Context) {
        let path = match io::ask_project_open_path() {
            Some(p) => p,
            None => return,
        };
        match io::load_project(&path) {
            Ok(loaded) => {
                // Cancel any gesture before the buffer is swapped out from
                // under it.
                self.tools_panel.engine.cancel();
                self.project.canvas_state.replace(
                    loaded.grid_size,
                    loaded.pixels,
                    loaded.shape,
                );
                self.project.path = Some(path.clone());
                self.project.update_name_from_path();
                self.project.mark_clean();
                log_info!("Loaded project from {}", path.display());
                let n = loaded.grid_size;
                self.show_message(ctx, format!("Loaded {}x{} project.", n, n), false);
            }
            Err(e) => {
                // Validation failed: current session stays untouched.
                log_err!("Project load failed ({}): {}", path.display(), e);
                self.show_message(ctx, format!("Error loading project: {}", e), true);
            }
        }
    }

    fn handle_canvas_events(&mut self, events: &[CanvasEvent]) {
        let state = &mut self.project.canvas_state;
        let engine = &mut self.tools_panel.engine;
        let before = state.revision();

        for event in events {
            match *event {
                CanvasEvent::Pressed(x, y) => engine.pointer_down(state, x, y),
                CanvasEvent::Moved(x, y) => engine.pointer_moved(state, x, y),
                CanvasEvent::Released => engine.pointer_up(state),
            }
        }

        if state.revision() != before {
            self.project.mark_dirty();
        }
    }
}

impl eframe::App for PixelMakerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Dynamic window title: "PixelMaker - <name>[*]" ---
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
            "PixelMaker - {}",
            self.project.display_title()
        )));

        // --- Top toolbar: size presets, file actions ---
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label("New:");
                for size in SIZE_PRESETS {
                    if ui.button(format!("{0}x{0}", size)).clicked() {
                        self.start_new_project(ctx, size);
                        self.show_custom_size = false;
                    }
                }
                if ui
                    .selectable_label(self.show_custom_size, "Custom…")
                    .clicked()
                {
                    self.show_custom_size = !self.show_custom_size;
                }
                if self.show_custom_size {
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.custom_size_text)
                            .desired_width(48.0)
                            .hint_text("8-256"),
                    );
                    let entered =
                        edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Set").clicked() || entered {
                        self.apply_custom_size(ctx);
                    }
                }

                ui.separator();

                if ui.button("Export PNG").clicked() {
                    self.export_png(ctx);
                }
                if ui.button("Save Project").clicked() {
                    self.save_project(ctx);
                }
                if ui.button("Load Project").clicked() {
                    self.load_project(ctx);
                }
            });
        });

        // --- Status line ---
        let now = ctx.input(|i| i.time);
        if self.status.as_ref().is_some_and(|s| now >= s.expires_at) {
            self.status = None;
        }
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            if let Some(status) = &self.status {
                let color = if status.is_error {
                    egui::Color32::from_rgb(220, 60, 60)
                } else {
                    egui::Color32::from_rgb(70, 160, 70)
                };
                ui.colored_label(color, &status.text);
                // Keep repainting until the message expires.
                ctx.request_repaint_after(std::time::Duration::from_millis(250));
            } else {
                ui.label("");
            }
        });

        // --- Left panel: tools, shapes, palette ---
        egui::SidePanel::left("side_panel")
            .resizable(false)
            .show(ctx, |ui| {
                let shape = self.project.canvas_state.shape;
                if let Some(action) = self.tools_panel.ui(ui, shape) {
                    match action {
                        ToolAction::ToolSelected(tool) => {
                            log_info!("Tool selected: {}", tool.label());
                            // Eraser selection moves the active color to the
                            // transparent swatch.
                            self.colors_panel.selected_index = self.tools_panel.engine.active_color;
                        }
                        ToolAction::ShapeSelected(new_shape) => self.select_shape(ctx, new_shape),
                    }
                }

                ui.separator();
                ui.label("Palette:");
                if let Some(ColorAction::Selected(index)) =
                    self.colors_panel.ui(ui, &self.palette)
                {
                    self.tools_panel.engine.select_color(index);
                    // select_color may bounce the eraser back to the pencil.
                    self.colors_panel.selected_index = self.tools_panel.engine.active_color;
                }
            });

        // --- Central canvas ---
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                let events = self.canvas.show(
                    ui,
                    &self.project.canvas_state,
                    self.tools_panel.engine.preview_data(),
                    &self.palette,
                );
                if !events.is_empty() {
                    self.handle_canvas_events(&events);
                }
            });
        });
    }
}
