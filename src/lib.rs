//! PixelMaker — a shaped pixel-art sprite editor.
//!
//! The library half of the crate: canvas state, tools, palette, project
//! file I/O, and the eframe application shell.  The binary in `main.rs`
//! routes between the GUI and the headless CLI exporter.

pub mod app;
pub mod canvas;
pub mod cli;
pub mod components;
pub mod io;
pub mod logger;
pub mod project;
