#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

use pixelmaker::app::PixelMakerApp;
use pixelmaker::{cli, logger};

fn main() -> Result<(), eframe::Error> {
    // -- CLI / headless mode ---------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        use clap::Parser;
        let args = cli::CliArgs::parse();
        std::process::exit(cli::run(args));
    }

    // -- GUI mode --------------------------------------------------------

    // Initialize session log (overwrites previous session log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([760.0, 600.0])
            .with_title("PixelMaker"),
        ..Default::default()
    };

    eframe::run_native(
        "PixelMaker",
        options,
        Box::new(|cc| Box::new(PixelMakerApp::new(cc))),
    )
}
