//! Enrollment Deck - Undergraduate Enrollment Statistics Viewer
//!
//! An interactive slide deck presenting undergraduate enrollment by gender
//! and race, comparing colleges across academic years.

mod charts;
mod config;
mod data;
mod gui;
mod ppt;
mod stats;

use eframe::egui;
use gui::DeckApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Enrollment Deck"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Enrollment Deck",
        options,
        Box::new(|cc| Ok(Box::new(DeckApp::new(cc)))),
    )
}
