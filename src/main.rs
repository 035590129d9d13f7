// src/main.rs
mod engine;
mod gui;
mod history;
mod session;
mod types;
use eframe::egui;
fn main() -> eframe::Result<()> {
    env_logger::init();
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([900.0, 600.0])
        .with_title("Cognisync v0.1");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Cognisync",
        options,
        Box::new(|_cc| Box::new(gui::CognisyncApp::default())),
    )
}
