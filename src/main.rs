//! Biblio Client - a desktop front-end for the library backend
//!
//! Architecture:
//! - Main thread: runs the egui UI and owns all view state
//! - Backend thread: runs a Tokio runtime for HTTP calls and reveal timing
//! - Communication via crossbeam channels (lock-free, sync-safe)

use eframe::egui;
use tracing_subscriber::EnvFilter;

use biblio_client::app::BiblioApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Biblio - Library Search",
        options,
        Box::new(|cc| Ok(Box::new(BiblioApp::new(cc)?))),
    )
}
