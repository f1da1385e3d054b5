//! Desktop viewer built on eframe.

mod app;
mod input;
mod render;

use pdfpix_core::config::ViewerConfig;
use pdfpix_core::store::ImageSet;
use tracing::info;

use app::ViewerApp;

/// Open the viewer window and block until it is closed.
pub fn run(images: ImageSet, config: ViewerConfig) -> eframe::Result {
    info!("Opening viewer with {} images", images.len());

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(config.initial_size)
        .with_min_inner_size(config.min_size)
        .with_title(config.title.clone());
    if config.always_on_top {
        viewport = viewport.with_window_level(egui::WindowLevel::AlwaysOnTop);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app_name = config.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |_cc| Ok(Box::new(ViewerApp::new(images, &config)))),
    )
}
