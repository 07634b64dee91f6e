//! Offer Studio: author marketing offers with a live preview and inline-style HTML export.

mod app;
mod form;
mod highlight;
mod image_picker;
mod offer;
mod preview;
mod settings;
mod template_picker;

use crate::app::OfferStudioApp;

use eframe::egui;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "offer_studio=info,eframe=warn,egui=warn";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn initial_inner_size() -> egui::Vec2 {
    // Default offer box plus the form panel
    let offer = offer::OfferData::default();
    let mut w = offer.width as f32;
    let mut h = offer.height as f32;

    // Form side panel (default width = 380) and preview padding
    w += 380.0 + 120.0;

    // Menubar, preview header and padding
    h += 180.0;

    egui::vec2(w, h)
}

fn main() -> eframe::Result<()> {
    init_logging();

    let mut native_options = eframe::NativeOptions::default();
    let size = initial_inner_size();

    native_options.viewport = egui::ViewportBuilder::default()
        .with_inner_size(size)
        .with_min_inner_size(egui::vec2(640.0, 480.0))
        .with_resizable(true);

    tracing::info!("Starting Offer Studio");
    eframe::run_native(
        "Offer Studio",
        native_options,
        Box::new(|cc| {
            // Thumbnails and previews load from URLs and uploaded bytes
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::<OfferStudioApp>::default())
        }),
    )
}
