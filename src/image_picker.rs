//! Image field editor: free text, a curated gallery, and local file upload.
//!
//! Uploads are read and base64-encoded on a worker thread and delivered as
//! `data:` URIs over a channel that the UI drains each frame. There is no
//! cancellation: every completed upload is applied in arrival order, so the
//! last one to finish wins.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use egui::load::Bytes;
use std::borrow::Cow;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, Sender, channel};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CuratedImage {
    pub(crate) id: &'static str,
    pub(crate) url: &'static str,
    pub(crate) description: &'static str,
}

const fn unsplash(id: &'static str, url: &'static str, description: &'static str) -> CuratedImage {
    CuratedImage {
        id,
        url,
        description,
    }
}

pub(crate) const CURATED: [CuratedImage; 10] = [
    unsplash(
        "photo-1649972904349-6e44c42644a7",
        "https://images.unsplash.com/photo-1649972904349-6e44c42644a7?w=400&h=300&fit=crop",
        "Woman with laptop",
    ),
    unsplash(
        "photo-1488590528505-98d2b5aba04b",
        "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?w=400&h=300&fit=crop",
        "Gray laptop computer",
    ),
    unsplash(
        "photo-1518770660439-4636190af475",
        "https://images.unsplash.com/photo-1518770660439-4636190af475?w=400&h=300&fit=crop",
        "Circuit board",
    ),
    unsplash(
        "photo-1461749280684-dccba630e2f6",
        "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=400&h=300&fit=crop",
        "Java programming",
    ),
    unsplash(
        "photo-1486312338219-ce68d2c6f44d",
        "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=300&fit=crop",
        "Person using MacBook",
    ),
    unsplash(
        "photo-1581091226825-a6a2a5aee158",
        "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400&h=300&fit=crop",
        "Woman with laptop",
    ),
    unsplash(
        "photo-1485827404703-89b55fcc595e",
        "https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=400&h=300&fit=crop",
        "White robot",
    ),
    unsplash(
        "photo-1526374965328-7f61d4dc18c5",
        "https://images.unsplash.com/photo-1526374965328-7f61d4dc18c5?w=400&h=300&fit=crop",
        "Matrix style",
    ),
    unsplash(
        "photo-1531297484001-80022131f5a1",
        "https://images.unsplash.com/photo-1531297484001-80022131f5a1?w=400&h=300&fit=crop",
        "Laptop on surface",
    ),
    unsplash(
        "photo-1487058792275-0ad4aaf24ca7",
        "https://images.unsplash.com/photo-1487058792275-0ad4aaf24ca7?w=400&h=300&fit=crop",
        "Colorful code",
    ),
];

#[derive(Error, Debug)]
pub(crate) enum UploadError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    Empty(PathBuf),
}

/// MIME type guessed from the file extension.
pub(crate) fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

pub(crate) fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Splits a base64 `data:` URI into its MIME type and decoded bytes.
pub(crate) fn decode_data_uri(uri: &str) -> Option<(String, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = BASE64.decode(payload.trim()).ok()?;
    Some((mime.to_string(), bytes))
}

/// Reads a file and encodes it as a data URI.
pub(crate) fn read_as_data_uri(path: &Path) -> Result<String, UploadError> {
    let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(UploadError::Empty(path.to_path_buf()));
    }
    Ok(encode_data_uri(mime_for(path), &bytes))
}

/// Resolves image values to egui image sources.
///
/// URLs go to the installed loaders. `data:` URIs are decoded once and
/// handed over as bytes, keyed by a hash of the URI.
#[derive(Default)]
pub(crate) struct ImageSources {
    last: Option<(String, Cow<'static, str>, Bytes)>,
}

impl ImageSources {
    pub fn source(&mut self, value: &str) -> egui::ImageSource<'static> {
        if !value.starts_with("data:") {
            return egui::ImageSource::Uri(Cow::Owned(value.to_string()));
        }
        if let Some((key, uri, bytes)) = &self.last
            && key == value
        {
            return egui::ImageSource::Bytes {
                uri: uri.clone(),
                bytes: bytes.clone(),
            };
        }
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        let uri: Cow<'static, str> = Cow::Owned(format!("bytes://offer-image-{:x}", hasher.finish()));
        let bytes: Bytes = decode_data_uri(value)
            .map(|(_, bytes)| bytes)
            .unwrap_or_default()
            .into();
        self.last = Some((value.to_string(), uri.clone(), bytes.clone()));
        egui::ImageSource::Bytes { uri, bytes }
    }
}

/// Editor state for one image field.
pub(crate) struct ImagePicker {
    id: &'static str,
    gallery_open: bool,
    /// File most recently chosen for upload, shown next to the input.
    last_upload: Option<PathBuf>,
    tx: Sender<Result<String, UploadError>>,
    rx: Receiver<Result<String, UploadError>>,
    in_flight: usize,
}

impl ImagePicker {
    pub fn new(id: &'static str) -> Self {
        let (tx, rx) = channel();
        Self {
            id,
            gallery_open: false,
            last_upload: None,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight > 0
    }

    /// Starts reading `path` on a worker thread. Completion is picked up by `poll`.
    pub fn start_upload(&mut self, path: PathBuf, ctx: Option<egui::Context>) {
        tracing::debug!(field = self.id, path = %path.display(), "Upload started");
        self.last_upload = Some(path.clone());
        self.in_flight += 1;
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = read_as_data_uri(&path);
            // receiver gone means the view was closed; nothing to deliver to
            let _ = tx.send(result);
            if let Some(ctx) = ctx {
                ctx.request_repaint();
            }
        });
    }

    /// Drains finished uploads and returns the value of the last successful one.
    pub fn poll(&mut self) -> Option<String> {
        let mut latest = None;
        while let Ok(result) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            match result {
                Ok(uri) => {
                    tracing::info!(field = self.id, bytes = uri.len(), "Upload completed");
                    latest = Some(uri);
                }
                Err(e) => tracing::warn!(field = self.id, "Upload failed: {e}"),
            }
        }
        latest
    }

    fn clear(&mut self) {
        self.last_upload = None;
    }

    /// Draws the editor. Returns the new value when it changed this frame.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        value: &str,
        hint: &str,
        images: &mut ImageSources,
    ) -> Option<String> {
        let mut changed = self.poll();
        let mut buf = changed.clone().unwrap_or_else(|| value.to_string());

        ui.horizontal(|ui| {
            let edit = egui::TextEdit::singleline(&mut buf)
                .hint_text(hint)
                .desired_width(ui.available_width() - 150.0);
            if ui.add(edit).changed() {
                changed = Some(buf.clone());
            }
            if ui.button("Browse").on_hover_text("Pick from gallery").clicked() {
                self.gallery_open = true;
            }
            if ui.button("Upload").on_hover_text("Upload a local image").clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"])
                    .pick_file()
            {
                self.start_upload(path, Some(ui.ctx().clone()));
            }
            if !buf.is_empty() && ui.button("✖").on_hover_text("Clear").clicked() {
                self.clear();
                changed = Some(String::new());
            }
        });

        if self.is_uploading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Reading file...");
            });
        } else if let Some(path) = &self.last_upload
            && let Some(name) = path.file_name()
        {
            ui.weak(format!("Uploaded: {}", name.to_string_lossy()));
        }

        let shown = changed.as_deref().unwrap_or(value);
        if !shown.is_empty() {
            ui.add(
                egui::Image::new(images.source(shown))
                    .max_height(128.0)
                    .maintain_aspect_ratio(true)
                    .corner_radius(4),
            );
        }

        if let Some(url) = self.gallery_ui(ui.ctx()) {
            changed = Some(url);
        }
        changed
    }

    fn gallery_ui(&mut self, ctx: &egui::Context) -> Option<String> {
        let mut picked = None;
        let mut open = self.gallery_open;
        egui::Window::new("Select Image")
            .id(egui::Id::new(("image_gallery", self.id)))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(640.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("image_gallery_scroll")
                    .max_height(480.0)
                    .show(ui, |ui| {
                        egui::Grid::new(("image_gallery_grid", self.id))
                            .num_columns(3)
                            .spacing([12.0, 12.0])
                            .show(ui, |ui| {
                                for (i, image) in CURATED.iter().enumerate() {
                                    let clicked = ui
                                        .vertical(|ui| {
                                            let resp = ui.add(
                                                egui::Image::new(image.url)
                                                    .fit_to_exact_size(egui::vec2(180.0, 120.0))
                                                    .sense(egui::Sense::click()),
                                            );
                                            ui.small(image.description);
                                            resp.clicked()
                                        })
                                        .inner;
                                    if clicked {
                                        tracing::debug!(image = image.id, "Gallery image picked");
                                        picked = Some(image.url.to_string());
                                    }
                                    if i % 3 == 2 {
                                        ui.end_row();
                                    }
                                }
                            });
                    });
            });
        self.gallery_open = open && picked.is_none();
        picked
    }
}
