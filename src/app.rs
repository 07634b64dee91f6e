use crate::{
    form::{self, OfferForm},
    highlight::{self, Highlighter},
    image_picker::ImageSources,
    offer::{OfferData, submit},
    preview::{self, DisplayMode, Rendered},
    settings::{StudioSettings, TemplateSwitchPolicy},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ExportError {
    #[error("Nothing to export: choose a template first")]
    NoMarkup,

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the markup wrapped in a minimal standalone HTML document.
pub(crate) fn export_markup(path: &Path, markup: Option<&str>) -> Result<(), ExportError> {
    let markup = markup.ok_or(ExportError::NoMarkup)?;
    let document = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Offer</title></head>\n<body>\n{markup}</body>\n</html>\n"
    );
    std::fs::write(path, document).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Everything owned by the authoring view. Dropped on navigation.
#[derive(Default)]
struct AuthoringView {
    offer: OfferData,
    form: OfferForm,
    display_mode: DisplayMode,
}

impl AuthoringView {
    /// Applies this frame's edits and resets the display mode on template change.
    fn update(&mut self, edits: Vec<crate::offer::OfferEdit>, policy: TemplateSwitchPolicy) {
        if edits.is_empty() {
            return;
        }
        let next = form::apply(&self.offer, edits);
        if OfferForm::template_changed(&self.offer, &next) {
            self.display_mode = DisplayMode::Preview;
            self.offer = policy.apply(next);
        } else {
            self.offer = next;
        }
    }
}

enum Route {
    Landing,
    Authoring(Box<AuthoringView>),
}

pub(crate) struct OfferStudioApp {
    route: Route,
    settings: StudioSettings,
    /// Syntax highlighter for the markup source view
    highlighter: Highlighter,
    images: ImageSources,
    /// Error/status message to display
    status_message: Option<(String, std::time::Instant)>,
}

impl Default for OfferStudioApp {
    fn default() -> Self {
        Self {
            route: Route::Landing,
            settings: StudioSettings::default(),
            highlighter: Highlighter::new(),
            images: ImageSources::default(),
            status_message: None,
        }
    }
}

impl OfferStudioApp {
    /// Set a status message that will auto-clear after a few seconds
    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, std::time::Instant::now()));
    }

    fn open_authoring(&mut self) {
        tracing::debug!("Opening authoring view");
        self.route = Route::Authoring(Box::default());
    }

    fn close_authoring(&mut self) {
        tracing::debug!("Discarding draft offer");
        self.route = Route::Landing;
    }

    fn current_markup(&self) -> Option<String> {
        match &self.route {
            Route::Authoring(view) => preview::render(&view.offer).markup().map(str::to_string),
            Route::Landing => None,
        }
    }

    fn export(&mut self) {
        let markup = self.current_markup();
        if markup.is_none() {
            self.set_status(ExportError::NoMarkup.to_string());
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("HTML", &["html", "htm"])
            .set_file_name("offer.html")
            .save_file()
        else {
            return;
        };
        match export_markup(&path, markup.as_deref()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "Markup exported");
                self.set_status(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                tracing::error!("{e}");
                self.set_status(e.to_string());
            }
        }
    }

    fn copy_markup(&mut self, ctx: &egui::Context) {
        match self.current_markup() {
            Some(markup) => {
                ctx.copy_text(markup);
                self.set_status("Markup copied to clipboard".into());
            }
            None => self.set_status(ExportError::NoMarkup.to_string()),
        }
    }

    fn submit(&mut self) {
        let Route::Authoring(view) = &self.route else {
            return;
        };
        let msg = match submit::submit(&view.offer) {
            Ok(_) => "Offer submitted (written to log)".to_string(),
            Err(e) => {
                tracing::warn!("Submission rejected: {e}");
                e.to_string()
            }
        };
        self.set_status(msg);
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        // Show status message if recent
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed().as_secs() < 3 {
                ui.horizontal(|ui| {
                    ui.label(msg);
                });
            } else {
                self.status_message = None;
            }
        }

        let authoring = matches!(self.route, Route::Authoring(_));
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .button("New Offer")
                    .on_hover_text("Start a new offer, discarding the current draft")
                    .clicked()
                {
                    self.open_authoring();
                    self.set_status("New offer created".into());
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.add_enabled_ui(authoring, |ui| {
                    if ui
                        .button("Export HTML...")
                        .on_hover_text("Save the inline-style markup (Ctrl+E)")
                        .clicked()
                    {
                        self.export();
                        ui.close_kind(egui::UiKind::Menu);
                    }
                    if ui
                        .button("Copy Markup")
                        .on_hover_text("Copy the inline-style markup to the clipboard")
                        .clicked()
                    {
                        self.copy_markup(ui.ctx());
                        ui.close_kind(egui::UiKind::Menu);
                    }
                    ui.separator();
                    if ui
                        .button("Back to Start")
                        .on_hover_text("Leave the editor and discard the draft")
                        .clicked()
                    {
                        self.close_authoring();
                        ui.close_kind(egui::UiKind::Menu);
                    }
                });
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut self.settings.syntax_highlighting, "Syntax Highlighting")
                    .on_hover_text("Highlight the markup source view");
                ui.separator();
                ui.label("On template change");
                for policy in [
                    TemplateSwitchPolicy::KeepHidden,
                    TemplateSwitchPolicy::ClearStale,
                ] {
                    ui.radio_value(
                        &mut self.settings.template_switch,
                        policy,
                        policy.display_name(),
                    );
                }
            });
        });
    }

    fn landing_ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space((ui.available_height() / 2.0 - 90.0).max(24.0));
                ui.heading(egui::RichText::new("Offer Creator").size(40.0).strong());
                ui.add_space(12.0);
                ui.label(
                    egui::RichText::new(
                        "Create beautiful, customizable offers with real-time preview and multiple templates",
                    )
                    .size(18.0),
                );
                ui.add_space(24.0);
                if ui
                    .add(
                        egui::Button::new(egui::RichText::new("Create New Offer").size(18.0))
                            .min_size(egui::vec2(220.0, 44.0)),
                    )
                    .clicked()
                {
                    self.open_authoring();
                }
            });
        });
    }

    fn preview_panel(
        ui: &mut egui::Ui,
        view: &mut AuthoringView,
        rendered: &Rendered,
        highlighter: Option<&Highlighter>,
        images: &mut ImageSources,
    ) {
        ui.horizontal(|ui| {
            ui.heading("Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                for mode in [DisplayMode::Source, DisplayMode::Preview] {
                    ui.selectable_value(&mut view.display_mode, mode, mode.display_name());
                }
            });
        });
        ui.separator();

        match (rendered, view.display_mode) {
            (Rendered::Placeholder, _) => preview::paint::placeholder(ui),
            (Rendered::Offer { view: offer_view, .. }, DisplayMode::Preview) => {
                egui::ScrollArea::both()
                    .id_salt("offer_preview_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        // room for the drop shadow
                        ui.add_space(12.0);
                        ui.horizontal(|ui| {
                            ui.add_space(12.0);
                            preview::paint::show(ui, offer_view, images);
                        });
                    });
            }
            (Rendered::Offer { markup, .. }, DisplayMode::Source) => {
                highlight::code_viewer(ui, highlighter, markup);
            }
        }
    }

    fn authoring_ui(&mut self, ctx: &egui::Context) {
        let Route::Authoring(view) = &mut self.route else {
            return;
        };

        let mut submitted = false;
        egui::SidePanel::left("offer_form")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.heading("Create new offer");
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("offer_form_scroll")
                    .show(ui, |ui| {
                        let outcome = view.form.show(ui, &view.offer, &mut self.images);
                        submitted = outcome.submitted;
                        view.update(outcome.edits, self.settings.template_switch);
                    });
            });

        // Re-derived every frame from the latest offer
        let rendered = preview::render(&view.offer);
        let highlighter = self
            .settings
            .syntax_highlighting
            .then_some(&self.highlighter);
        egui::CentralPanel::default().show(ctx, |ui| {
            Self::preview_panel(ui, view, &rendered, highlighter, &mut self.images);
        });

        if submitted {
            self.submit();
        }
    }
}

impl eframe::App for OfferStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keyboard shortcuts - check input first, then apply changes
        let (toggle_source, export_pressed) = ctx.input(|i| {
            // F5: Toggle preview / source
            let toggle = i.key_pressed(egui::Key::F5);
            let export = i.modifiers.command && i.key_pressed(egui::Key::E);
            (toggle, export)
        });

        if toggle_source && let Route::Authoring(view) = &mut self.route {
            view.display_mode = match view.display_mode {
                DisplayMode::Preview => DisplayMode::Source,
                DisplayMode::Source => DisplayMode::Preview,
            };
        }
        if export_pressed && matches!(self.route, Route::Authoring(_)) {
            self.export();
        }

        egui::TopBottomPanel::top("menubar").show(ctx, |ui| self.top_bar(ui));

        match self.route {
            Route::Landing => self.landing_ui(ctx),
            Route::Authoring(_) => self.authoring_ui(ctx),
        }
    }
}
