//! Template catalog window.

use crate::offer::TemplateType;
use crate::offer::registry::{self, TemplateOption};

#[derive(Default)]
pub(crate) struct TemplatePicker {
    open: bool,
}

impl TemplatePicker {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Resolves a catalog id and closes the window. Unknown ids change nothing.
    pub fn select_template(&mut self, id: &str) -> Option<TemplateType> {
        let template = TemplateType::from_id(id).filter(TemplateType::is_set)?;
        self.open = false;
        tracing::info!(%template, "Template selected");
        Some(template)
    }

    /// Name of the selected template for the summary line.
    pub fn selected_name(selected: TemplateType) -> &'static str {
        registry::find(selected.id())
            .map(|t| t.name)
            .unwrap_or("None selected")
    }

    /// Summary row with the Browse button. Returns a newly chosen template.
    pub fn show(&mut self, ui: &mut egui::Ui, selected: TemplateType) -> Option<TemplateType> {
        ui.horizontal(|ui| {
            ui.label("Selected:");
            ui.strong(Self::selected_name(selected));
            if ui
                .button("Browse")
                .on_hover_text("Choose an offer template")
                .clicked()
            {
                self.open();
            }
        });
        self.window(ui.ctx(), selected)
    }

    fn window(&mut self, ctx: &egui::Context, selected: TemplateType) -> Option<TemplateType> {
        if !self.is_open() {
            return None;
        }
        let mut clicked: Option<&'static str> = None;
        let mut open = self.open;
        egui::Window::new("Choose an Offer Template")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(760.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("template_catalog_scroll")
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            for option in registry::catalog() {
                                if card(ui, option, option.template == selected) {
                                    clicked = Some(option.id());
                                }
                            }
                        });
                    });
            });
        self.open = open;
        clicked.and_then(|id| self.select_template(id))
    }
}

/// One catalog card. Returns true when clicked.
fn card(ui: &mut egui::Ui, option: &TemplateOption, is_selected: bool) -> bool {
    let stroke = if is_selected {
        egui::Stroke::new(2.0, egui::Color32::from_rgb(59, 130, 246))
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };
    let response = egui::Frame::group(ui.style())
        .stroke(stroke)
        .corner_radius(8)
        .show(ui, |ui| {
            ui.set_width(220.0);
            ui.vertical(|ui| {
                ui.add(
                    egui::Image::new(option.preview)
                        .fit_to_exact_size(egui::vec2(220.0, 110.0))
                        .corner_radius(6),
                );
                ui.heading(option.name);
                ui.label(option.description);
                ui.horizontal_wrapped(|ui| {
                    for field in option.fields() {
                        egui::Frame::new()
                            .fill(ui.visuals().faint_bg_color)
                            .corner_radius(8)
                            .inner_margin(egui::Margin::symmetric(6, 1))
                            .show(ui, |ui| {
                                ui.small(field);
                            });
                    }
                });
            });
        })
        .response;
    response.interact(egui::Sense::click()).clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_template_closes_picker() {
        let mut picker = TemplatePicker::default();
        picker.open();
        assert!(picker.is_open());
        assert_eq!(picker.select_template("premium"), Some(TemplateType::Premium));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_unknown_template_is_ignored() {
        let mut picker = TemplatePicker::default();
        picker.open();
        assert_eq!(picker.select_template("gold"), None);
        assert!(picker.is_open());
    }

    #[test]
    fn test_selected_name() {
        assert_eq!(TemplatePicker::selected_name(TemplateType::Unset), "None selected");
        assert_eq!(
            TemplatePicker::selected_name(TemplateType::Promotional),
            "Promotional Offer"
        );
    }
}
