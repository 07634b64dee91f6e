//! Offer form: shows exactly the inputs the chosen template uses.

use crate::image_picker::{ImagePicker, ImageSources};
use crate::offer::registry::{self, METADATA_FIELDS};
use crate::offer::{DropShadow, OfferData, OfferEdit, OfferField};
use crate::template_picker::TemplatePicker;
use chrono::{Local, NaiveDate};
use egui_extras::DatePickerButton;

/// Which inputs are visible for an offer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FormLayout {
    pub(crate) metadata: &'static [OfferField],
    pub(crate) content: &'static [OfferField],
    pub(crate) layout: &'static [OfferField],
    pub(crate) can_submit: bool,
}

impl FormLayout {
    pub fn derive(offer: &OfferData) -> Self {
        Self {
            metadata: METADATA_FIELDS,
            content: registry::content_fields(offer.template_type),
            layout: registry::layout_fields(offer.template_type),
            can_submit: offer.template_type.is_set(),
        }
    }
}

/// What the user did this frame.
#[derive(Debug, Default)]
pub(crate) struct FormOutcome {
    pub(crate) edits: Vec<OfferEdit>,
    pub(crate) submitted: bool,
}

pub(crate) struct OfferForm {
    templates: TemplatePicker,
    background: ImagePicker,
}

impl Default for OfferForm {
    fn default() -> Self {
        Self {
            templates: TemplatePicker::default(),
            background: ImagePicker::new("background_image"),
        }
    }
}

fn text_input(ui: &mut egui::Ui, offer: &OfferData, field: OfferField, out: &mut Vec<OfferEdit>) {
    let Some(value) = offer.text(field) else {
        return;
    };
    let hint = registry::placeholder(offer.template_type, field);
    let mut buf = value.to_string();
    ui.label(field.label());
    let response = if field == OfferField::Description {
        ui.add(
            egui::TextEdit::multiline(&mut buf)
                .hint_text(hint)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        )
    } else {
        ui.add(
            egui::TextEdit::singleline(&mut buf)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        )
    };
    if response.changed() {
        out.push(OfferEdit::Text(field, buf));
    }
}

fn date_input(
    ui: &mut egui::Ui,
    label: &str,
    salt: &str,
    value: Option<NaiveDate>,
) -> Option<Option<NaiveDate>> {
    let mut changed = None;
    ui.horizontal(|ui| {
        let mut enabled = value.is_some();
        if ui.checkbox(&mut enabled, label).changed() {
            changed = Some(enabled.then(|| Local::now().date_naive()));
        }
        if let Some(mut date) = value {
            if ui.add(DatePickerButton::new(&mut date).id_salt(salt)).changed() {
                changed = Some(Some(date));
            }
        }
    });
    changed
}

impl OfferForm {
    /// Draws the form for `offer`. Edits are returned, not applied.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        offer: &OfferData,
        images: &mut ImageSources,
    ) -> FormOutcome {
        let form = FormLayout::derive(offer);
        let mut out = FormOutcome::default();

        // uploads can finish while the premium fields are hidden
        if !form.content.contains(&OfferField::BackgroundImage)
            && let Some(uri) = self.background.poll()
        {
            out.edits
                .push(OfferEdit::Text(OfferField::BackgroundImage, uri));
        }

        for &field in form.metadata {
            text_input(ui, offer, field, &mut out.edits);
            ui.add_space(6.0);
        }

        ui.label("Offer Template");
        if let Some(t) = self.templates.show(ui, offer.template_type) {
            out.edits.push(OfferEdit::Template(t));
        }

        if !form.content.is_empty() {
            ui.add_space(8.0);
            ui.separator();
            ui.strong("Content");
            for &field in form.content {
                if field == OfferField::BackgroundImage {
                    ui.label(field.label());
                    let hint = registry::placeholder(offer.template_type, field);
                    if let Some(v) =
                        self.background
                            .show(ui, &offer.background_image, hint, images)
                    {
                        out.edits.push(OfferEdit::Text(field, v));
                    }
                } else {
                    text_input(ui, offer, field, &mut out.edits);
                }
                ui.add_space(4.0);
            }
        }

        if !form.layout.is_empty() {
            ui.add_space(8.0);
            ui.separator();
            ui.strong("Schedule & Layout");
            layout_inputs(ui, offer, form.layout, &mut out.edits);
        }

        ui.add_space(12.0);
        let submit = ui.add_enabled(
            form.can_submit,
            egui::Button::new("Submit Offer").min_size(egui::vec2(ui.available_width(), 32.0)),
        );
        if submit.clicked() {
            out.submitted = true;
        }
        out
    }

    /// Whether the selected template changed between two offers.
    pub fn template_changed(before: &OfferData, after: &OfferData) -> bool {
        before.template_type != after.template_type
    }
}

fn layout_inputs(
    ui: &mut egui::Ui,
    offer: &OfferData,
    fields: &[OfferField],
    out: &mut Vec<OfferEdit>,
) {
    for field in fields {
        match field {
            OfferField::StartDate => {
                if let Some(d) = date_input(ui, field.label(), "start_date", offer.start_date) {
                    out.push(OfferEdit::StartDate(d));
                }
            }
            OfferField::EndDate => {
                if let Some(d) = date_input(ui, field.label(), "end_date", offer.end_date) {
                    out.push(OfferEdit::EndDate(d));
                }
            }
            OfferField::Width => {
                ui.horizontal(|ui| {
                    ui.label("Width (px)");
                    let mut w = offer.width;
                    let resp = ui.add_enabled(
                        !offer.use_full_width,
                        egui::DragValue::new(&mut w).range(50..=2000),
                    );
                    if resp.changed() {
                        out.push(OfferEdit::Width(w));
                    }
                });
            }
            OfferField::Height => {
                ui.horizontal(|ui| {
                    ui.label("Height (px)");
                    let mut h = offer.height;
                    if ui
                        .add(egui::DragValue::new(&mut h).range(50..=2000))
                        .changed()
                    {
                        out.push(OfferEdit::Height(h));
                    }
                });
            }
            OfferField::UseFullWidth => {
                let mut full = offer.use_full_width;
                if ui.checkbox(&mut full, field.label()).changed() {
                    out.push(OfferEdit::UseFullWidth(full));
                }
            }
            OfferField::DropShadow => {
                ui.horizontal(|ui| {
                    ui.label(field.label());
                    let mut shadow = offer.drop_shadow;
                    egui::ComboBox::from_id_salt("drop_shadow")
                        .selected_text(shadow.display_name())
                        .show_ui(ui, |ui| {
                            for s in DropShadow::ALL {
                                ui.selectable_value(&mut shadow, s, s.display_name());
                            }
                        });
                    if shadow != offer.drop_shadow {
                        out.push(OfferEdit::DropShadow(shadow));
                    }
                });
            }
            _ => {}
        }
    }
}

/// Applies edits in order, each merged into the previous value.
pub(crate) fn apply(offer: &OfferData, edits: Vec<OfferEdit>) -> OfferData {
    edits.into_iter().fold(offer.clone(), |acc, edit| acc.with(edit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::TemplateType;

    fn visible_content_ids(template: TemplateType) -> Vec<&'static str> {
        registry::content_fields(template)
            .iter()
            .map(|f| match f {
                OfferField::OfferTitle => "offerTitle",
                OfferField::CtaButton => "ctaButton",
                OfferField::BackgroundImage => "backgroundImage",
                OfferField::Badge => "badge",
                OfferField::Subtitle => "subtitle",
                OfferField::Price => "price",
                OfferField::Discount => "discount",
                _ => "",
            })
            .collect()
    }

    #[test]
    fn test_visible_content_fields() {
        assert!(visible_content_ids(TemplateType::Unset).is_empty());
        assert_eq!(visible_content_ids(TemplateType::Basic), vec!["offerTitle", "ctaButton"]);
        assert_eq!(
            visible_content_ids(TemplateType::Premium),
            vec!["offerTitle", "ctaButton", "backgroundImage", "badge"]
        );
        assert_eq!(
            visible_content_ids(TemplateType::Promotional),
            vec!["offerTitle", "ctaButton", "subtitle", "price", "discount"]
        );
    }

    #[test]
    fn test_form_layout_without_template() {
        let form = FormLayout::derive(&OfferData::default());
        assert_eq!(form.metadata, &[OfferField::Title, OfferField::Description]);
        assert!(form.content.is_empty());
        assert!(form.layout.is_empty());
        assert!(!form.can_submit);
    }

    #[test]
    fn test_form_layout_with_template() {
        let offer = OfferData::default().with(OfferEdit::Template(TemplateType::Premium));
        let form = FormLayout::derive(&offer);
        assert_eq!(form.content.len(), 4);
        assert!(form.layout.contains(&OfferField::UseFullWidth));
        assert!(form.can_submit);
    }

    #[test]
    fn test_apply_is_last_write_wins() {
        let offer = apply(
            &OfferData::default(),
            vec![
                OfferEdit::Text(OfferField::BackgroundImage, "data:image/png;base64,AAAA".into()),
                OfferEdit::Text(OfferField::BackgroundImage, "data:image/png;base64,BBBB".into()),
                OfferEdit::Width(640),
            ],
        );
        assert_eq!(offer.background_image, "data:image/png;base64,BBBB");
        assert_eq!(offer.width, 640);
    }

    #[test]
    fn test_template_changed() {
        let a = OfferData::default();
        let b = a.with(OfferEdit::Template(TemplateType::Basic));
        assert!(OfferForm::template_changed(&a, &b));
        assert!(!OfferForm::template_changed(&b, &b.with(OfferEdit::Width(10))));
    }
}
