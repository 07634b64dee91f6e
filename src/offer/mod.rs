//! The offer record and the edits that produce new versions of it.

pub(crate) mod registry;
pub(crate) mod submit;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) const DEFAULT_WIDTH: u32 = 400;
pub(crate) const DEFAULT_HEIGHT: u32 = 420;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TemplateType {
    /// No template chosen yet; nothing template-specific is shown.
    #[default]
    #[serde(rename = "")]
    Unset,
    Basic,
    Premium,
    Promotional,
}

impl TemplateType {
    #[cfg(test)]
    pub const ALL: [TemplateType; 3] = [
        TemplateType::Basic,
        TemplateType::Premium,
        TemplateType::Promotional,
    ];

    pub const fn id(&self) -> &'static str {
        match self {
            TemplateType::Unset => "",
            TemplateType::Basic => "basic",
            TemplateType::Premium => "premium",
            TemplateType::Promotional => "promotional",
        }
    }

    /// Looks up a template by catalog id. The empty id maps to `Unset`.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "" => Some(TemplateType::Unset),
            "basic" => Some(TemplateType::Basic),
            "premium" => Some(TemplateType::Premium),
            "promotional" => Some(TemplateType::Promotional),
            _ => None,
        }
    }

    pub const fn is_set(&self) -> bool {
        !matches!(self, TemplateType::Unset)
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum DropShadow {
    Light,
    #[default]
    Medium,
    Dark,
}

impl DropShadow {
    pub const ALL: [DropShadow; 3] = [DropShadow::Light, DropShadow::Medium, DropShadow::Dark];

    /// Unrecognized names fall back to `Medium`.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => DropShadow::Light,
            "dark" => DropShadow::Dark,
            _ => DropShadow::Medium,
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            DropShadow::Light => "Light",
            DropShadow::Medium => "Medium",
            DropShadow::Dark => "Dark",
        }
    }
}

impl<'de> Deserialize<'de> for DropShadow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(DropShadow::parse_lossy(&name))
    }
}

/// Every editable field of an offer, across all templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum OfferField {
    Title,
    Description,
    StartDate,
    EndDate,
    OfferTitle,
    CtaButton,
    BackgroundImage,
    Badge,
    Subtitle,
    Price,
    Discount,
    Width,
    Height,
    UseFullWidth,
    DropShadow,
}

impl OfferField {
    /// Fields holding free text that only some templates use.
    pub const TEMPLATE_TEXT: [OfferField; 7] = [
        OfferField::OfferTitle,
        OfferField::CtaButton,
        OfferField::BackgroundImage,
        OfferField::Badge,
        OfferField::Subtitle,
        OfferField::Price,
        OfferField::Discount,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            OfferField::Title => "Title",
            OfferField::Description => "Description",
            OfferField::StartDate => "Start Date",
            OfferField::EndDate => "End Date",
            OfferField::OfferTitle => "Offer Title",
            OfferField::CtaButton => "CTA Button",
            OfferField::BackgroundImage => "Background Image",
            OfferField::Badge => "Badge",
            OfferField::Subtitle => "Subtitle",
            OfferField::Price => "Price",
            OfferField::Discount => "Discount",
            OfferField::Width => "Width",
            OfferField::Height => "Height",
            OfferField::UseFullWidth => "Use Full Width",
            OfferField::DropShadow => "Drop Shadow",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct OfferData {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) template_type: TemplateType,
    pub(crate) start_date: Option<NaiveDate>,
    pub(crate) end_date: Option<NaiveDate>,
    // template-specific text, empty means unset
    pub(crate) offer_title: String,
    pub(crate) cta_button: String,
    pub(crate) background_image: String,
    pub(crate) badge: String,
    pub(crate) subtitle: String,
    pub(crate) price: String,
    pub(crate) discount: String,
    // layout
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) use_full_width: bool,
    pub(crate) drop_shadow: DropShadow,
}

impl Default for OfferData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            template_type: TemplateType::Unset,
            start_date: None,
            end_date: None,
            offer_title: String::new(),
            cta_button: String::new(),
            background_image: String::new(),
            badge: String::new(),
            subtitle: String::new(),
            price: String::new(),
            discount: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            use_full_width: false,
            drop_shadow: DropShadow::default(),
        }
    }
}

/// A single-field change. Applying one yields a new `OfferData`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum OfferEdit {
    Text(OfferField, String),
    Template(TemplateType),
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    Width(u32),
    Height(u32),
    UseFullWidth(bool),
    DropShadow(DropShadow),
}

impl OfferData {
    /// Returns the previous value merged with one changed field.
    #[must_use]
    pub fn with(&self, edit: OfferEdit) -> Self {
        let mut next = self.clone();
        match edit {
            OfferEdit::Text(field, value) => {
                if let Some(slot) = next.text_mut(field) {
                    *slot = value;
                }
            }
            OfferEdit::Template(t) => next.template_type = t,
            OfferEdit::StartDate(d) => next.start_date = d,
            OfferEdit::EndDate(d) => next.end_date = d,
            OfferEdit::Width(w) => next.width = w,
            OfferEdit::Height(h) => next.height = h,
            OfferEdit::UseFullWidth(b) => next.use_full_width = b,
            OfferEdit::DropShadow(s) => next.drop_shadow = s,
        }
        next
    }

    /// Text value of a field. Non-text fields return `None`.
    pub fn text(&self, field: OfferField) -> Option<&str> {
        let s = match field {
            OfferField::Title => &self.title,
            OfferField::Description => &self.description,
            OfferField::OfferTitle => &self.offer_title,
            OfferField::CtaButton => &self.cta_button,
            OfferField::BackgroundImage => &self.background_image,
            OfferField::Badge => &self.badge,
            OfferField::Subtitle => &self.subtitle,
            OfferField::Price => &self.price,
            OfferField::Discount => &self.discount,
            _ => return None,
        };
        Some(s.as_str())
    }

    fn text_mut(&mut self, field: OfferField) -> Option<&mut String> {
        Some(match field {
            OfferField::Title => &mut self.title,
            OfferField::Description => &mut self.description,
            OfferField::OfferTitle => &mut self.offer_title,
            OfferField::CtaButton => &mut self.cta_button,
            OfferField::BackgroundImage => &mut self.background_image,
            OfferField::Badge => &mut self.badge,
            OfferField::Subtitle => &mut self.subtitle,
            OfferField::Price => &mut self.price,
            OfferField::Discount => &mut self.discount,
            _ => return None,
        })
    }

    /// Clears template text the current template does not use.
    #[must_use]
    pub fn without_stale_fields(&self) -> Self {
        let mut next = self.clone();
        for field in OfferField::TEMPLATE_TEXT {
            if !registry::is_relevant(self.template_type, field)
                && let Some(slot) = next.text_mut(field)
            {
                slot.clear();
            }
        }
        next
    }
}

/// Returns `value` unless it is empty, in which case `fallback`.
pub(crate) fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_defaults() {
        let offer = OfferData::default();
        assert_eq!(offer.template_type, TemplateType::Unset);
        assert_eq!(offer.width, 400);
        assert_eq!(offer.height, 420);
        assert!(!offer.use_full_width);
        assert_eq!(offer.drop_shadow, DropShadow::Medium);
        assert!(offer.title.is_empty());
        assert!(offer.start_date.is_none());
    }

    #[test]
    fn test_with_merges_single_field() {
        let before = OfferData::default().with(OfferEdit::Text(OfferField::Title, "Spring".into()));
        let after = before.with(OfferEdit::Text(OfferField::Badge, "New".into()));

        // previous value is untouched
        assert!(before.badge.is_empty());
        assert_eq!(after.badge, "New");
        assert_eq!(after.title, "Spring");
    }

    #[test]
    fn test_with_ignores_text_edit_on_non_text_field() {
        let offer = OfferData::default();
        let next = offer.with(OfferEdit::Text(OfferField::Width, "999".into()));
        assert_eq!(next, offer);
    }

    #[test]
    fn test_drop_shadow_parse_lossy() {
        assert_eq!(DropShadow::parse_lossy("light"), DropShadow::Light);
        assert_eq!(DropShadow::parse_lossy(" Dark "), DropShadow::Dark);
        assert_eq!(DropShadow::parse_lossy("medium"), DropShadow::Medium);
        assert_eq!(DropShadow::parse_lossy("neon"), DropShadow::Medium);
        assert_eq!(DropShadow::parse_lossy(""), DropShadow::Medium);
    }

    #[test]
    fn test_template_ids() {
        for t in TemplateType::ALL {
            assert_eq!(TemplateType::from_id(t.id()), Some(t));
        }
        assert_eq!(TemplateType::from_id(""), Some(TemplateType::Unset));
        assert_eq!(TemplateType::from_id("deluxe"), None);
    }

    #[test]
    fn test_stale_fields_kept_until_cleared() {
        let offer = OfferData::default()
            .with(OfferEdit::Template(TemplateType::Promotional))
            .with(OfferEdit::Text(OfferField::Price, "$99".into()))
            .with(OfferEdit::Text(OfferField::OfferTitle, "Sale".into()))
            .with(OfferEdit::Template(TemplateType::Basic));
        assert_eq!(offer.price, "$99");

        let cleared = offer.without_stale_fields();
        assert!(cleared.price.is_empty());
        // offer title is shared by every template
        assert_eq!(cleared.offer_title, "Sale");
    }

    #[test]
    fn test_serializes_template_ids() {
        let offer = OfferData::default().with(OfferEdit::Template(TemplateType::Premium));
        let json = serde_json::to_value(&offer).unwrap();
        assert_eq!(json["template_type"], "premium");
        assert_eq!(json["drop_shadow"], "medium");

        let unset = serde_json::to_value(OfferData::default()).unwrap();
        assert_eq!(unset["template_type"], "");
    }

    #[test]
    fn test_deserialize_unknown_shadow_as_medium() {
        let mut json = serde_json::to_value(OfferData::default()).unwrap();
        json["drop_shadow"] = "neon".into();
        json["template_type"] = "promotional".into();
        let offer: OfferData = serde_json::from_value(json).unwrap();
        assert_eq!(offer.drop_shadow, DropShadow::Medium);
        assert_eq!(offer.template_type, TemplateType::Promotional);
    }

    #[test]
    fn test_or_fallback() {
        assert_eq!(or_fallback("", "Get Started"), "Get Started");
        assert_eq!(or_fallback("Buy", "Get Started"), "Buy");
    }
}
