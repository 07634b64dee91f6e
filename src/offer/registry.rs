//! Which fields each template uses, and the template catalog built from that.

use super::{OfferField, TemplateType};

/// Always shown, regardless of template.
pub(crate) const METADATA_FIELDS: &[OfferField] = &[OfferField::Title, OfferField::Description];

const BASIC_FIELDS: &[OfferField] = &[OfferField::OfferTitle, OfferField::CtaButton];

const PREMIUM_FIELDS: &[OfferField] = &[
    OfferField::OfferTitle,
    OfferField::CtaButton,
    OfferField::BackgroundImage,
    OfferField::Badge,
];

const PROMOTIONAL_FIELDS: &[OfferField] = &[
    OfferField::OfferTitle,
    OfferField::CtaButton,
    OfferField::Subtitle,
    OfferField::Price,
    OfferField::Discount,
];

const LAYOUT_FIELDS: &[OfferField] = &[
    OfferField::StartDate,
    OfferField::EndDate,
    OfferField::Width,
    OfferField::Height,
    OfferField::UseFullWidth,
    OfferField::DropShadow,
];

/// Ordered content fields for a template. Empty when no template is chosen.
pub(crate) fn content_fields(template: TemplateType) -> &'static [OfferField] {
    match template {
        TemplateType::Unset => &[],
        TemplateType::Basic => BASIC_FIELDS,
        TemplateType::Premium => PREMIUM_FIELDS,
        TemplateType::Promotional => PROMOTIONAL_FIELDS,
    }
}

/// Schedule and layout fields, available once any template is chosen.
pub(crate) fn layout_fields(template: TemplateType) -> &'static [OfferField] {
    if template.is_set() { LAYOUT_FIELDS } else { &[] }
}

pub(crate) fn is_relevant(template: TemplateType, field: OfferField) -> bool {
    METADATA_FIELDS.contains(&field)
        || content_fields(template).contains(&field)
        || layout_fields(template).contains(&field)
}

/// Fallback text the preview shows for an empty call-to-action.
pub(crate) const fn button_fallback(template: TemplateType) -> &'static str {
    match template {
        TemplateType::Premium => "Learn More",
        TemplateType::Promotional => "Claim Offer",
        TemplateType::Basic | TemplateType::Unset => "Get Started",
    }
}

/// Hint shown in an empty input.
pub(crate) fn placeholder(template: TemplateType, field: OfferField) -> &'static str {
    match field {
        OfferField::Title => "Enter offer title",
        OfferField::Description => "Enter offer description",
        OfferField::OfferTitle => "Headline shown on the offer",
        OfferField::CtaButton => button_fallback(template),
        OfferField::BackgroundImage => {
            "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b"
        }
        OfferField::Badge => "New",
        OfferField::Subtitle => "Limited Time Only",
        OfferField::Price => "$99",
        OfferField::Discount => "50% OFF",
        _ => "",
    }
}

/// One entry of the template catalog.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TemplateOption {
    pub(crate) template: TemplateType,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) preview: &'static str,
}

impl TemplateOption {
    pub fn id(&self) -> &'static str {
        self.template.id()
    }

    /// Field labels shown as chips, derived from the same table the form uses.
    pub fn fields(&self) -> Vec<&'static str> {
        METADATA_FIELDS
            .iter()
            .chain(content_fields(self.template))
            .map(OfferField::label)
            .collect()
    }
}

static CATALOG: [TemplateOption; 3] = [
    TemplateOption {
        template: TemplateType::Basic,
        name: "Basic Offer",
        description: "Simple offer with title, description, and CTA button",
        preview: "https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=400&h=200&fit=crop",
    },
    TemplateOption {
        template: TemplateType::Premium,
        name: "Premium Offer",
        description: "Enhanced offer with background image and badge",
        preview: "https://images.unsplash.com/photo-1486312338219-ce68d2c6f44d?w=400&h=200&fit=crop",
    },
    TemplateOption {
        template: TemplateType::Promotional,
        name: "Promotional Offer",
        description: "Special promotional offer with pricing and discount",
        preview: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?w=400&h=200&fit=crop",
    },
];

pub(crate) fn catalog() -> &'static [TemplateOption] {
    &CATALOG
}

pub(crate) fn find(id: &str) -> Option<&'static TemplateOption> {
    CATALOG.iter().find(|t| t.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_fields_per_template() {
        assert!(content_fields(TemplateType::Unset).is_empty());
        assert_eq!(
            content_fields(TemplateType::Basic),
            &[OfferField::OfferTitle, OfferField::CtaButton]
        );
        assert_eq!(
            content_fields(TemplateType::Premium),
            &[
                OfferField::OfferTitle,
                OfferField::CtaButton,
                OfferField::BackgroundImage,
                OfferField::Badge,
            ]
        );
        assert_eq!(
            content_fields(TemplateType::Promotional),
            &[
                OfferField::OfferTitle,
                OfferField::CtaButton,
                OfferField::Subtitle,
                OfferField::Price,
                OfferField::Discount,
            ]
        );
    }

    #[test]
    fn test_layout_fields_need_a_template() {
        assert!(layout_fields(TemplateType::Unset).is_empty());
        for t in TemplateType::ALL {
            assert!(layout_fields(t).contains(&OfferField::DropShadow));
            assert!(layout_fields(t).contains(&OfferField::Width));
        }
    }

    #[test]
    fn test_is_relevant() {
        assert!(is_relevant(TemplateType::Unset, OfferField::Title));
        assert!(!is_relevant(TemplateType::Unset, OfferField::Width));
        assert!(is_relevant(TemplateType::Premium, OfferField::Badge));
        assert!(!is_relevant(TemplateType::Basic, OfferField::Badge));
        assert!(!is_relevant(TemplateType::Premium, OfferField::Price));
    }

    #[test]
    fn test_catalog_labels_follow_registry() {
        let premium = find("premium").unwrap();
        assert_eq!(
            premium.fields(),
            vec![
                "Title",
                "Description",
                "Offer Title",
                "CTA Button",
                "Background Image",
                "Badge"
            ]
        );
        for option in catalog() {
            assert_eq!(
                option.fields().len(),
                METADATA_FIELDS.len() + content_fields(option.template).len()
            );
        }
    }

    #[test]
    fn test_catalog_ids_unique() {
        let ids: Vec<_> = catalog().iter().map(TemplateOption::id).collect();
        assert_eq!(ids, vec!["basic", "premium", "promotional"]);
        assert!(find("").is_none());
    }

    #[test]
    fn test_cta_placeholder_matches_fallback() {
        for t in TemplateType::ALL {
            assert_eq!(placeholder(t, OfferField::CtaButton), button_fallback(t));
        }
    }
}
