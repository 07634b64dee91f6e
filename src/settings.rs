use crate::offer::OfferData;

/// What happens to template-specific text when the template changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum TemplateSwitchPolicy {
    /// Values stay in the record but are hidden and ignored by the preview.
    #[default]
    KeepHidden,
    /// Values the new template does not use are cleared.
    ClearStale,
}

impl TemplateSwitchPolicy {
    pub const fn display_name(&self) -> &'static str {
        match self {
            TemplateSwitchPolicy::KeepHidden => "Keep hidden values",
            TemplateSwitchPolicy::ClearStale => "Clear unused values",
        }
    }

    pub fn apply(&self, offer: OfferData) -> OfferData {
        match self {
            TemplateSwitchPolicy::KeepHidden => offer,
            TemplateSwitchPolicy::ClearStale => offer.without_stale_fields(),
        }
    }
}

pub(crate) struct StudioSettings {
    pub(crate) syntax_highlighting: bool,
    pub(crate) template_switch: TemplateSwitchPolicy,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            syntax_highlighting: true,
            template_switch: TemplateSwitchPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{OfferEdit, OfferField, TemplateType};

    fn switched() -> OfferData {
        OfferData::default()
            .with(OfferEdit::Template(TemplateType::Premium))
            .with(OfferEdit::Text(OfferField::Badge, "New".into()))
            .with(OfferEdit::Template(TemplateType::Basic))
    }

    #[test]
    fn test_keep_hidden_is_default() {
        let settings = StudioSettings::default();
        assert_eq!(settings.template_switch, TemplateSwitchPolicy::KeepHidden);
        assert!(settings.syntax_highlighting);
        assert_eq!(settings.template_switch.apply(switched()).badge, "New");
    }

    #[test]
    fn test_clear_stale() {
        let offer = TemplateSwitchPolicy::ClearStale.apply(switched());
        assert!(offer.badge.is_empty());
        assert_eq!(offer.template_type, TemplateType::Basic);
    }
}
