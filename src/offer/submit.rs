use super::OfferData;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SubmitError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Description is required")]
    MissingDescription,

    #[error("Choose an offer template before submitting")]
    NoTemplate,

    #[error("Could not serialize offer: {0}")]
    Serialize(String),
}

/// Checks the required fields. Submission is blocked on the first failure.
pub(crate) fn validate(offer: &OfferData) -> Result<(), SubmitError> {
    if offer.title.trim().is_empty() {
        return Err(SubmitError::MissingTitle);
    }
    if offer.description.trim().is_empty() {
        return Err(SubmitError::MissingDescription);
    }
    if !offer.template_type.is_set() {
        return Err(SubmitError::NoTemplate);
    }
    Ok(())
}

/// Validates and writes the offer to the diagnostic log. Returns the logged JSON.
pub(crate) fn submit(offer: &OfferData) -> Result<String, SubmitError> {
    validate(offer)?;
    let json =
        serde_json::to_string_pretty(offer).map_err(|e| SubmitError::Serialize(e.to_string()))?;
    tracing::info!(template = %offer.template_type, "Offer submitted:\n{json}");
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{OfferEdit, OfferField, TemplateType};

    fn filled() -> OfferData {
        OfferData::default()
            .with(OfferEdit::Text(OfferField::Title, "Summer sale".into()))
            .with(OfferEdit::Text(OfferField::Description, "Everything must go".into()))
            .with(OfferEdit::Template(TemplateType::Basic))
    }

    #[test]
    fn test_validate_required_fields() {
        assert_eq!(validate(&filled()), Ok(()));

        let no_title = filled().with(OfferEdit::Text(OfferField::Title, "   ".into()));
        assert_eq!(validate(&no_title), Err(SubmitError::MissingTitle));

        let no_desc = filled().with(OfferEdit::Text(OfferField::Description, String::new()));
        assert_eq!(validate(&no_desc), Err(SubmitError::MissingDescription));

        let no_template = filled().with(OfferEdit::Template(TemplateType::Unset));
        assert_eq!(validate(&no_template), Err(SubmitError::NoTemplate));
    }

    #[test]
    fn test_submit_returns_logged_json() {
        let json = submit(&filled()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Summer sale");
        assert_eq!(value["template_type"], "basic");
        assert_eq!(value["width"], 400);
    }

    #[test]
    fn test_submit_error_messages() {
        assert_eq!(SubmitError::MissingTitle.to_string(), "Title is required");
        assert!(submit(&OfferData::default()).is_err());
    }
}
