//! Inline-style HTML for an offer view, for copy-out and export.

use super::{Align, BADGE_INSET, Background, Block, CORNER_RADIUS, Chip, OfferView, PADDING};
use std::fmt::Write;

const FONT_STACK: &str = "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";

/// Escape text for an HTML text node or a double-quoted attribute.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a single-quoted CSS string such as `url('...')`.
fn escape_css_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(['\n', '\r'], "")
}

fn background_css(bg: &Background) -> String {
    match bg {
        Background::Solid { fill, border } => {
            format!("background: {}; border: 1px solid {};", fill.css(), border.css())
        }
        Background::Gradient { angle, from, to } => format!(
            "background: linear-gradient({angle}deg, {} 0%, {} 100%);",
            from.css(),
            to.css()
        ),
        Background::Image { url, overlay } => {
            let overlay = overlay.css();
            format!(
                "background-image: linear-gradient({overlay}, {overlay}), url('{}'); \
                 background-size: cover; background-position: center;",
                escape_css_string(url)
            )
        }
    }
}

fn chip_style(chip: &Chip, font_size: f32) -> String {
    format!(
        "display: inline-block; padding: 2px 10px; border-radius: 9999px; \
         font-size: {font_size}px; font-weight: 700; background: {}; color: {};",
        chip.fill.css(),
        chip.color.css()
    )
}

fn block_html(block: &Block, view: &OfferView) -> String {
    let m = block.metrics();
    let weight = if m.bold { 700 } else { 400 };
    let text_style = |color: String| {
        format!(
            "margin: 0 0 {}px; font-size: {}px; font-weight: {weight}; color: {color};",
            m.gap_after, m.font_size
        )
    };
    match block {
        Block::Chip(chip) => format!(
            "<div style=\"margin: 0 0 {}px;\"><span style=\"{}\">{}</span></div>",
            m.gap_after,
            escape_html(&chip_style(chip, m.font_size)),
            escape_html(&chip.text)
        ),
        Block::Title(t) => format!(
            "<h2 style=\"{} line-height: 1.3;\">{}</h2>",
            text_style(view.text_color.css()),
            escape_html(t)
        ),
        Block::Subtitle(t) | Block::Description(t) => format!(
            "<p style=\"{}\">{}</p>",
            text_style(view.muted_color.css()),
            escape_html(t)
        ),
        Block::Price(p) => format!(
            "<div style=\"{}\">{}</div>",
            text_style(view.text_color.css()),
            escape_html(p)
        ),
        Block::Button { label, fill, color } => format!(
            "<button type=\"button\" style=\"display: block; width: 100%; padding: 10px 16px; \
             border: none; border-radius: 6px; font-size: {}px; font-weight: 500; \
             cursor: pointer; background: {}; color: {};\">{}</button>",
            m.font_size,
            fill.css(),
            color.css(),
            escape_html(label)
        ),
    }
}

/// Render a view as a self-contained inline-style HTML fragment.
pub(crate) fn to_html(view: &OfferView) -> String {
    let layout = &view.layout;
    let text_align = match view.align {
        Align::Start => "left",
        Align::Center => "center",
    };
    let container = format!(
        "position: relative; box-sizing: border-box; width: {}; height: {}; \
         box-shadow: {}; border-radius: {CORNER_RADIUS}px; overflow: hidden; \
         padding: {PADDING}px; font-family: {FONT_STACK}; color: {}; text-align: {text_align}; {}",
        layout.width_css(),
        layout.height_css(),
        layout.box_shadow_css(),
        view.text_color.css(),
        background_css(&view.background)
    );

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<div class=\"offer offer-{}\" style=\"{}\">",
        view.template,
        escape_html(&container)
    );
    if let Some(badge) = &view.badge {
        let style = format!(
            "position: absolute; top: {BADGE_INSET}px; right: {BADGE_INSET}px; {}",
            chip_style(badge, 12.0)
        );
        let _ = writeln!(
            out,
            "  <span style=\"{}\">{}</span>",
            escape_html(&style),
            escape_html(&badge.text)
        );
    }
    for block in &view.blocks {
        let _ = writeln!(out, "  {}", block_html(block, view));
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::{OfferData, OfferEdit, OfferField, TemplateType};
    use crate::preview::{Rendered, render};
    use pretty_assertions::assert_eq;

    fn markup(offer: &OfferData) -> String {
        match render(offer) {
            Rendered::Offer { markup, .. } => markup,
            Rendered::Placeholder => panic!("expected an offer"),
        }
    }

    fn premium() -> OfferData {
        OfferData::default()
            .with(OfferEdit::Template(TemplateType::Premium))
            .with(OfferEdit::Text(
                OfferField::BackgroundImage,
                "https://x/img.png".into(),
            ))
            .with(OfferEdit::Text(OfferField::Badge, "New".into()))
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_css_string() {
        assert_eq!(escape_css_string("a'b\\c\nd"), "a\\'b\\\\cd");
    }

    #[test]
    fn test_basic_markup() {
        let offer = OfferData::default()
            .with(OfferEdit::Template(TemplateType::Basic))
            .with(OfferEdit::Text(OfferField::Description, "Half price".into()));
        let html = markup(&offer);

        assert!(html.starts_with("<div class=\"offer offer-basic\""));
        assert!(html.contains("width: 400px; height: 420px;"));
        assert!(html.contains("box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);"));
        assert!(html.contains(">Your Offer Title</h2>"));
        assert!(html.contains(">Half price</p>"));
        assert!(html.contains(">Get Started</button>"));
        assert!(html.ends_with("</div>\n"));
    }

    #[test]
    fn test_premium_markup_overlay_and_badge() {
        let html = markup(&premium());
        assert!(html.contains(
            "background-image: linear-gradient(rgba(0,0,0,0.4), rgba(0,0,0,0.4)), \
             url(&#39;https://x/img.png&#39;);"
        ));
        let badge = html.lines().nth(1).unwrap();
        assert!(badge.contains("position: absolute; top: 16px; right: 16px;"));
        assert!(badge.ends_with(">New</span>"));
    }

    #[test]
    fn test_promotional_markup_order() {
        let offer = OfferData::default()
            .with(OfferEdit::Template(TemplateType::Promotional))
            .with(OfferEdit::Text(OfferField::Discount, "50% OFF".into()))
            .with(OfferEdit::Text(OfferField::Price, "$99".into()));
        let html = markup(&offer);

        let chip = html.find(">50% OFF<").unwrap();
        let title = html.find(">Special Promotion</h2>").unwrap();
        let price = html.find(">$99</div>").unwrap();
        let button = html.find(">Claim Offer</button>").unwrap();
        assert!(chip < title && title < price && price < button);
        assert!(html.contains("text-align: center;"));
        assert!(html.contains("linear-gradient(90deg, #fb923c 0%, #ef4444 100%)"));
    }

    #[test]
    fn test_full_width_markup() {
        let offer = premium()
            .with(OfferEdit::Width(123))
            .with(OfferEdit::UseFullWidth(true));
        let html = markup(&offer);
        assert!(html.contains("width: 100%;"));
        assert!(!html.contains("123px"));
    }

    #[test]
    fn test_markup_round_trips_populated_fields() {
        let offer = OfferData::default()
            .with(OfferEdit::Template(TemplateType::Promotional))
            .with(OfferEdit::Text(OfferField::OfferTitle, "Flash Deal".into()))
            .with(OfferEdit::Text(OfferField::Description, "Only this week".into()))
            .with(OfferEdit::Text(OfferField::CtaButton, "Shop now".into()))
            .with(OfferEdit::Text(OfferField::Subtitle, "Limited".into()))
            .with(OfferEdit::Text(OfferField::Price, "$10".into()))
            .with(OfferEdit::Text(OfferField::Discount, "10% OFF".into()))
            .with(OfferEdit::Height(300));
        let html = markup(&offer);
        for value in [
            "Flash Deal",
            "Only this week",
            "Shop now",
            "Limited",
            "$10",
            "10% OFF",
            "300px",
        ] {
            assert!(html.contains(value), "missing {value}");
        }
    }

    #[test]
    fn test_markup_escapes_user_text() {
        let offer = OfferData::default()
            .with(OfferEdit::Template(TemplateType::Basic))
            .with(OfferEdit::Text(OfferField::OfferTitle, "<script>".into()));
        let html = markup(&offer);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_markup_line_per_block() {
        let html = markup(&premium());
        let lines: Vec<_> = html.lines().collect();
        // container, badge, title, description, button, closing tag
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "</div>");
    }
}
