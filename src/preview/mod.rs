//! Offer preview.
//!
//! An [`OfferView`] is computed once per render from the offer record. The
//! live egui preview ([`paint`]) and the exported inline-style HTML
//! ([`markup`]) are both formatters over that one view, so every field that
//! shows up in one shows up in the other.

pub(crate) mod markup;
pub(crate) mod paint;

use crate::offer::{DropShadow, OfferData, TemplateType, or_fallback, registry};
use egui::Color32;

pub(crate) const PLACEHOLDER: &str = "Select a template to see preview";

pub(crate) const PADDING: f32 = 24.0;
pub(crate) const CORNER_RADIUS: u8 = 8;
/// Inset of the premium badge from the top-right corner.
pub(crate) const BADGE_INSET: f32 = 16.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 255)
    }

    pub fn css(&self) -> String {
        if self.3 == 255 {
            format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
        } else {
            let alpha = (self.3 as f32 / 255.0 * 100.0).round() / 100.0;
            format!("rgba({},{},{},{})", self.0, self.1, self.2, alpha)
        }
    }

    pub fn color32(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.0, self.1, self.2, self.3)
    }
}

const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const BLACK: Rgba = Rgba::rgb(0, 0, 0);

/// Shadow literal for the export plus the matching egui shadow parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ShadowSpec {
    pub(crate) css: &'static str,
    pub(crate) offset_y: i8,
    pub(crate) blur: u8,
    pub(crate) alpha: u8,
}

const SHADOWS: [(DropShadow, ShadowSpec); 3] = [
    (
        DropShadow::Light,
        ShadowSpec {
            css: "0 1px 3px rgba(0, 0, 0, 0.1)",
            offset_y: 1,
            blur: 3,
            alpha: 26,
        },
    ),
    (
        DropShadow::Medium,
        ShadowSpec {
            css: "0 4px 12px rgba(0, 0, 0, 0.15)",
            offset_y: 4,
            blur: 12,
            alpha: 38,
        },
    ),
    (
        DropShadow::Dark,
        ShadowSpec {
            css: "0 10px 30px rgba(0, 0, 0, 0.3)",
            offset_y: 10,
            blur: 30,
            alpha: 77,
        },
    ),
];

pub(crate) fn shadow_spec(shadow: DropShadow) -> &'static ShadowSpec {
    SHADOWS
        .iter()
        .find(|(key, _)| *key == shadow)
        .map(|(_, spec)| spec)
        .unwrap_or(&SHADOWS[1].1)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BoxWidth {
    Full,
    Px(u32),
}

impl BoxWidth {
    pub fn css(&self) -> String {
        match self {
            BoxWidth::Full => "100%".to_string(),
            BoxWidth::Px(px) => format!("{px}px"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoxLayout {
    pub(crate) width: BoxWidth,
    pub(crate) height: u32,
    pub(crate) shadow: DropShadow,
}

impl BoxLayout {
    pub fn compute(offer: &OfferData) -> Self {
        Self {
            width: if offer.use_full_width {
                BoxWidth::Full
            } else {
                BoxWidth::Px(offer.width)
            },
            height: offer.height,
            shadow: offer.drop_shadow,
        }
    }

    pub fn width_css(&self) -> String {
        self.width.css()
    }

    pub fn height_css(&self) -> String {
        format!("{}px", self.height)
    }

    pub fn box_shadow_css(&self) -> &'static str {
        shadow_spec(self.shadow).css
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Background {
    Solid { fill: Rgba, border: Rgba },
    /// `angle` follows CSS: 90 runs left to right, 135 top-left to bottom-right.
    Gradient { angle: u16, from: Rgba, to: Rgba },
    Image { url: String, overlay: Rgba },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Align {
    Start,
    Center,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Chip {
    pub(crate) text: String,
    pub(crate) fill: Rgba,
    pub(crate) color: Rgba,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Block {
    Chip(Chip),
    Title(String),
    Subtitle(String),
    Description(String),
    Price(String),
    Button { label: String, fill: Rgba, color: Rgba },
}

/// Typography shared by both formatters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Metrics {
    pub(crate) font_size: f32,
    pub(crate) bold: bool,
    pub(crate) gap_after: f32,
}

impl Block {
    pub const fn metrics(&self) -> Metrics {
        match self {
            Block::Chip(_) => Metrics { font_size: 18.0, bold: true, gap_after: 8.0 },
            Block::Title(_) => Metrics { font_size: 24.0, bold: true, gap_after: 12.0 },
            Block::Subtitle(_) => Metrics { font_size: 14.0, bold: false, gap_after: 12.0 },
            Block::Description(_) => Metrics { font_size: 16.0, bold: false, gap_after: 24.0 },
            Block::Price(_) => Metrics { font_size: 30.0, bold: true, gap_after: 16.0 },
            Block::Button { .. } => Metrics { font_size: 14.0, bold: false, gap_after: 0.0 },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct OfferView {
    pub(crate) template: TemplateType,
    pub(crate) layout: BoxLayout,
    pub(crate) background: Background,
    pub(crate) align: Align,
    pub(crate) text_color: Rgba,
    pub(crate) muted_color: Rgba,
    /// Pinned to the top-right corner, outside the block flow.
    pub(crate) badge: Option<Chip>,
    pub(crate) blocks: Vec<Block>,
}

impl OfferView {
    /// `None` when no template is chosen. Only fields the template uses are read.
    pub fn build(offer: &OfferData) -> Option<Self> {
        let layout = BoxLayout::compute(offer);
        let template = offer.template_type;
        let button_label = || {
            or_fallback(&offer.cta_button, registry::button_fallback(template)).to_string()
        };
        let view = match template {
            TemplateType::Unset => return None,
            TemplateType::Basic => OfferView {
                template,
                layout,
                background: Background::Solid {
                    fill: WHITE,
                    border: Rgba::rgb(229, 231, 235),
                },
                align: Align::Start,
                text_color: Rgba::rgb(17, 24, 39),
                muted_color: Rgba::rgb(75, 85, 99),
                badge: None,
                blocks: vec![
                    Block::Title(title(offer, "Your Offer Title")),
                    Block::Description(
                        or_fallback(
                            &offer.description,
                            "Your offer description will appear here...",
                        )
                        .to_string(),
                    ),
                    Block::Button {
                        label: button_label(),
                        fill: Rgba::rgb(15, 23, 42),
                        color: WHITE,
                    },
                ],
            },
            TemplateType::Premium => OfferView {
                template,
                layout,
                background: if offer.background_image.is_empty() {
                    Background::Gradient {
                        angle: 135,
                        from: Rgba::rgb(0x66, 0x7e, 0xea),
                        to: Rgba::rgb(0x76, 0x4b, 0xa2),
                    }
                } else {
                    Background::Image {
                        url: offer.background_image.clone(),
                        overlay: Rgba(0, 0, 0, 102),
                    }
                },
                align: Align::Start,
                text_color: WHITE,
                muted_color: Rgba::rgb(229, 231, 235),
                badge: (!offer.badge.is_empty()).then(|| Chip {
                    text: offer.badge.clone(),
                    fill: Rgba::rgb(239, 68, 68),
                    color: WHITE,
                }),
                blocks: vec![
                    Block::Title(title(offer, "Premium Offer Title")),
                    Block::Description(
                        or_fallback(
                            &offer.description,
                            "Your premium offer description will appear here...",
                        )
                        .to_string(),
                    ),
                    Block::Button {
                        label: button_label(),
                        fill: Rgba::rgb(241, 245, 249),
                        color: Rgba::rgb(15, 23, 42),
                    },
                ],
            },
            TemplateType::Promotional => {
                let mut blocks = Vec::with_capacity(6);
                if !offer.discount.is_empty() {
                    blocks.push(Block::Chip(Chip {
                        text: offer.discount.clone(),
                        fill: Rgba::rgb(250, 204, 21),
                        color: BLACK,
                    }));
                }
                blocks.push(Block::Title(title(offer, "Special Promotion")));
                if !offer.subtitle.is_empty() {
                    blocks.push(Block::Subtitle(offer.subtitle.clone()));
                }
                blocks.push(Block::Description(
                    or_fallback(
                        &offer.description,
                        "Don't miss this amazing promotional offer...",
                    )
                    .to_string(),
                ));
                if !offer.price.is_empty() {
                    blocks.push(Block::Price(offer.price.clone()));
                }
                blocks.push(Block::Button {
                    label: button_label(),
                    fill: WHITE,
                    color: Rgba::rgb(249, 115, 22),
                });
                OfferView {
                    template,
                    layout,
                    background: Background::Gradient {
                        angle: 90,
                        from: Rgba::rgb(251, 146, 60),
                        to: Rgba::rgb(239, 68, 68),
                    },
                    align: Align::Center,
                    text_color: WHITE,
                    muted_color: Rgba::rgb(255, 237, 213),
                    badge: None,
                    blocks,
                }
            }
        };
        Some(view)
    }
}

/// Headline text: the offer title, then the metadata title, then the fallback.
fn title(offer: &OfferData, fallback: &str) -> String {
    let metadata = or_fallback(&offer.title, fallback);
    or_fallback(&offer.offer_title, metadata).to_string()
}

/// Result of one preview render.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Rendered {
    /// No template chosen; nothing to export.
    Placeholder,
    Offer { view: OfferView, markup: String },
}

impl Rendered {
    pub fn markup(&self) -> Option<&str> {
        match self {
            Rendered::Placeholder => None,
            Rendered::Offer { markup, .. } => Some(markup),
        }
    }
}

pub(crate) fn render(offer: &OfferData) -> Rendered {
    match OfferView::build(offer) {
        None => Rendered::Placeholder,
        Some(view) => {
            let markup = markup::to_html(&view);
            Rendered::Offer { view, markup }
        }
    }
}

/// Whether the preview panel shows the rendered offer or its markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum DisplayMode {
    #[default]
    Preview,
    Source,
}

impl DisplayMode {
    pub const fn display_name(&self) -> &'static str {
        match self {
            DisplayMode::Preview => "Preview",
            DisplayMode::Source => "Source",
        }
    }
}
