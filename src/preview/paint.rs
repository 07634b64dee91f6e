//! Live egui rendering of an offer view.

use super::{Align, BADGE_INSET, Background, Block, CORNER_RADIUS, Chip, OfferView, PADDING, Rgba};
use crate::image_picker::ImageSources;
use egui::{Color32, Rect, RichText, Sense, Stroke, StrokeKind, UiBuilder, pos2, vec2};

const BUTTON_HEIGHT: f32 = 36.0;

fn midpoint(a: Rgba, b: Rgba) -> Color32 {
    let mix = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
    Rgba(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2), mix(a.3, b.3)).color32()
}

/// Paints a linear gradient using CSS angle conventions (90 or 135 degrees).
fn paint_gradient(painter: &egui::Painter, rect: Rect, angle: u16, from: Rgba, to: Rgba) {
    let (start, end) = (from.color32(), to.color32());
    let (top_left, top_right, bottom_left, bottom_right) = match angle {
        90 => (start, end, start, end),
        180 => (start, start, end, end),
        _ => {
            let mid = midpoint(from, to);
            (start, mid, mid, end)
        }
    };
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), top_left);
    mesh.colored_vertex(rect.right_top(), top_right);
    mesh.colored_vertex(rect.left_bottom(), bottom_left);
    mesh.colored_vertex(rect.right_bottom(), bottom_right);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(1, 3, 2);
    painter.add(egui::Shape::mesh(mesh));
}

fn chip(ui: &mut egui::Ui, chip: &Chip, font_size: f32) {
    egui::Frame::new()
        .fill(chip.fill.color32())
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(10, 2))
        .show(ui, |ui| {
            ui.label(
                RichText::new(&chip.text)
                    .size(font_size)
                    .strong()
                    .color(chip.color.color32()),
            );
        });
}

fn text(ui: &mut egui::Ui, s: &str, block: &Block, color: Color32) {
    let m = block.metrics();
    let mut rich = RichText::new(s).size(m.font_size).color(color);
    if m.bold {
        rich = rich.strong();
    }
    ui.add(egui::Label::new(rich).wrap());
}

fn block(ui: &mut egui::Ui, view: &OfferView, block: &Block) {
    match block {
        Block::Chip(c) => chip(ui, c, block.metrics().font_size),
        Block::Title(t) | Block::Price(t) => text(ui, t, block, view.text_color.color32()),
        Block::Subtitle(t) | Block::Description(t) => {
            text(ui, t, block, view.muted_color.color32())
        }
        Block::Button { label, fill, color } => {
            let button = egui::Button::new(
                RichText::new(label)
                    .size(block.metrics().font_size)
                    .color(color.color32()),
            )
            .fill(fill.color32())
            .corner_radius(6);
            ui.add_sized(vec2(ui.available_width(), BUTTON_HEIGHT), button);
        }
    }
    ui.add_space(block.metrics().gap_after);
}

/// Draws the offer box at its configured size. Full width fills the panel.
pub(crate) fn show(ui: &mut egui::Ui, view: &OfferView, images: &mut ImageSources) {
    let width = match view.layout.width {
        super::BoxWidth::Full => ui.available_width(),
        super::BoxWidth::Px(px) => px as f32,
    };
    let height = view.layout.height as f32;
    let (rect, _) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }

    let spec = super::shadow_spec(view.layout.shadow);
    let shadow = egui::Shadow {
        offset: [0, spec.offset_y],
        blur: spec.blur,
        spread: 0,
        color: Color32::from_black_alpha(spec.alpha),
    };
    let painter = ui.painter_at(rect.expand(spec.blur as f32 + spec.offset_y.unsigned_abs() as f32));
    painter.add(shadow.as_shape(rect, CORNER_RADIUS));

    let painter = ui.painter_at(rect);
    match &view.background {
        Background::Solid { fill, border } => {
            painter.rect_filled(rect, CORNER_RADIUS, fill.color32());
            painter.rect_stroke(
                rect,
                CORNER_RADIUS,
                Stroke::new(1.0, border.color32()),
                StrokeKind::Inside,
            );
        }
        Background::Gradient { angle, from, to } => {
            paint_gradient(&painter, rect, *angle, *from, *to);
        }
        Background::Image { url, overlay } => {
            egui::Image::new(images.source(url))
                .corner_radius(CORNER_RADIUS)
                .maintain_aspect_ratio(false)
                .paint_at(ui, rect);
            painter.rect_filled(rect, CORNER_RADIUS, overlay.color32());
        }
    }

    let layout = match view.align {
        Align::Start => egui::Layout::top_down(egui::Align::Min),
        Align::Center => egui::Layout::top_down(egui::Align::Center),
    };
    let mut content = ui.new_child(
        UiBuilder::new()
            .max_rect(rect.shrink(PADDING))
            .layout(layout),
    );
    content.set_clip_rect(rect);
    for b in &view.blocks {
        block(&mut content, view, b);
    }

    if let Some(badge) = &view.badge {
        let corner = Rect::from_min_max(
            pos2(rect.min.x, rect.min.y + BADGE_INSET),
            pos2(rect.max.x - BADGE_INSET, rect.max.y),
        );
        let mut pinned = ui.new_child(
            UiBuilder::new()
                .max_rect(corner)
                .layout(egui::Layout::right_to_left(egui::Align::Min)),
        );
        chip(&mut pinned, badge, 12.0);
    }
}

/// Shown when no template has been chosen.
pub(crate) fn placeholder(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.weak(super::PLACEHOLDER);
        ui.add_space(48.0);
    });
}
