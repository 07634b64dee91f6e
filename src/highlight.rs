//! Syntax highlighting for generated markup using syntect.

use egui::Color32;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Cached syntax highlighting resources.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: "base16-ocean.dark".to_string(),
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight HTML and return a list of (text, color) spans.
    pub fn highlight_html(&self, code: &str) -> Vec<(String, Color32)> {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("html")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme() else {
            return vec![(code.to_string(), Color32::LIGHT_GRAY)];
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut result = Vec::new();

        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, text) in ranges {
                        result.push((text.to_string(), style_to_color32(style)));
                    }
                }
                Err(_) => {
                    // Fallback to plain text on error
                    result.push((line.to_string(), Color32::LIGHT_GRAY));
                }
            }
        }

        result
    }

    /// Render highlighted markup as a LayoutJob for egui.
    pub fn layout_job(&self, code: &str) -> egui::text::LayoutJob {
        let mut job = egui::text::LayoutJob::default();

        for (text, color) in self.highlight_html(code) {
            job.append(
                &text,
                0.0,
                egui::TextFormat {
                    font_id: egui::FontId::monospace(12.0),
                    color,
                    ..Default::default()
                },
            );
        }

        job
    }
}

/// Convert syntect Style to egui Color32.
fn style_to_color32(style: Style) -> Color32 {
    Color32::from_rgb(style.foreground.r, style.foreground.g, style.foreground.b)
}

/// Read-only markup viewer. Falls back to a plain monospace editor without highlighting.
pub fn code_viewer(ui: &mut egui::Ui, highlighter: Option<&Highlighter>, code: &str) {
    egui::ScrollArea::both()
        .id_salt("markup_source_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| match highlighter {
            Some(h) => {
                let mut job = h.layout_job(code);
                job.wrap.max_width = f32::INFINITY;
                ui.add(egui::Label::new(job).selectable(true));
            }
            None => {
                let mut text = code;
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_rows(18)
                        .desired_width(f32::INFINITY),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlighter_creation() {
        let highlighter = Highlighter::new();
        // Should not panic
        let _ = highlighter.highlight_html("<div></div>");
    }

    #[test]
    fn test_highlight_html_preserves_text() {
        let highlighter = Highlighter::new();
        let code = "<div style=\"color: #fff;\">\n  <h2>Offer</h2>\n</div>\n";
        let spans = highlighter.highlight_html(code);
        assert!(spans.len() > 1);
        let joined: String = spans.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(joined, code);
    }

    #[test]
    fn test_layout_job() {
        let highlighter = Highlighter::new();
        let job = highlighter.layout_job("<span>New</span>");
        assert_eq!(job.text, "<span>New</span>");
    }
}
