//! Anchor resolution: where a line of running content is drawn.
//!
//! Coordinates are PDF user space: x from the left page edge, y from the
//! bottom page edge, y being the text baseline.

use crate::model::{Band, PlacementResult, Side};
use crate::theme::{Alignment, BandStyle, TextMeasure, Theme, VerticalAlign};

use super::variant::SelectedContent;

/// Compute the placement of resolved content on a page.
pub fn resolve_anchor(
    page: u32,
    band: Band,
    content: SelectedContent<'_>,
    theme: &Theme,
    measure: &dyn TextMeasure,
) -> PlacementResult {
    let style = theme.band_style(band);
    let font_size = content.template.font_size().unwrap_or(style.font_size);

    let x = horizontal_anchor(
        theme,
        style,
        content.side,
        content.template.alignment(),
        measure.advance(&content.text, font_size),
    );
    let y = vertical_anchor(theme, style, band, font_size, measure);

    PlacementResult {
        page,
        band,
        x,
        y,
        font_size,
        text: content.text,
    }
}

/// Left edge of a line of the given width.
fn horizontal_anchor(
    theme: &Theme,
    style: &BandStyle,
    side: Side,
    alignment: Alignment,
    text_width: f64,
) -> f64 {
    let (margin_left, margin_right) = theme.geometry.margins.horizontal(side);
    let left = margin_left + style.padding.left;
    let right = theme.geometry.width - margin_right - style.padding.right;

    match alignment {
        Alignment::Left => left,
        Alignment::Right => right - text_width,
        Alignment::Center => left + (right - left - text_width) / 2.0,
    }
}

/// Baseline of the line inside the band. Identical for recto and verso.
fn vertical_anchor(
    theme: &Theme,
    style: &BandStyle,
    band: Band,
    font_size: f64,
    measure: &dyn TextMeasure,
) -> f64 {
    let (band_bottom, band_top) = match band {
        Band::Header => (theme.geometry.height - style.height, theme.geometry.height),
        Band::Footer => (0.0, style.height),
    };
    let inner_top = band_top - style.padding.top;
    let inner_bottom = band_bottom + style.padding.bottom;

    let half_leading = (style.line_height - 1.0) * font_size / 2.0;
    let ascent = measure.ascender() * font_size + half_leading;
    let descent = -measure.descender() * font_size + half_leading;

    match style.vertical_align {
        VerticalAlign::Top => inner_top - ascent,
        VerticalAlign::Bottom => inner_bottom + descent,
        VerticalAlign::Middle => {
            let line = ascent + descent;
            inner_bottom + (inner_top - inner_bottom - line) / 2.0 + descent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ContentTemplate, FontMetrics, Margins, PageGeometry};

    fn place(theme: &Theme, band: Band, side: Side, template: &ContentTemplate, text: &str) -> PlacementResult {
        let content = SelectedContent {
            side,
            template,
            text: text.to_string(),
        };
        resolve_anchor(1, band, content, theme, &FontMetrics::builtin())
    }

    #[test]
    fn test_default_footer_anchors() {
        let theme = Theme::default();

        let recto = place(&theme, Band::Footer, Side::Recto, &ContentTemplate::right("{page-number}"), "1");
        assert!((recto.x - 541.009).abs() < 1e-6);
        assert!((recto.y - 14.388).abs() < 1e-6);
        assert_eq!(recto.font_size, 9.0);

        let verso = place(&theme, Band::Footer, Side::Verso, &ContentTemplate::left("{page-number}"), "2");
        assert!((verso.x - 49.24).abs() < 1e-6);
        assert!((verso.y - recto.y).abs() < 1e-12);
    }

    #[test]
    fn test_header_top_aligned() {
        let theme = Theme::default();
        let header = place(&theme, Band::Header, Side::Recto, &ContentTemplate::left("x"), "x");
        // 841.89 - 6 - 9.612
        assert!((header.y - 826.278).abs() < 1e-6);
    }

    #[test]
    fn test_center_and_font_override() {
        let theme = Theme::default();
        let template = ContentTemplate::center("{page-number}").with_font_size(12.0);
        let result = place(&theme, Band::Footer, Side::Recto, &template, "1");

        let width = 559.0 * 12.0 / 1000.0;
        let left = 48.24 + 1.0;
        let right = 595.28 - 48.24 - 1.0;
        assert!((result.x - (left + (right - left - width) / 2.0)).abs() < 1e-9);
        assert_eq!(result.font_size, 12.0);
    }

    #[test]
    fn test_bottom_and_middle_alignment() {
        let mut theme = Theme::default();
        theme.footer.vertical_align = VerticalAlign::Bottom;
        theme.footer.padding.bottom = 4.0;
        let template = ContentTemplate::left("a");
        let bottom = place(&theme, Band::Footer, Side::Recto, &template, "a");
        assert!((bottom.y - (4.0 + 0.292 * 9.0)).abs() < 1e-9);

        theme.footer.vertical_align = VerticalAlign::Middle;
        let middle = place(&theme, Band::Footer, Side::Recto, &template, "a");
        let top = 30.0 - 6.0 - 1.068 * 9.0;
        assert!(middle.y > bottom.y && middle.y < top);
    }

    #[test]
    fn test_mirrored_margins_shift_x() {
        let theme = Theme::default()
            .with_geometry(PageGeometry::a4().with_margins(Margins::mirrored(60.0, 40.0)));
        let template = ContentTemplate::left("x");

        let recto = place(&theme, Band::Footer, Side::Recto, &template, "x");
        let verso = place(&theme, Band::Footer, Side::Verso, &template, "x");
        assert!((recto.x - 61.0).abs() < 1e-9);
        assert!((verso.x - 41.0).abs() < 1e-9);
        assert_eq!(recto.y, verso.y);
    }
}
