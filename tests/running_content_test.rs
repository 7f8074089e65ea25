//! Integration tests for running header and footer placement.

use folio::theme::{RolePermission, TemplateKey, Variant};
use folio::{
    place, Band, BandStyle, ContentTemplate, Layout, NumberingStart, PlacementOptions,
    PlacementResult, Role, Theme,
};

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn footers(placements: &[PlacementResult]) -> Vec<&PlacementResult> {
    placements.iter().filter(|p| p.band == Band::Footer).collect()
}

fn title_header_theme() -> Theme {
    Theme::default().with_band_content(Band::Header, ContentTemplate::right("({document-title})"))
}

#[test]
fn test_footer_numbers_start_at_body_by_default() {
    let layout = Layout::parse("title,body*4").unwrap();
    let placements = place(&layout, &Theme::default(), &PlacementOptions::default());

    let footers = footers(&placements);
    assert_eq!(footers.len(), 4);

    let expected_x = [541.009, 49.24];
    for (idx, footer) in footers.iter().enumerate() {
        assert_eq!(footer.page, idx as u32 + 2);
        assert_eq!(footer.text, (idx + 1).to_string());
        assert_eq!(round3(footer.x), expected_x[idx % 2]);
        assert_eq!(round3(footer.y), 14.388);
        assert_eq!(footer.font_size, 9.0);
    }
}

#[test]
fn test_nofooter_suppresses_all_footers() {
    let layout = Layout::parse("title,body").unwrap();
    let theme = Theme::default().with_role_permission(Role::Title, RolePermission::both());
    let options = PlacementOptions::new().with_nofooter(true);

    let placements = place(&layout, &theme, &options);
    assert!(footers(&placements).is_empty());
}

#[test]
fn test_start_at_title_numbers_every_page() {
    let layout = Layout::parse("title,toc,body*3").unwrap();
    let theme = Theme::default().with_start_at(NumberingStart::Title);

    let placements = place(&layout, &theme, &PlacementOptions::default());
    assert_eq!(placements.len(), 5);
    assert_eq!(placements[0].page, 1);
    assert_eq!(round3(placements[0].x), 49.24);
    for p in &placements {
        assert_eq!(p.text, p.page.to_string());
        assert_eq!(round3(p.y), 14.388);
    }
}

#[test]
fn test_start_at_title_keeps_title_header() {
    let layout = Layout::parse("title,body*2").unwrap();
    let theme = title_header_theme().with_start_at(NumberingStart::Title);
    let options = PlacementOptions::new().with_title("Document Title");

    let placements = place(&layout, &theme, &options);
    let page1: Vec<(Band, &str)> = placements
        .iter()
        .filter(|p| p.page == 1)
        .map(|p| (p.band, p.text.as_str()))
        .collect();
    assert_eq!(
        page1,
        vec![(Band::Header, "(Document Title)"), (Band::Footer, "1")]
    );
}

#[test]
fn test_start_at_toc_numbers_from_toc_page() {
    let layout = Layout::parse("title,toc,body*3").unwrap();
    let theme = Theme::default().with_start_at(NumberingStart::Toc);

    let placements = place(&layout, &theme, &PlacementOptions::default());
    assert!(placements.iter().all(|p| p.page != 1));
    for p in &placements {
        assert_eq!(p.text, (p.page - 1).to_string());
        assert_eq!(round3(p.y), 14.388);
    }
    assert_eq!(placements.len(), 4);
}

#[test]
fn test_start_at_toc_without_toc_falls_back_to_body() {
    let layout = Layout::parse("title,body*3").unwrap();
    let options = PlacementOptions::new().with_start_at(NumberingStart::Toc);

    let with_fallback = place(&layout, &Theme::default(), &options);
    let default_start = place(&layout, &Theme::default(), &PlacementOptions::default());

    assert_eq!(with_fallback, default_start);
    let texts: Vec<&str> = with_fallback.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn test_header_shows_document_title_from_body() {
    let layout = Layout::parse("title,body*2").unwrap();
    let options = PlacementOptions::new().with_title("Document Title");

    let placements = place(&layout, &title_header_theme(), &options);
    let headers: Vec<_> = placements.iter().filter(|p| p.band == Band::Header).collect();

    assert_eq!(headers.len(), 2);
    for (idx, header) in headers.iter().enumerate() {
        assert_eq!(header.text, "(Document Title)");
        assert_eq!(header.page, idx as u32 + 2);
        assert_eq!(header.font_size, 9.0);
    }
    assert_eq!(headers[0].y, headers[1].y);
}

#[test]
fn test_header_band_style_override() {
    let layout = Layout::parse("title,body*2").unwrap();
    let style = BandStyle {
        font_size: 11.0,
        height: 40.0,
        ..BandStyle::default()
    };
    let theme = title_header_theme().with_band_style(Band::Header, style);
    let options = PlacementOptions::new().with_title("Document Title");

    let placements = place(&layout, &theme, &options);
    let header = placements.iter().find(|p| p.band == Band::Header).unwrap();
    let footer = placements.iter().find(|p| p.band == Band::Footer).unwrap();

    assert_eq!(header.font_size, 11.0);
    // 841.89 - 6 - 1.068 * 11
    assert_eq!(round3(header.y), 824.142);
    assert_eq!(footer.font_size, 9.0);
}

#[test]
fn test_noheader_suppresses_header() {
    let layout = Layout::parse("title,body").unwrap();
    let options = PlacementOptions::new()
        .with_title("Document Title")
        .with_noheader(true);

    let placements = place(&layout, &title_header_theme(), &options);
    assert!(placements.iter().all(|p| p.text != "(Document Title)"));
    assert_eq!(placements.len(), 1);
}

#[test]
fn test_missing_title_drops_bare_title_header() {
    let layout = Layout::parse("body*2").unwrap();
    let theme =
        Theme::default().with_band_content(Band::Header, ContentTemplate::center("{document-title}"));

    let placements = place(&layout, &theme, &PlacementOptions::default());
    assert!(placements.iter().all(|p| p.band == Band::Footer));
}

#[test]
fn test_role_specific_templates() {
    let layout = Layout::parse("title,toc,body*2,back*2").unwrap();
    let theme = Theme::default()
        .with_start_at(NumberingStart::Toc)
        .with_template(
            TemplateKey::for_role(Band::Footer, Role::Toc, Variant::Verso),
            ContentTemplate::center("{page-number}"),
        )
        .with_template(
            TemplateKey::for_role(Band::Footer, Role::Back, Variant::First),
            ContentTemplate::center("{page-number} / {page-count}"),
        )
        .with_role_permission(
            Role::Back,
            RolePermission {
                header: false,
                ..RolePermission::both()
            },
        );

    let placements = place(&layout, &theme, &PlacementOptions::default());
    let texts: Vec<(u32, &str)> = placements.iter().map(|p| (p.page, p.text.as_str())).collect();
    assert_eq!(
        texts,
        vec![(2, "1"), (3, "2"), (4, "3"), (5, "4 / 5"), (6, "5")]
    );
}
