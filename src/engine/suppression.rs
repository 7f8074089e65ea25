//! Header/footer eligibility.

use crate::model::{Band, PageDescriptor};
use crate::theme::Theme;

use super::numbering::VirtualPageNumber;
use super::PlacementOptions;

/// Which bands a page may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub header: bool,
    pub footer: bool,
}

impl Eligibility {
    /// Eligibility for one band.
    pub fn allows(&self, band: Band) -> bool {
        match band {
            Band::Header => self.header,
            Band::Footer => self.footer,
        }
    }
}

/// Decide which bands a page may carry.
///
/// Document-level disable flags always win; otherwise the theme's role
/// permission decides, which may depend on whether the page is numbered.
/// Imported pages carry neither band.
pub fn resolve_eligibility(
    page: &PageDescriptor,
    page_number: VirtualPageNumber,
    theme: &Theme,
    options: &PlacementOptions,
) -> Eligibility {
    if page.imported {
        return Eligibility::default();
    }

    let numbered = page_number.is_some();
    let eligible = |band: Band| {
        !options.band_disabled(band) && theme.permits(page.role, band, numbered)
    };

    Eligibility {
        header: eligible(Band::Header),
        footer: eligible(Band::Footer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use crate::theme::RolePermission;

    fn page(role: Role) -> PageDescriptor {
        PageDescriptor {
            physical_index: 2,
            role,
            is_role_first: false,
            imported: false,
        }
    }

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        let options = PlacementOptions::default();

        let title = resolve_eligibility(&page(Role::Title), None, &theme, &options);
        assert_eq!(title, Eligibility::default());

        let body = resolve_eligibility(&page(Role::Body), Some(1), &theme, &options);
        assert!(body.header && body.footer);
    }

    #[test]
    fn test_title_permitted_once_numbered() {
        let theme = Theme::default();
        let options = PlacementOptions::default();

        let title = resolve_eligibility(&page(Role::Title), Some(1), &theme, &options);
        assert!(title.header && title.footer);

        let options = PlacementOptions::new().with_nofooter(true);
        let title = resolve_eligibility(&page(Role::Title), Some(1), &theme, &options);
        assert!(title.header);
        assert!(!title.footer);

        let strict = Theme::default().with_role_permission(Role::Title, RolePermission::none());
        let title = resolve_eligibility(&page(Role::Title), Some(1), &strict, &PlacementOptions::default());
        assert_eq!(title, Eligibility::default());
    }

    #[test]
    fn test_document_flags_override_theme() {
        let theme = Theme::bare().with_role_permission(Role::Body, RolePermission::both());
        let options = PlacementOptions::new().with_nofooter(true);

        let body = resolve_eligibility(&page(Role::Body), Some(1), &theme, &options);
        assert!(body.header);
        assert!(!body.footer);

        let options = PlacementOptions::new().with_noheader(true);
        let body = resolve_eligibility(&page(Role::Body), Some(1), &theme, &options);
        assert!(!body.allows(Band::Header));
        assert!(body.allows(Band::Footer));
    }

    #[test]
    fn test_missing_permission_is_permitted() {
        let theme = Theme::bare();
        let back = resolve_eligibility(&page(Role::Back), Some(1), &theme, &PlacementOptions::default());
        assert!(back.header && back.footer);
    }

    #[test]
    fn test_imported_page_is_ineligible() {
        let mut imported = page(Role::Body);
        imported.imported = true;
        let result = resolve_eligibility(&imported, Some(1), &Theme::bare(), &PlacementOptions::default());
        assert_eq!(result, Eligibility::default());
    }
}
