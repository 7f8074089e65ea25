//! Page descriptor builder.

use crate::model::{LayoutPage, PageDescriptor};

/// Build one descriptor per layout page, in physical order.
///
/// A page is the first of its role when it is the first page of the
/// document or its role differs from the preceding page's role.
pub fn build_descriptors(pages: &[LayoutPage]) -> Vec<PageDescriptor> {
    let mut previous = None;

    pages
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let is_role_first = previous != Some(page.role);
            previous = Some(page.role);
            PageDescriptor {
                physical_index: idx as u32 + 1,
                role: page.role,
                is_role_first,
                imported: page.imported,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Layout, Role};

    #[test]
    fn test_empty_layout() {
        assert!(build_descriptors(&[]).is_empty());
    }

    #[test]
    fn test_role_first_flags() {
        let layout = Layout::parse("title,toc*2,body*3").unwrap();
        let descriptors = build_descriptors(&layout.pages);

        let indices: Vec<u32> = descriptors.iter().map(|d| d.physical_index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5, 6]);

        let firsts: Vec<bool> = descriptors.iter().map(|d| d.is_role_first).collect();
        assert_eq!(firsts, vec![true, true, false, true, false, false]);
    }

    #[test]
    fn test_imported_flag_carried() {
        let pages = [
            LayoutPage::new(Role::Body),
            LayoutPage::imported(Role::Body),
        ];
        let descriptors = build_descriptors(&pages);
        assert!(!descriptors[0].imported);
        assert!(descriptors[1].imported);
        assert!(!descriptors[1].is_role_first);
    }
}
