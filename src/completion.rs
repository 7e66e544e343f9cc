//! Section completion check
//!
//! Used only for display gating. Pricing never looks at completion and runs
//! over whatever is stored.

use crate::catalog::Section;
use crate::selection::Selections;

fn has_scalar(selections: &Selections, target_id: &str) -> bool {
    selections.single(target_id).is_some_and(|v| !v.is_empty())
}

/// Whether `section` holds a usable selection.
///
/// - multi-select and quantity sections always count as complete
/// - flat sections need a non-empty scalar
/// - sectioned sections need a non-empty scalar in every single-select
///   subsection; multi-select subsections are always satisfied
pub fn is_section_completed(section: &Section, selections: &Selections) -> bool {
    if section.multi_select || section.is_quantity() {
        return true;
    }
    if section.has_subsections() {
        return section
            .subsections()
            .iter()
            .filter(|sub| !sub.multi_select)
            .all(|sub| has_scalar(selections, &sub.id));
    }
    has_scalar(selections, &section.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ids, Catalog};

    fn section(id: &str) -> &'static Section {
        Catalog::builtin().section(id).unwrap()
    }

    #[test]
    fn test_multi_and_quantity_always_complete() {
        let empty = Selections::new();
        assert!(is_section_completed(section(ids::PREMIUM), &empty));
        assert!(is_section_completed(section(ids::QUANTITY), &empty));
    }

    #[test]
    fn test_flat_section_needs_non_empty_value() {
        let mut s = Selections::new();
        assert!(!is_section_completed(section(ids::SIZE), &s));
        s.set_single(ids::SIZE, "");
        assert!(!is_section_completed(section(ids::SIZE), &s));
        s.set_single(ids::SIZE, "m");
        assert!(is_section_completed(section(ids::SIZE), &s));
    }

    #[test]
    fn test_flat_section_with_set_value_is_incomplete() {
        let mut s = Selections::new();
        s.toggle(ids::SIZE, "m");
        assert!(!is_section_completed(section(ids::SIZE), &s));
    }

    #[test]
    fn test_sectioned_needs_every_single_select_subsection() {
        let mut s = Selections::new();
        s.set_single("closure", "zip-standard");
        s.set_single("print-type", "simple");
        s.set_single("visuals", "1v");
        assert!(!is_section_completed(section(ids::EXTRAS), &s));

        // technical-extras is multi-select and never required
        s.set_single(ids::PLATES, "reprint");
        assert!(is_section_completed(section(ids::EXTRAS), &s));
    }

    #[test]
    fn test_defaults_complete_every_section() {
        let catalog = Catalog::builtin();
        let s = Selections::defaults_for(catalog);
        assert!(catalog.sections().iter().all(|sec| is_section_completed(sec, &s)));
    }
}
