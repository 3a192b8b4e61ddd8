//=========================================================================
// Version Catalog
//=========================================================================
//
// Ordered list of selectable game versions with a selection cursor.
//
// The cursor wraps in both directions and is never moved on an empty
// catalog, so it always indexes a valid entry when one exists.
//
//=========================================================================

//=== VersionEntry ========================================================

/// One selectable version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    /// Name shown in the version carousel.
    pub name: String,

    /// Identifier of the resource version the pack files belong to.
    pub resource_version: String,

    /// Numeric resource-pack format of this version.
    pub pack_format: u32,
}

impl VersionEntry {
    pub fn new(name: impl Into<String>, resource_version: impl Into<String>, pack_format: u32) -> Self {
        Self {
            name: name.into(),
            resource_version: resource_version.into(),
            pack_format,
        }
    }
}

//=== VersionCatalog ======================================================

#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    entries: Vec<VersionEntry>,
    selected: usize,
}

impl VersionCatalog {
    pub fn new(entries: Vec<VersionEntry>) -> Self {
        Self {
            entries,
            selected: 0,
        }
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    //--- Selection --------------------------------------------------------

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The selected entry, or `None` for an empty catalog.
    pub fn selected(&self) -> Option<&VersionEntry> {
        self.entries.get(self.selected)
    }

    /// Moves the cursor to `index`. Returns false if it is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Advances the cursor, wrapping to the first entry after the last.
    pub fn select_next(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    /// Moves the cursor back, wrapping to the last entry before the first.
    pub fn select_previous(&mut self) {
        let count = self.entries.len();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(n: usize) -> VersionCatalog {
        VersionCatalog::new(
            (0..n)
                .map(|i| VersionEntry::new(format!("1.{}", 16 + i), format!("1.{}", 16 + i), 6 + i as u32))
                .collect(),
        )
    }

    #[test]
    fn next_wraps_back_to_start_after_len_steps() {
        for n in 1..6 {
            let mut catalog = catalog(n);
            catalog.select(n / 2);
            let start = catalog.selected_index();

            for _ in 0..n {
                catalog.select_next();
                assert!(catalog.selected_index() < n);
            }
            assert_eq!(catalog.selected_index(), start);
        }
    }

    #[test]
    fn previous_wraps_back_to_start_after_len_steps() {
        for n in 1..6 {
            let mut catalog = catalog(n);
            let start = catalog.selected_index();

            for _ in 0..n {
                catalog.select_previous();
                assert!(catalog.selected_index() < n);
            }
            assert_eq!(catalog.selected_index(), start);
        }
    }

    #[test]
    fn previous_from_first_selects_last() {
        let mut catalog = catalog(3);
        catalog.select_previous();
        assert_eq!(catalog.selected_index(), 2);
        assert_eq!(catalog.selected().unwrap().name, "1.18");
    }

    #[test]
    fn empty_catalog_never_moves() {
        let mut catalog = VersionCatalog::default();
        catalog.select_next();
        catalog.select_previous();

        assert_eq!(catalog.selected_index(), 0);
        assert!(catalog.selected().is_none());
        assert!(!catalog.select(0));
    }
}
