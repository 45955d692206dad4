//! The fixed table of shape layouts
//!
//! Each layout is a named presentational arrangement with a hard slot
//! count. The table is configuration compiled into the binary; entry
//! order is significant because the daily selector indexes into it
//! positionally.

use serde::Serialize;

use super::{LayoutError, LayoutResult};

/// A named shape layout and the exact number of articles it displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutDescriptor {
    /// Unique layout name (e.g. "oshaped-hero")
    pub name: String,

    /// Exact number of article slots the layout renders
    pub required_articles: usize,
}

impl LayoutDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, required_articles: usize) -> Self {
        Self {
            name: name.into(),
            required_articles,
        }
    }
}

/// Built-in layout table. Order matters: the selector maps seeded
/// indices onto these positions, so reordering changes which layout a
/// given day picks. The retired `list` layout (5 slots) is not in
/// rotation.
const BUILTIN_LAYOUTS: &[(&str, usize)] = &[
    ("cshaped-hero", 12),
    ("featured-grid", 7),
    ("grid", 6),
    ("hero-grid", 6),
    ("hshaped-hero", 17),
    ("lshaped-hero", 12),
    ("masonry", 6),
    ("oshaped-hero", 18),
    ("tshaped-hero", 13),
    ("ushaped-hero", 15),
];

/// Ordered, immutable registry of shape layouts
///
/// Constructed once at startup and shared read-only. Construction
/// enforces the invariants the selector depends on: at least two
/// entries (so a distinct pair always exists), unique names, and
/// non-zero slot counts.
#[derive(Debug, Clone)]
pub struct LayoutRegistry {
    layouts: Vec<LayoutDescriptor>,
}

impl LayoutRegistry {
    /// Build a registry from an ordered list of descriptors
    ///
    /// # Errors
    ///
    /// Returns `LayoutError` if fewer than two layouts are given, a
    /// name repeats, or a layout declares zero slots.
    pub fn new(layouts: Vec<LayoutDescriptor>) -> LayoutResult<Self> {
        if layouts.len() < 2 {
            return Err(LayoutError::RegistryTooSmall(layouts.len()));
        }

        let mut seen = std::collections::HashSet::new();
        for layout in &layouts {
            if layout.required_articles == 0 {
                return Err(LayoutError::EmptyLayout(layout.name.clone()));
            }
            if !seen.insert(layout.name.as_str()) {
                return Err(LayoutError::DuplicateName(layout.name.clone()));
            }
        }

        Ok(Self { layouts })
    }

    /// The production layout table
    pub fn builtin() -> Self {
        Self {
            layouts: BUILTIN_LAYOUTS
                .iter()
                .map(|(name, slots)| LayoutDescriptor::new(*name, *slots))
                .collect(),
        }
    }

    /// Number of layouts in rotation
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    /// Always false: construction requires at least two entries
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Positional access, in registry order
    pub fn get(&self, index: usize) -> Option<&LayoutDescriptor> {
        self.layouts.get(index)
    }

    /// Look up a layout by name
    pub fn by_name(&self, name: &str) -> Option<&LayoutDescriptor> {
        self.layouts.iter().find(|l| l.name == name)
    }

    /// All descriptors, in registry order
    pub fn descriptors(&self) -> &[LayoutDescriptor] {
        &self.layouts
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table() {
        let registry = LayoutRegistry::builtin();
        assert_eq!(registry.len(), 10);

        // Positional order is part of the contract
        assert_eq!(registry.get(0).unwrap().name, "cshaped-hero");
        assert_eq!(registry.get(9).unwrap().name, "ushaped-hero");

        assert_eq!(registry.by_name("oshaped-hero").unwrap().required_articles, 18);
        assert_eq!(registry.by_name("grid").unwrap().required_articles, 6);
        assert!(registry.by_name("list").is_none());
    }

    #[test]
    fn test_slot_counts_in_expected_range() {
        for layout in LayoutRegistry::builtin().descriptors() {
            assert!(
                (5..=18).contains(&layout.required_articles),
                "{} has {} slots",
                layout.name,
                layout.required_articles
            );
        }
    }

    #[test]
    fn test_rejects_single_entry() {
        let result = LayoutRegistry::new(vec![LayoutDescriptor::new("solo", 6)]);
        assert_eq!(result.unwrap_err(), LayoutError::RegistryTooSmall(1));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            LayoutRegistry::new(Vec::new()).unwrap_err(),
            LayoutError::RegistryTooSmall(0)
        );
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = LayoutRegistry::new(vec![
            LayoutDescriptor::new("grid", 6),
            LayoutDescriptor::new("grid", 8),
        ]);
        assert_eq!(result.unwrap_err(), LayoutError::DuplicateName("grid".into()));
    }

    #[test]
    fn test_rejects_zero_slots() {
        let result = LayoutRegistry::new(vec![
            LayoutDescriptor::new("grid", 6),
            LayoutDescriptor::new("hollow", 0),
        ]);
        assert_eq!(result.unwrap_err(), LayoutError::EmptyLayout("hollow".into()));
    }

    #[test]
    fn test_custom_registry_preserves_order() {
        let registry = LayoutRegistry::new(vec![
            LayoutDescriptor::new("b", 4),
            LayoutDescriptor::new("a", 3),
        ])
        .unwrap();

        assert_eq!(registry.get(0).unwrap().name, "b");
        assert_eq!(registry.get(1).unwrap().name, "a");
    }
}
