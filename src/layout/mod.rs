//! Daily deterministic layout allocation
//!
//! Every content collection (a category, the home page, the trending page)
//! is presented through two "shape" layouts chosen fresh each calendar day.
//! The choice is deterministic: every visitor sees the same pair of layouts
//! for a given collection on a given UTC day, and the pair rolls over at
//! midnight without any stored state.
//!
//! # Modules
//!
//! - [`registry`] - The fixed table of shape layouts and their slot counts
//! - [`selector`] - Date-seeded deterministic selection of two layouts
//! - [`allocate`] - Partitioning a fetched article list into layout buckets
//!
//! # Quick Start
//!
//! ```
//! use sentinel_digest::layout::{allocate, DailySelector, LayoutRegistry};
//! use chrono::NaiveDate;
//!
//! let selector = DailySelector::new(LayoutRegistry::builtin());
//! let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//!
//! let (primary, secondary) = selector.select_for_date("politics", date);
//! assert_ne!(primary.name, secondary.name);
//!
//! let articles: Vec<u32> = (0..40).collect();
//! let buckets = allocate(articles, primary.required_articles, secondary.required_articles);
//! assert_eq!(buckets.primary.len(), primary.required_articles);
//! ```

pub mod allocate;
pub mod registry;
pub mod selector;

pub use allocate::{allocate, Allocation};
pub use registry::{LayoutDescriptor, LayoutRegistry};
pub use selector::DailySelector;

use thiserror::Error;

/// Errors raised while constructing the layout registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Selection needs at least two layouts to guarantee a distinct pair
    #[error("Layout registry needs at least 2 entries, got {0}")]
    RegistryTooSmall(usize),

    /// Registry entries are keyed by name and must be unique
    #[error("Duplicate layout name: {0}")]
    DuplicateName(String),

    /// A layout with zero slots can never be filled
    #[error("Layout {0} requires zero articles")]
    EmptyLayout(String),
}

/// Result type for registry construction
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
