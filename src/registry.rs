//! Comparator registry: column kind name to sort behavior.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::coerce::{self, ColumnKind};
use crate::value::{CellValue, SortKey};

/// Preprocessor: raw cell value to comparable key.
pub type PreprocessFn = Arc<dyn Fn(&CellValue) -> SortKey + Send + Sync>;

/// Comparator over two preprocessed keys.
pub type CompareFn = Arc<dyn Fn(SortKey, SortKey) -> Ordering + Send + Sync>;

/// Sort behavior for one column kind: a preprocessor and a comparator per
/// direction.
#[derive(Clone)]
pub struct ComparatorEntry {
    /// Raw value to comparable key.
    pub preprocess: PreprocessFn,
    /// Ascending comparison over preprocessed keys.
    pub ascending: CompareFn,
    /// Descending comparison over preprocessed keys.
    pub descending: CompareFn,
}

impl ComparatorEntry {
    /// Build an entry from a preprocessor, deriving both directions from
    /// the key's natural order. Ties compare equal; the render engine is
    /// responsible for keeping equal rows in their original relative
    /// order (stable sort).
    pub fn keyed<F>(preprocess: F) -> Self
    where
        F: Fn(&CellValue) -> SortKey + Send + Sync + 'static,
    {
        Self {
            preprocess: Arc::new(preprocess),
            ascending: Arc::new(|a: SortKey, b: SortKey| a.cmp(&b)),
            descending: Arc::new(|a: SortKey, b: SortKey| b.cmp(&a)),
        }
    }
}

impl std::fmt::Debug for ComparatorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparatorEntry").finish_non_exhaustive()
    }
}

/// Registry of sort behaviors, keyed by column kind name.
///
/// One instance is injected into the table controller's construction
/// rather than living as process-global state, so tests (and hosts with
/// differing needs) can build isolated registries. Registration happens
/// at startup, before any table renders; the registry is only read
/// afterwards, so no interior locking is needed.
///
/// # Example
///
/// ```
/// use steadytable::registry::{ComparatorEntry, ComparatorRegistry};
/// use steadytable::value::{CellValue, SortKey};
///
/// let mut registry = ComparatorRegistry::with_builtins();
/// registry.register_entry(
///     "shoe-size",
///     ComparatorEntry::keyed(|v: &CellValue| match v {
///         CellValue::Number(n) => SortKey::new(*n),
///         _ => SortKey::ABSENT,
///     }),
/// );
/// assert!(registry.lookup("shoe-size").is_some());
/// assert!(registry.lookup("hat-size").is_none());
/// ```
#[derive(Debug, Default)]
pub struct ComparatorRegistry {
    entries: HashMap<String, ComparatorEntry>,
}

impl ComparatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the builtin legacy kinds registered:
    /// `currency`, `numeric-comma`, `url-numeric`, `month-year`, and
    /// `percentage-range`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_entry(
            ColumnKind::Currency.name(),
            ComparatorEntry::keyed(coerce::currency),
        );
        registry.register_entry(
            ColumnKind::NumericComma.name(),
            ComparatorEntry::keyed(coerce::numeric_comma),
        );
        registry.register_entry(
            ColumnKind::UrlNumeric.name(),
            ComparatorEntry::keyed(coerce::url_numeric),
        );
        registry.register_entry(
            ColumnKind::MonthYear.name(),
            ComparatorEntry::keyed(coerce::month_year),
        );
        registry.register_entry(
            ColumnKind::PercentageRange.name(),
            ComparatorEntry::keyed(coerce::percentage_range),
        );
        registry
    }

    /// Register a sort behavior under a kind name from its three parts:
    /// a preprocessor and one comparator per direction.
    ///
    /// Re-registering an existing name silently overwrites it (last
    /// writer wins). No uniqueness is enforced; hosts that extend the
    /// registry own their naming.
    pub fn register<P, A, D>(
        &mut self,
        name: impl Into<String>,
        preprocess: P,
        ascending: A,
        descending: D,
    ) where
        P: Fn(&CellValue) -> SortKey + Send + Sync + 'static,
        A: Fn(SortKey, SortKey) -> Ordering + Send + Sync + 'static,
        D: Fn(SortKey, SortKey) -> Ordering + Send + Sync + 'static,
    {
        self.register_entry(
            name,
            ComparatorEntry {
                preprocess: Arc::new(preprocess),
                ascending: Arc::new(ascending),
                descending: Arc::new(descending),
            },
        );
    }

    /// Register a prebuilt entry under a kind name. Same overwrite
    /// semantics as [`register`](Self::register).
    pub fn register_entry(&mut self, name: impl Into<String>, entry: ComparatorEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Look up the entry for a kind name.
    ///
    /// `None` means "let the render engine use its default comparator";
    /// an unregistered kind is a fallback signal, not an error.
    pub fn lookup(&self, name: &str) -> Option<&ComparatorEntry> {
        self.entries.get(name)
    }

    /// Look up the entry for a column kind. [`ColumnKind::Default`] never
    /// resolves; it always means the engine's own comparison.
    pub fn lookup_kind(&self, kind: &ColumnKind) -> Option<&ComparatorEntry> {
        match kind {
            ColumnKind::Default => None,
            other => self.lookup(other.name()),
        }
    }

    /// The number of registered kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
