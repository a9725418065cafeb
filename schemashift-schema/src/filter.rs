//! Table selection for comparisons.

use std::fmt;
use std::sync::Arc;

use crate::ast::Table;

type Predicate = Arc<dyn Fn(&Table) -> bool + Send + Sync>;

/// Decides which tables of the target schema take part in a comparison.
#[derive(Clone, Default)]
pub struct TableFilter {
    kind: FilterKind,
}

#[derive(Clone, Default)]
enum FilterKind {
    #[default]
    All,
    Groups(Vec<String>),
    Custom(Predicate),
}

impl TableFilter {
    /// A filter that accepts every table.
    pub fn all() -> Self {
        Self::default()
    }

    /// Accept tables whose group is in a comma separated list.
    ///
    /// Entries are trimmed and empty entries are ignored. An empty list
    /// accepts every table.
    pub fn groups(list: &str) -> Self {
        Self::from_groups(list.split(','))
    }

    /// Accept tables whose group is one of `groups`.
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups: Vec<String> = groups
            .into_iter()
            .map(|g| g.as_ref().trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();

        if groups.is_empty() {
            Self::all()
        } else {
            Self {
                kind: FilterKind::Groups(groups),
            }
        }
    }

    /// Accept tables matching an arbitrary predicate.
    pub fn from_fn(f: impl Fn(&Table) -> bool + Send + Sync + 'static) -> Self {
        Self {
            kind: FilterKind::Custom(Arc::new(f)),
        }
    }

    /// Check whether a table passes the filter.
    pub fn matches(&self, table: &Table) -> bool {
        match &self.kind {
            FilterKind::All => true,
            FilterKind::Groups(groups) => groups.iter().any(|g| *g == table.group),
            FilterKind::Custom(f) => f(table),
        }
    }

    /// Check whether this filter accepts every table.
    pub fn is_all(&self) -> bool {
        matches!(self.kind, FilterKind::All)
    }
}

impl fmt::Debug for TableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FilterKind::All => f.write_str("TableFilter::All"),
            FilterKind::Groups(groups) => f.debug_tuple("TableFilter::Groups").field(groups).finish(),
            FilterKind::Custom(_) => f.write_str("TableFilter::Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, group: &str) -> Table {
        Table::new(name).with_group(group)
    }

    #[test]
    fn test_all() {
        let filter = TableFilter::all();
        assert!(filter.is_all());
        assert!(filter.matches(&table("user", "")));
    }

    #[test]
    fn test_groups() {
        let filter = TableFilter::groups(" billing, auth ,,");
        assert!(!filter.is_all());
        assert!(filter.matches(&table("invoice", "billing")));
        assert!(filter.matches(&table("user", "auth")));
        assert!(!filter.matches(&table("log", "audit")));
        assert!(!filter.matches(&table("misc", "")));
    }

    #[test]
    fn test_empty_group_list_accepts_all() {
        assert!(TableFilter::groups("").is_all());
        assert!(TableFilter::groups(" , ").is_all());
    }

    #[test]
    fn test_custom() {
        let filter = TableFilter::from_fn(|t| t.name.starts_with("tmp_"));
        assert!(filter.matches(&table("tmp_import", "")));
        assert!(!filter.matches(&table("user", "")));
        assert_eq!(format!("{filter:?}"), "TableFilter::Custom(..)");
    }
}
