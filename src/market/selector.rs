use crate::model::comparison::DailyComparison;

/// Sidebar symbol filter: either everything, or an explicit symbol set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolSelection {
    All,
    Symbols(Vec<String>),
}

impl SymbolSelection {
    fn matches(&self, symbol: &str) -> bool {
        match self {
            SymbolSelection::All => true,
            SymbolSelection::Symbols(symbols) => symbols.iter().any(|s| s == symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Filter comparisons by symbol selection and sort by percentage change.
///
/// `All` is all-or-nothing: it ignores any concrete symbols and returns the
/// whole set. An empty concrete selection yields an empty result. The sort is
/// stable.
pub fn select_and_sort(
    comparisons: &[DailyComparison],
    selection: &SymbolSelection,
    order: SortOrder,
) -> Vec<DailyComparison> {
    let mut selected: Vec<DailyComparison> = comparisons
        .iter()
        .filter(|c| selection.matches(&c.symbol))
        .cloned()
        .collect();

    match order {
        SortOrder::Ascending => {
            selected.sort_by(|a, b| a.percentage_change.total_cmp(&b.percentage_change))
        }
        SortOrder::Descending => {
            selected.sort_by(|a, b| b.percentage_change.total_cmp(&a.percentage_change))
        }
    }
    selected
}
