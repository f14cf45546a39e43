//! Editable query filters and the payload builder.

use aca_model::{FilterField, FilterOperator, QueryFilter, QueryPayload};

/// A filter row as edited on screen; any part may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub field: Option<FilterField>,
    pub operator: Option<FilterOperator>,
    pub value: String,
}

impl FilterDraft {
    /// A new row: first field, first operator, empty value.
    pub fn with_defaults() -> Self {
        Self {
            field: Some(FilterField::ALL[0]),
            operator: Some(FilterOperator::ALL[0]),
            value: String::new(),
        }
    }

    /// Field, operator and a non-blank value are all present.
    pub fn is_complete(&self) -> bool {
        self.to_filter().is_some()
    }

    /// The filter this row stands for, or `None` while any part is missing.
    pub fn to_filter(&self) -> Option<QueryFilter> {
        let field = self.field?;
        let operator = self.operator?;
        if self.value.trim().is_empty() {
            return None;
        }
        Some(QueryFilter::new(field, operator, self.value.clone()))
    }
}

impl From<QueryFilter> for FilterDraft {
    fn from(filter: QueryFilter) -> Self {
        Self {
            field: Some(filter.field),
            operator: Some(filter.operator),
            value: filter.value,
        }
    }
}

/// Builds the query payload from complete rows, in row order.
///
/// A row is complete once it has a field, an operator and a value that is
/// not blank. A whitespace-only value counts as missing. Incomplete rows
/// are skipped, never rejected. Values are sent untrimmed.
pub fn build(drafts: &[FilterDraft]) -> QueryPayload {
    QueryPayload {
        filters: drafts.iter().filter_map(FilterDraft::to_filter).collect(),
    }
}

/// Ordered filter rows of the find screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterList {
    drafts: Vec<FilterDraft>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row with default field and operator; returns its index.
    pub fn add(&mut self) -> usize {
        self.push(FilterDraft::with_defaults())
    }

    pub fn push(&mut self, draft: FilterDraft) -> usize {
        self.drafts.push(draft);
        self.drafts.len() - 1
    }

    /// Removes the row at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<FilterDraft> {
        (index < self.drafts.len()).then(|| self.drafts.remove(index))
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FilterDraft> {
        self.drafts.get_mut(index)
    }

    pub fn drafts(&self) -> &[FilterDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    pub fn build(&self) -> QueryPayload {
        build(&self.drafts)
    }
}

impl FromIterator<QueryFilter> for FilterList {
    fn from_iter<I: IntoIterator<Item = QueryFilter>>(iter: I) -> Self {
        Self {
            drafts: iter.into_iter().map(FilterDraft::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rows_are_dropped() {
        let drafts = vec![
            FilterDraft {
                field: None,
                operator: Some(FilterOperator::Eq),
                value: "x".to_string(),
            },
            FilterDraft {
                field: Some(FilterField::City),
                operator: Some(FilterOperator::Eq),
                value: "NYC".to_string(),
            },
        ];
        let payload = build(&drafts);
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.filters[0].to_string(), "CITY EQ NYC");
    }

    #[test]
    fn new_rows_use_defaults_and_are_incomplete() {
        let mut list = FilterList::new();
        assert_eq!(list.add(), 0);
        let draft = &list.drafts()[0];
        assert_eq!(draft.field, Some(FilterField::City));
        assert_eq!(draft.operator, Some(FilterOperator::Eq));
        assert!(!draft.is_complete());
        assert!(list.build().is_empty());
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let draft = FilterDraft {
            value: "   ".to_string(),
            ..FilterDraft::with_defaults()
        };
        assert!(draft.to_filter().is_none());

        let padded = FilterDraft {
            value: " Oslo ".to_string(),
            ..FilterDraft::with_defaults()
        };
        assert_eq!(padded.to_filter().unwrap().value, " Oslo ");
    }

    #[test]
    fn edits_and_removal_keep_order() {
        let mut list = FilterList::new();
        for value in ["Paris", "Rome", "Oslo"] {
            let index = list.add();
            if let Some(draft) = list.get_mut(index) {
                draft.value = value.to_string();
            }
        }
        assert_eq!(list.remove(1).map(|d| d.value), Some("Rome".to_string()));
        assert!(list.remove(9).is_none());

        let values: Vec<String> = list.build().filters.into_iter().map(|f| f.value).collect();
        assert_eq!(values, vec!["Paris", "Oslo"]);

        list.clear();
        assert!(list.is_empty());
    }
}
