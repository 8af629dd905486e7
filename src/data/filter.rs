use std::collections::BTreeSet;

use super::model::IndicatorTable;

// ---------------------------------------------------------------------------
// Filter state: the user's month and specialty selections
// ---------------------------------------------------------------------------

/// Current selections, independent of the table.
///
/// * `selected_months` empty → no month filter, every row is shown.
/// * `selected_specialties` empty → the surgery chart has nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    selected_months: BTreeSet<String>,
    /// In the order the user picked them; no duplicates.
    selected_specialties: Vec<String>,
}

impl FilterState {
    pub fn selected_months(&self) -> &BTreeSet<String> {
        &self.selected_months
    }

    pub fn selected_specialties(&self) -> &[String] {
        &self.selected_specialties
    }

    /// Replace the month selection. Values are not checked against the
    /// table; an unknown month simply matches no row.
    pub fn set_selected_months<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected_months = values.into_iter().collect();
    }

    /// Replace the specialty selection, keeping the first occurrence of each.
    pub fn set_selected_specialties<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selected_specialties.clear();
        for value in values {
            if !self.selected_specialties.contains(&value) {
                self.selected_specialties.push(value);
            }
        }
    }

    pub fn toggle_month(&mut self, month: &str) {
        if !self.selected_months.remove(month) {
            self.selected_months.insert(month.to_string());
        }
    }

    /// Newly selected specialties go to the end of the selection.
    pub fn toggle_specialty(&mut self, specialty: &str) {
        if let Some(pos) = self.selected_specialties.iter().position(|s| s == specialty) {
            self.selected_specialties.remove(pos);
        } else {
            self.selected_specialties.push(specialty.to_string());
        }
    }

    pub fn clear_months(&mut self) {
        self.selected_months.clear();
    }

    pub fn clear_specialties(&mut self) {
        self.selected_specialties.clear();
    }

    /// Whether a month filter is in effect.
    pub fn months_active(&self) -> bool {
        !self.selected_months.is_empty()
    }
}

/// The x-values a chart shows under the current month selection.
///
/// Without a month filter this is every `Mês` value. With one, it is the
/// subsequence of `Mês` values that are selected, in table order, one entry
/// per matching row (repeated months are kept).
pub fn filtered_months(table: &IndicatorTable, filters: &FilterState) -> Vec<String> {
    if !filters.months_active() {
        return table.months().to_vec();
    }
    table
        .months()
        .iter()
        .filter(|m| filters.selected_months.contains(*m))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
