//! Paging over a city's charger series.
//!
//! [`page`] slices leniently: a page number outside `1..=total_pages` gives
//! an empty page. Clamping happens only in [`PaginationState::navigate`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::aggregation::{AggregationResult, ChargerSeries, ChartDataset, CitySeriesGroup, color_for};

/// Default number of charger series per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page navigation requested by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Navigation {
    First,
    Previous,
    Next,
    Last,
}

/// A charger series on a page, with its position in the city's group.
#[derive(Debug, Clone, Copy)]
pub struct PageEntry<'a> {
    pub index: usize,
    pub charger_key: &'a str,
    pub series: &'a ChargerSeries,
}

impl PageEntry<'_> {
    pub fn color(&self) -> &'static str {
        color_for(self.index)
    }

    pub fn to_dataset(&self) -> ChartDataset {
        ChartDataset::new(self.index, self.charger_key, &self.series.points)
    }
}

/// Number of pages needed for `total_datasets` series. Zero when
/// `page_size` is zero.
pub fn total_pages(total_datasets: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_datasets.div_ceil(page_size)
}

/// Returns the series of `group` shown on 1-based `requested_page`.
///
/// Out-of-range pages, including page 0, yield an empty vector.
pub fn page(group: &CitySeriesGroup, page_size: usize, requested_page: usize) -> Vec<PageEntry<'_>> {
    let Some(start) = requested_page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size))
    else {
        return Vec::new();
    };

    group
        .datasets
        .iter()
        .enumerate()
        .skip(start)
        .take(page_size)
        .map(|(index, (charger_key, series))| PageEntry {
            index,
            charger_key: charger_key.as_str(),
            series,
        })
        .collect()
}

/// Current page per city. Caller-owned; rebuilt for every new result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaginationState {
    pages: IndexMap<String, usize>,
}

impl PaginationState {
    /// Starts every city of `result` on page 1.
    pub fn new(result: &AggregationResult) -> Self {
        Self {
            pages: result.cities().map(|city| (city.to_string(), 1)).collect(),
        }
    }

    /// Current page of `city`; 1 if the city has no cursor yet.
    pub fn current(&self, city: &str) -> usize {
        self.pages.get(city).copied().unwrap_or(1)
    }

    /// Sets the cursor without validation. Use [`Self::navigate`] for
    /// user-driven moves.
    pub fn set(&mut self, city: &str, page: usize) {
        self.pages.insert(city.to_string(), page);
    }

    /// Moves the cursor of `city` and returns the new page, kept within
    /// `1..=total_pages`.
    pub fn navigate(&mut self, city: &str, nav: Navigation, total_pages: usize) -> usize {
        let last = total_pages.max(1);
        let current = self.current(city);
        let next = match nav {
            Navigation::First => 1,
            Navigation::Previous => current.saturating_sub(1),
            Navigation::Next => current.saturating_add(1),
            Navigation::Last => last,
        }
        .clamp(1, last);

        self.set(city, next);
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::normalize::NormalizedObservation;
    use chrono::NaiveDate;

    fn group_of(n: usize) -> CitySeriesGroup {
        let mut group = CitySeriesGroup::default();
        for i in 0..n {
            group
                .datasets
                .insert(format!("Utrecht - C{i} - 1"), ChargerSeries::default());
        }
        group.total_datasets = n;
        group
    }

    fn indices(entries: &[PageEntry<'_>]) -> Vec<usize> {
        entries.iter().map(|e| e.index).collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_first_page_of_23() {
        let group = group_of(23);
        assert_eq!(indices(&page(&group, 10, 1)), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_last_partial_page_of_23() {
        let group = group_of(23);
        let entries = page(&group, 10, 3);
        assert_eq!(indices(&entries), vec![20, 21, 22]);
        assert_eq!(entries[0].charger_key, "Utrecht - C20 - 1");
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let group = group_of(23);
        assert!(page(&group, 10, 4).is_empty());
        assert!(page(&group, 10, 0).is_empty());
        assert!(page(&group, 10, usize::MAX).is_empty());
    }

    #[test]
    fn test_entry_color_uses_group_index() {
        let group = group_of(12);
        let entries = page(&group, 10, 2);
        assert_eq!(entries[0].index, 10);
        assert_eq!(entries[0].color(), color_for(10));
        assert_eq!(entries[1].to_dataset().border_color, "#36A2EB");
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = PaginationState::default();

        assert_eq!(state.navigate("Utrecht", Navigation::Previous, 3), 1);
        assert_eq!(state.navigate("Utrecht", Navigation::Next, 3), 2);
        assert_eq!(state.navigate("Utrecht", Navigation::Next, 3), 3);
        assert_eq!(state.navigate("Utrecht", Navigation::Next, 3), 3);
        assert_eq!(state.navigate("Utrecht", Navigation::First, 3), 1);
        assert_eq!(state.navigate("Utrecht", Navigation::Last, 3), 3);
        assert_eq!(state.navigate("Utrecht", Navigation::Previous, 3), 2);
    }

    #[test]
    fn test_cursors_are_independent_per_city() {
        let mut state = PaginationState::default();
        state.navigate("Utrecht", Navigation::Last, 3);

        assert_eq!(state.current("Utrecht"), 3);
        assert_eq!(state.current("Delft"), 1);
    }

    #[test]
    fn test_new_state_starts_every_city_on_page_one() {
        let at = NaiveDate::from_ymd_opt(2023, 3, 7)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let result = aggregate(["Utrecht", "Delft"].map(|city| NormalizedObservation {
            city: city.to_string(),
            charger_key: format!("{city} - A1 - 1"),
            timestamp: at,
            status_code: 2,
            raw_status: "Charging".to_string(),
        }));

        let state = PaginationState::new(&result);
        let pages: Vec<_> = state.iter().collect();
        assert_eq!(pages, vec![("Utrecht", 1), ("Delft", 1)]);
    }
}
