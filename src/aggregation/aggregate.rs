use indexmap::IndexMap;

use crate::aggregation::types::{
    AggregationResult, CitySeriesGroup, StatusHistogram, TOTAL_SERIES_LABEL, TimeSeriesPoint,
};
use crate::normalize::NormalizedObservation;

/// Builds every derived view of a batch in a single pass.
///
/// Per observation this appends a point to its charger's series and to the
/// total series, and counts its raw status string in both its city's
/// histogram and the total histogram. Histograms are keyed by the raw string,
/// so `SuspendedEV` and `Suspended EV` stay separate bars while sharing
/// ordinal 3 on the line charts.
///
/// Afterwards every series is sorted by timestamp. An empty batch gives an
/// empty result.
pub fn aggregate<I>(observations: I) -> AggregationResult
where
    I: IntoIterator<Item = NormalizedObservation>,
{
    let mut per_city: IndexMap<String, CitySeriesGroup> = IndexMap::new();
    let mut per_city_histogram: IndexMap<String, StatusHistogram> = IndexMap::new();
    let mut total = CitySeriesGroup::default();
    let mut total_histogram = StatusHistogram::default();

    for obs in observations {
        let point = TimeSeriesPoint {
            x: obs.timestamp,
            y: obs.status_code,
        };

        per_city_histogram
            .entry(obs.city.clone())
            .or_default()
            .increment(&obs.raw_status);
        total_histogram.increment(&obs.raw_status);

        total
            .datasets
            .entry(TOTAL_SERIES_LABEL.to_string())
            .or_default()
            .points
            .push(point);

        per_city
            .entry(obs.city)
            .or_default()
            .datasets
            .entry(obs.charger_key)
            .or_default()
            .points
            .push(point);
    }

    for group in per_city.values_mut() {
        finish_group(group);
    }
    finish_group(&mut total);

    AggregationResult {
        per_city,
        per_city_histogram,
        total,
        total_histogram,
    }
}

fn finish_group(group: &mut CitySeriesGroup) {
    for series in group.datasets.values_mut() {
        series.points.sort_unstable_by_key(|p| p.x);
    }
    group.total_datasets = group.datasets.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::types::ChargerSeries;
    use crate::status::to_code;
    use chrono::{NaiveDate, NaiveDateTime};

    fn all_sorted(result: &AggregationResult) -> bool {
        result
            .per_city
            .values()
            .chain(std::iter::once(&result.total))
            .flat_map(|g| g.datasets.values())
            .all(ChargerSeries::is_sorted)
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 3, 7)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn obs(city: &str, charger: &str, hour: u32, status: &str) -> NormalizedObservation {
        NormalizedObservation {
            city: city.to_string(),
            charger_key: format!("{city} - {charger} - 1"),
            timestamp: at(hour),
            status_code: to_code(status),
            raw_status: status.to_string(),
        }
    }

    #[test]
    fn test_empty_batch_gives_empty_result() {
        let result = aggregate(Vec::<NormalizedObservation>::new());

        assert!(result.per_city.is_empty());
        assert!(result.per_city_histogram.is_empty());
        assert!(result.total.datasets.is_empty());
        assert_eq!(result.total.total_datasets, 0);
        assert!(result.total_histogram.is_empty());
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let result = aggregate(vec![
            obs("Utrecht", "Z9", 1, "Charging"),
            obs("Amsterdam", "B1", 1, "Available"),
            obs("Utrecht", "A1", 2, "Offline"),
            obs("Utrecht", "Z9", 3, "Available"),
        ]);

        let cities: Vec<_> = result.cities().collect();
        assert_eq!(cities, vec!["Utrecht", "Amsterdam"]);

        let utrecht = &result.per_city["Utrecht"];
        let keys: Vec<_> = utrecht.datasets.keys().cloned().collect();
        assert_eq!(keys, vec!["Utrecht - Z9 - 1", "Utrecht - A1 - 1"]);
        assert_eq!(utrecht.total_datasets, 2);
        assert_eq!(utrecht.get("Utrecht - Z9 - 1").unwrap().len(), 2);
    }

    #[test]
    fn test_series_sorted_regardless_of_input_order() {
        let result = aggregate(vec![
            obs("Utrecht", "A1", 5, "Charging"),
            obs("Utrecht", "A1", 1, "Available"),
            obs("Utrecht", "A1", 3, "Offline"),
            obs("Delft", "B1", 4, "Charging"),
            obs("Delft", "B1", 2, "Charging"),
        ]);

        assert!(all_sorted(&result));
        let series = result.per_city["Utrecht"].get("Utrecht - A1 - 1").unwrap();
        let ys: Vec<_> = series.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1, 0, 2]);
    }

    #[test]
    fn test_histogram_totals_match_observations() {
        let batch = vec![
            obs("Utrecht", "A1", 1, "Charging"),
            obs("Utrecht", "A2", 2, "Charging"),
            obs("Utrecht", "A1", 3, "Available"),
            obs("Delft", "B1", 1, "Offline"),
        ];
        let result = aggregate(batch);

        assert_eq!(result.per_city_histogram["Utrecht"].total(), 3);
        assert_eq!(result.per_city_histogram["Delft"].total(), 1);
        assert_eq!(result.observation_count(), 4);
        assert_eq!(result.total_histogram.get("Charging"), 2);
    }

    #[test]
    fn test_total_histogram_is_sum_of_city_histograms() {
        let result = aggregate(vec![
            obs("Utrecht", "A1", 1, "Charging"),
            obs("Delft", "B1", 2, "Charging"),
            obs("Delft", "B1", 3, "Faulted"),
            obs("Leiden", "C1", 4, "Available"),
        ]);

        for (label, count) in result.total_histogram.bars() {
            let summed: u64 = result
                .per_city_histogram
                .values()
                .map(|h| h.get(label))
                .sum();
            assert_eq!(summed, count, "label {label}");
        }
        let city_labels: usize = result
            .per_city_histogram
            .values()
            .flat_map(|h| h.counts.keys())
            .filter(|l| result.total_histogram.get(l) == 0)
            .count();
        assert_eq!(city_labels, 0);
    }

    #[test]
    fn test_suspended_spellings_merge_in_series_not_histogram() {
        let result = aggregate(vec![
            obs("Utrecht", "A1", 1, "SuspendedEV"),
            obs("Utrecht", "A1", 2, "Suspended EV"),
        ]);

        let series = result.per_city["Utrecht"].get("Utrecht - A1 - 1").unwrap();
        assert!(series.points.iter().all(|p| p.y == 3));

        let hist = &result.per_city_histogram["Utrecht"];
        assert_eq!(hist.len(), 2);
        assert_eq!(hist.get("SuspendedEV"), 1);
        assert_eq!(hist.get("Suspended EV"), 1);
        assert_eq!(result.total_histogram.len(), 2);
    }

    #[test]
    fn test_total_series_collects_every_point() {
        let result = aggregate(vec![
            obs("Utrecht", "A1", 4, "Charging"),
            obs("Delft", "B1", 2, "Available"),
            obs("Leiden", "C1", 3, "Faulted"),
        ]);

        assert_eq!(result.total.total_datasets, 1);
        let all = result.total.get(TOTAL_SERIES_LABEL).unwrap();
        assert_eq!(all.len(), 3);
        let ys: Vec<_> = all.points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1, -1, 2]);
    }
}
